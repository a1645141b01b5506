//! # Redirect signalling — request a navigation from anywhere in a handler
//!
//! Page loaders and form actions call [`redirect`] when the user should be sent
//! somewhere else. Instead of returning a value, it fails with a
//! [`RedirectError`] whose *digest* encodes the destination:
//!
//! ```text
//! REDIRECT;/notes?page=2
//! ^^^^^^^^ ^^^^^^^^^^^^^
//!  marker   destination (opaque, never validated)
//! ```
//!
//! The error travels through `?` like any other failure, may be wrapped in
//! [`ApiError`], an `anyhow` context chain or a foreign error's `source()`, and
//! is finally recognised by the request-handling layer with
//! [`is_redirect_error`] / [`url_from_redirect_error`]. That layer decides
//! between a `302 Found` and a `<meta http-equiv="refresh">` tag.
//!
//! Handlers that prefer an explicit value over an error can lift a result with
//! [`Flow::from_result`].
//!
//! Only [`redirect`] builds a [`RedirectError`]; the digest format is private.

use std::error::Error as StdError;

use crate::error::ApiError;

/// Marker at the start of every redirect digest.
pub const REDIRECT_ERROR_CODE: &str = "REDIRECT";

const SEPARATOR: char = ';';

/// Error value carrying a redirect destination in its digest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", REDIRECT_ERROR_CODE)]
pub struct RedirectError {
    digest: String,
}

impl RedirectError {
    /// The encoded `REDIRECT;<url>` form.
    pub fn digest(&self) -> &str {
        &self.digest
    }
}

/// Fail with a redirect to `url`.
///
/// Never returns `Ok`. The error converts into any error type that accepts a
/// [`RedirectError`], so it works directly in handlers:
///
/// ```
/// use api::{redirect, ApiError};
///
/// fn guard(signed_in: bool) -> Result<&'static str, ApiError> {
///     if !signed_in {
///         return redirect("/login");
///     }
///     Ok("welcome")
/// }
///
/// let err = guard(false).unwrap_err();
/// assert_eq!(api::url_from_redirect_error(&err), Some("/login"));
/// ```
///
/// An empty `url` is accepted here but is not recognised as a redirect later.
pub fn redirect<T, E>(url: impl AsRef<str>) -> Result<T, E>
where
    E: From<RedirectError>,
{
    let url = url.as_ref();
    tracing::debug!(url, "redirect requested");
    Err(RedirectError {
        digest: format!("{REDIRECT_ERROR_CODE}{SEPARATOR}{url}"),
    }
    .into())
}

/// Anything that may carry a redirect digest.
///
/// Implementations return the raw digest, if any. Classification happens in
/// [`is_redirect_error`].
pub trait Digest {
    fn digest(&self) -> Option<&str>;
}

impl Digest for RedirectError {
    fn digest(&self) -> Option<&str> {
        Some(&self.digest)
    }
}

/// A digest forwarded as plain text, e.g. an error message that crossed a
/// serialisation boundary.
impl Digest for str {
    fn digest(&self) -> Option<&str> {
        Some(self)
    }
}

impl Digest for String {
    fn digest(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<T: Digest + ?Sized> Digest for &T {
    fn digest(&self) -> Option<&str> {
        (**self).digest()
    }
}

impl<T: Digest + ?Sized> Digest for Box<T> {
    fn digest(&self) -> Option<&str> {
        (**self).digest()
    }
}

impl<T: Digest> Digest for Option<T> {
    fn digest(&self) -> Option<&str> {
        self.as_ref().and_then(|value| value.digest())
    }
}

/// Walks the `source()` chain and returns the first redirect digest found.
impl Digest for dyn StdError + 'static {
    fn digest(&self) -> Option<&str> {
        let mut current: Option<&(dyn StdError + 'static)> = Some(self);
        while let Some(err) = current {
            if let Some(digest) = own_digest(err) {
                return Some(digest);
            }
            current = err.source();
        }
        None
    }
}

impl Digest for dyn StdError + Send + Sync + 'static {
    fn digest(&self) -> Option<&str> {
        let err: &(dyn StdError + 'static) = self;
        err.digest()
    }
}

impl Digest for anyhow::Error {
    fn digest(&self) -> Option<&str> {
        self.chain().find_map(own_digest)
    }
}

fn own_digest<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a str> {
    if let Some(redirect) = err.downcast_ref::<RedirectError>() {
        return Some(&redirect.digest);
    }
    err.downcast_ref::<ApiError>().and_then(Digest::digest)
}

/// Whether `error` carries a redirect with a non-empty destination.
pub fn is_redirect_error<E: Digest + ?Sized>(error: &E) -> bool {
    url_from_redirect_error(error).is_some()
}

/// The destination encoded in `error`, or `None` if it is not a redirect.
///
/// The URL is returned exactly as passed to [`redirect`]; it is not validated.
pub fn url_from_redirect_error<E: Digest + ?Sized>(error: &E) -> Option<&str> {
    error
        .digest()?
        .strip_prefix(REDIRECT_ERROR_CODE)?
        .strip_prefix(SEPARATOR)
        .filter(|url| !url.is_empty())
}

/// Outcome of a handler that may redirect instead of producing a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow<T> {
    Continue(T),
    Redirect(String),
}

impl<T> Flow<T> {
    /// Lift a redirect error out of `result`.
    ///
    /// `Ok` becomes [`Flow::Continue`], a redirect becomes [`Flow::Redirect`],
    /// and every other error is handed back untouched.
    pub fn from_result<E: Digest>(result: Result<T, E>) -> Result<Self, E> {
        match result {
            Ok(value) => Ok(Flow::Continue(value)),
            Err(error) => {
                let url = url_from_redirect_error(&error).map(str::to_owned);
                match url {
                    Some(url) => Ok(Flow::Redirect(url)),
                    None => Err(error),
                }
            }
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Flow<U> {
        match self {
            Flow::Continue(value) => Flow::Continue(f(value)),
            Flow::Redirect(url) => Flow::Redirect(url),
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Flow::Redirect(_))
    }

    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            Flow::Continue(_) => None,
            Flow::Redirect(url) => Some(url),
        }
    }
}
