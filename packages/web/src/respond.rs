//! # Handling layer — turning handler results into responses
//!
//! Every route handler ends in [`respond`]. It lifts a redirect out of the
//! handler's `Result` with [`Flow::from_result`] and answers according to how
//! the request was made:
//!
//! | [`RenderMode`] | Redirect becomes |
//! |----------------|------------------|
//! | `ServerRender` | `200` page with `<meta http-equiv="refresh" content="0;url=…">` |
//! | `Route` | `302 Found` with a `Location` header |
//!
//! Errors that are not redirects are logged and mapped to a status code; they
//! are never retried or reinterpreted.

use api::{ApiError, Flow};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use crate::pages;

/// How the current request is being answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// A page is being rendered to HTML.
    ServerRender,
    /// A direct route such as a form POST.
    Route,
}

pub fn respond<T: IntoResponse>(mode: RenderMode, result: Result<T, ApiError>) -> Response {
    match Flow::from_result(result) {
        Ok(Flow::Continue(body)) => body.into_response(),
        Ok(Flow::Redirect(url)) => redirect_response(mode, &url),
        Err(err) => error_response(err),
    }
}

pub fn redirect_response(mode: RenderMode, url: &str) -> Response {
    match mode {
        RenderMode::ServerRender => Html(pages::meta_refresh_page(url)).into_response(),
        RenderMode::Route => match HeaderValue::try_from(url) {
            Ok(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
            Err(e) => {
                tracing::error!(url, "redirect target is not a valid Location: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        },
    }
}

fn error_response(err: ApiError) -> Response {
    let status = match err {
        ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let message = if status.is_server_error() {
        tracing::error!("request failed: {}", err);
        "Something went wrong.".to_string()
    } else {
        tracing::warn!("request rejected: {}", err);
        err.to_string()
    };

    (status, Html(pages::error_page(status, &message))).into_response()
}
