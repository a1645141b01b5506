//! Error type shared by page loaders, actions and stores.

use std::error::Error as StdError;

use crate::redirect::{Digest, RedirectError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Not a failure: the handler asked for a navigation.
    #[error(transparent)]
    Redirect(#[from] RedirectError),

    #[error("database error: {0}")]
    Database(#[source] Box<dyn StdError + Send + Sync>),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),
}

impl Digest for ApiError {
    fn digest(&self) -> Option<&str> {
        match self {
            ApiError::Redirect(redirect) => Some(redirect.digest()),
            // A redirect may have been boxed as the cause of another variant.
            _ => StdError::source(self).and_then(|source| source.digest()),
        }
    }
}

#[cfg(feature = "server")]
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Database(Box::new(err))
    }
}

#[cfg(feature = "server")]
impl From<sqlx::migrate::MigrateError> for ApiError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        ApiError::Database(Box::new(err))
    }
}
