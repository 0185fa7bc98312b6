//! Error taxonomy for the user pipeline.

use thiserror::Error;
use userdeck_core::cache::CacheError;

use crate::fetch::FetchError;
use crate::validate::ValidationError;

/// Failures surfaced by [`UserService`](crate::service::UserService).
///
/// A closed set so callers can match on kind: validation failures keep
/// their field-level detail, fetch failures their status.
#[derive(Debug, Error)]
pub enum UserError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl UserError {
    /// User-friendly message for the rendering layer.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Received malformed user data. Please try again.",
            Self::Fetch(_) => "Could not reach the user service. Check your connection.",
            Self::Cache(_) => "Local cache error. Please try again.",
            Self::Client(_) => "Network error. Check your connection.",
        }
    }
}
