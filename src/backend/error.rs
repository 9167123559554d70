//! Backend error types

use thiserror::Error;

/// Errors raised while talking to the hosted backend
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Backend unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl BackendError {
    /// Map a transport failure onto the matching variant
    pub fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            BackendError::Timeout
        } else if error.is_connect() {
            BackendError::Unavailable
        } else {
            BackendError::Request(error)
        }
    }
}
