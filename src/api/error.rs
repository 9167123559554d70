//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::backend::BackendError;
use crate::dashboard::{FetchError, UnknownTab};

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Hosted backend call failed
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Leaderboard records could not be fetched
    #[error("{0}")]
    Fetch(#[from] FetchError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<UnknownTab> for ApiError {
    fn from(e: UnknownTab) -> Self {
        ApiError::Validation(e.to_string())
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

fn backend_status(error: &BackendError) -> (StatusCode, &'static str) {
    match error {
        BackendError::NotAuthenticated => (StatusCode::UNAUTHORIZED, "NOT_AUTHENTICATED"),
        BackendError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        BackendError::RateLimited(_) => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED"),
        BackendError::Validation(_) | BackendError::Parse(_) => {
            (StatusCode::BAD_GATEWAY, "BAD_BACKEND_DATA")
        }
        _ => (StatusCode::SERVICE_UNAVAILABLE, "BACKEND_UNAVAILABLE"),
    }
}

impl ApiError {
    /// Backend failure underneath this error, if any
    fn backend_error(&self) -> Option<&BackendError> {
        match self {
            ApiError::Backend(e) | ApiError::Fetch(FetchError(e)) => Some(e),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Backend(e) => backend_status(e),
            ApiError::Fetch(FetchError(e)) => backend_status(e),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        };

        let retry_after = match self.backend_error() {
            Some(BackendError::RateLimited(secs)) => Some(*secs),
            _ => None,
        };

        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "API error occurred"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, header::HeaderValue::from(secs));
        }
        response
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
