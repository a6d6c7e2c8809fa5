//! Axum-specific error types and mappings.
//!
//! This module provides the plain-JSON error envelope used by the generic
//! endpoints and the mapping from [`RelayError`] to HTTP status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use relay_core::RelayError;
use serde::Serialize;
use thiserror::Error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Bad request (invalid input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The route exists but does not accept this HTTP method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body: `{ "error": "<message>" }`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl HttpError {
    /// HTTP status code for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed to the caller (without the variant prefix).
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::BadRequest(msg) | Self::Internal(msg) => msg.clone(),
            Self::MethodNotAllowed => self.to_string(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status(), axum::Json(ErrorBody::new(self.message()))).into_response()
    }
}

impl From<RelayError> for HttpError {
    fn from(err: RelayError) -> Self {
        match err.suggested_status_code() {
            400 => Self::BadRequest(err.to_string()),
            _ => Self::Internal(err.to_string()),
        }
    }
}
