//! HTTP request handlers for the Axum web server.
//!
//! Each submodule contains handlers for a specific API area.
//! Handlers are thin wrappers that validate input and delegate to `ChatPort`.

pub mod a2a;
pub mod chat;
pub mod status;

use crate::error::HttpError;

/// Fallback for routes hit with a method they do not serve.
pub async fn method_not_allowed() -> HttpError {
    HttpError::MethodNotAllowed
}
