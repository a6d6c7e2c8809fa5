//! Generic chat handlers.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use relay_core::Message;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::dto::ChatResponse;
use crate::error::HttpError;
use crate::state::AppState;

const MESSAGES_REQUIRED: &str = "messages array is required";

/// Relay a conversation and return the assistant reply.
/// POST /api/chat
pub async fn send(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, HttpError> {
    debug!("POST /api/chat");

    let messages = parse_messages(&body)?;
    info!(messages = messages.len(), "Processing chat request");

    let content = state.chat.chat(messages).await.map_err(|e| {
        error!("Chat relay failed: {e}");
        HttpError::from(e)
    })?;

    Ok(Json(ChatResponse::assistant(content)))
}

/// Answer a cross-origin pre-flight request.
/// OPTIONS /api/chat
pub async fn preflight() -> Response {
    let mut response = StatusCode::OK.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

/// Extract a non-empty `messages` array from a request body.
fn parse_messages(body: &[u8]) -> Result<Vec<Message>, HttpError> {
    let payload: Value = serde_json::from_slice(body)
        .map_err(|e| HttpError::BadRequest(format!("Invalid request body: {e}")))?;

    let messages = payload
        .get("messages")
        .and_then(Value::as_array)
        .filter(|messages| !messages.is_empty())
        .ok_or_else(|| HttpError::BadRequest(MESSAGES_REQUIRED.to_string()))?;

    messages
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            Message::deserialize(raw)
                .map_err(|e| HttpError::BadRequest(format!("Invalid message at index {index}: {e}")))
        })
        .collect()
}
