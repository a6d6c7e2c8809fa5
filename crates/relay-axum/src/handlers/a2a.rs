//! Agent protocol handler (JSON-RPC 2.0 over HTTP).
//!
//! Request:  `{ jsonrpc: "2.0", method: "message/send", id, params: { message: { parts: [{ text }] } } }`
//! Response: `{ jsonrpc: "2.0", id, result: { message: { role: "agent", parts: [{ text }] } } }`

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use bytes::Bytes;
use relay_core::Message;
use tracing::{debug, error, info, warn};

use crate::dto::a2a::{AgentMessage, MESSAGE_SEND, SendMessageResult, collect_text};
use crate::jsonrpc::{
    INVALID_PARAMS, INVALID_REQUEST, JsonRpcRequest, JsonRpcResponse, RpcFailure, SERVER_ERROR,
};
use crate::state::AppState;

/// Handle a `message/send` call.
/// POST /api/a2a/stream
pub async fn send(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<JsonRpcResponse<SendMessageResult>>, RpcFailure> {
    debug!("POST /api/a2a/stream");

    let request = JsonRpcRequest::parse(&body)?;
    let id = request.id.clone();

    if !request.is_call_to(MESSAGE_SEND) {
        warn!(method = %request.method, "Rejecting agent call");
        return Err(RpcFailure::bad_request(
            id,
            INVALID_REQUEST,
            "Expected JSON-RPC 2.0 with method message/send",
        ));
    }

    let text = collect_text(&request.params);
    if text.is_empty() {
        return Err(RpcFailure::bad_request(
            id,
            INVALID_PARAMS,
            "No text found in message parts",
        ));
    }

    info!(id = %id, "Processing agent message");

    match state.chat.chat(vec![Message::user(text)]).await {
        Ok(content) => Ok(Json(JsonRpcResponse::result(
            id,
            SendMessageResult {
                message: AgentMessage::reply(content),
            },
        ))),
        Err(e) => {
            error!("Agent relay failed: {e}");
            let (status, code) = if e.is_client_error() {
                (StatusCode::BAD_REQUEST, INVALID_PARAMS)
            } else {
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR)
            };
            Err(RpcFailure::new(status, id, code, e.to_string()))
        }
    }
}
