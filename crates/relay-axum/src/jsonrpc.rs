//! JSON-RPC 2.0 envelope for the agent protocol endpoint.
//!
//! Requests are parsed leniently so that a wrong `jsonrpc` version or
//! `method` can be answered with a proper JSON-RPC error (echoing the caller's
//! `id`) instead of a generic deserialization failure.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

/// Protocol version accepted and emitted.
pub const JSONRPC_VERSION: &str = "2.0";

// Standard JSON-RPC error codes
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const INVALID_PARAMS: i32 = -32602;
/// Implementation-defined server error; used for upstream failures.
pub const SERVER_ERROR: i32 = -32000;

/// JSON-RPC 2.0 request with every member kept as raw JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonRpcRequest {
    pub jsonrpc: Value,
    pub method: Value,
    pub id: Value,
    pub params: Value,
}

impl JsonRpcRequest {
    /// Parse a request body.
    ///
    /// Invalid JSON is a parse error; valid JSON that is not an object is an
    /// invalid request. Missing members become `null`.
    pub fn parse(body: &[u8]) -> Result<Self, RpcFailure> {
        let value: Value = serde_json::from_slice(body).map_err(|e| {
            RpcFailure::bad_request(Value::Null, PARSE_ERROR, format!("Parse error: {e}"))
        })?;

        let Value::Object(mut object) = value else {
            return Err(RpcFailure::bad_request(
                Value::Null,
                INVALID_REQUEST,
                "Request must be a JSON object",
            ));
        };

        let mut take = |key: &str| object.remove(key).unwrap_or(Value::Null);
        Ok(Self {
            jsonrpc: take("jsonrpc"),
            method: take("method"),
            id: take("id"),
            params: take("params"),
        })
    }

    /// True when this is a `2.0` request for `method`.
    pub fn is_call_to(&self, method: &str) -> bool {
        self.jsonrpc.as_str() == Some(JSONRPC_VERSION) && self.method.as_str() == Some(method)
    }
}

/// JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse<T = Value> {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

impl<T> JsonRpcResponse<T> {
    /// Create a successful response.
    pub fn result(id: Value, result: T) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// A JSON-RPC error paired with the HTTP status it is delivered with.
#[derive(Debug)]
pub struct RpcFailure {
    pub status: StatusCode,
    pub response: JsonRpcResponse,
}

impl RpcFailure {
    pub fn new(status: StatusCode, id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            status,
            response: JsonRpcResponse::error(id, code, message),
        }
    }

    /// 400 with the given JSON-RPC code.
    pub fn bad_request(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, id, code, message)
    }

    /// JSON-RPC error code carried by this failure.
    pub fn code(&self) -> Option<i32> {
        self.response.error.as_ref().map(|e| e.code)
    }
}

impl IntoResponse for RpcFailure {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_keeps_members_as_raw_json() {
        let body = br#"{"jsonrpc":"2.0","method":"message/send","id":7,"params":{"a":1}}"#;
        let request = JsonRpcRequest::parse(body).unwrap();

        assert!(request.is_call_to("message/send"));
        assert_eq!(request.id, json!(7));
        assert_eq!(request.params, json!({"a": 1}));
    }

    #[test]
    fn test_parse_missing_members_are_null() {
        let request = JsonRpcRequest::parse(b"{}").unwrap();
        assert_eq!(request.id, Value::Null);
        assert!(!request.is_call_to("message/send"));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let failure = JsonRpcRequest::parse(b"{not json").unwrap_err();
        assert_eq!(failure.status, StatusCode::BAD_REQUEST);
        assert_eq!(failure.code(), Some(PARSE_ERROR));
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let failure = JsonRpcRequest::parse(b"[1, 2]").unwrap_err();
        assert_eq!(failure.code(), Some(INVALID_REQUEST));
    }

    #[test]
    fn test_version_must_be_2_0() {
        let request =
            JsonRpcRequest::parse(br#"{"jsonrpc":"1.0","method":"message/send"}"#).unwrap();
        assert!(!request.is_call_to("message/send"));
    }

    #[test]
    fn test_error_response_serialization() {
        let response = JsonRpcResponse::<Value>::error(json!("abc"), INVALID_PARAMS, "nope");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            json!({
                "jsonrpc": "2.0",
                "id": "abc",
                "error": { "code": -32602, "message": "nope" }
            })
        );
    }

    #[test]
    fn test_result_response_omits_error() {
        let response = JsonRpcResponse::result(Value::Null, json!({"ok": true}));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["id"], Value::Null);
        assert!(json.get("error").is_none());
        assert_eq!(json["result"]["ok"], true);
    }
}
