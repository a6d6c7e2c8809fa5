//! Route tests for `/api/chat`.

mod common;

use axum::http::{StatusCode, header};
use relay_core::{MessageRole, RelayError};
use serde_json::json;

use common::{MockChat, app, app_without_calls, post_json, request, send, send_json};

#[tokio::test]
async fn chat_relays_messages_and_wraps_reply() {
    let mut chat = MockChat::new();
    chat.expect_chat()
        .withf(|messages| {
            messages.len() == 2
                && messages[0].role == MessageRole::System
                && messages[1].role == MessageRole::User
                && messages[1].content == "Hi"
        })
        .times(1)
        .returning(|_| Ok("hello".to_string()));

    let body = r#"{"messages":[{"role":"system","content":"Be kind."},{"role":"user","content":"Hi"}]}"#;
    let (status, json) = send_json(app(chat), post_json("/api/chat", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({ "message": { "role": "assistant", "content": "hello" } })
    );
}

#[tokio::test]
async fn chat_rejects_empty_messages() {
    let (status, json) =
        send_json(app_without_calls(), post_json("/api/chat", r#"{"messages":[]}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, json!({ "error": "messages array is required" }));
}

#[tokio::test]
async fn chat_rejects_missing_messages() {
    let (status, json) =
        send_json(app_without_calls(), post_json("/api/chat", r#"{"prompt":"hi"}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "messages array is required");
}

#[tokio::test]
async fn chat_rejects_malformed_body() {
    let (status, json) = send_json(app_without_calls(), post_json("/api/chat", "{oops")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().starts_with("Invalid request body"));
}

#[tokio::test]
async fn chat_surfaces_upstream_failure_as_500() {
    let mut chat = MockChat::new();
    chat.expect_chat().times(1).returning(|_| {
        Err(RelayError::Upstream {
            status: 503,
            body: "overloaded".to_string(),
        })
    });

    let body = r#"{"messages":[{"role":"user","content":"Hi"}]}"#;
    let (status, json) = send_json(app(chat), post_json("/api/chat", body)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, json!({ "error": "LLM API error (503): overloaded" }));
}

#[tokio::test]
async fn chat_reports_missing_backend_url() {
    let mut chat = MockChat::new();
    chat.expect_chat().times(1).returning(|_| {
        Err(RelayError::Configuration(
            "LLM_API_URL is not configured".to_string(),
        ))
    });

    let body = r#"{"messages":[{"role":"user","content":"Hi"}]}"#;
    let (status, json) = send_json(app(chat), post_json("/api/chat", body)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "LLM_API_URL is not configured");
}

#[tokio::test]
async fn chat_get_is_method_not_allowed() {
    let (status, json) = send_json(app_without_calls(), request("GET", "/api/chat")).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json, json!({ "error": "Method not allowed" }));
}

#[tokio::test]
async fn chat_options_answers_preflight() {
    let (status, headers, _) = send(app_without_calls(), request("OPTIONS", "/api/chat")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert!(
        headers[header::ACCESS_CONTROL_ALLOW_METHODS]
            .to_str()
            .unwrap()
            .contains("POST")
    );
}

#[tokio::test]
async fn chat_browser_preflight_is_allowed() {
    let preflight = axum::http::Request::builder()
        .method("OPTIONS")
        .uri("/api/chat")
        .header(header::ORIGIN, "https://ui.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(axum::body::Body::empty())
        .unwrap();

    let (status, headers, _) = send(app_without_calls(), preflight).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}
