//! Agent protocol (A2A) DTOs.

use relay_core::MessageRole;
use serde::Serialize;
use serde_json::Value;

/// JSON-RPC method served by the agent endpoint.
pub const MESSAGE_SEND: &str = "message/send";

/// A text part of an agent message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextPart {
    pub text: String,
}

/// An agent-protocol message.
#[derive(Debug, Clone, Serialize)]
pub struct AgentMessage {
    pub role: MessageRole,
    pub parts: Vec<TextPart>,
}

impl AgentMessage {
    /// A single-part reply from this agent.
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Agent,
            parts: vec![TextPart { text: text.into() }],
        }
    }
}

/// `result` member of a successful `message/send` response.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageResult {
    pub message: AgentMessage,
}

/// Join the text of every part in `params.message.parts` with newlines.
///
/// Parts without a string `text` member (files, data, ...) are skipped.
pub fn collect_text(params: &Value) -> String {
    params
        .pointer("/message/parts")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
}
