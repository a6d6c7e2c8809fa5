//! Generic chat DTOs.

use relay_core::{Message, MessageRole};
use serde::Serialize;

/// Response body for `POST /api/chat`: `{ "message": { role, content } }`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub message: Message,
}

impl ChatResponse {
    /// Wrap reply text as an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            message: Message::new(MessageRole::Assistant, content),
        }
    }
}
