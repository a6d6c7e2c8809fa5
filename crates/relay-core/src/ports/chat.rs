//! Chat port.
//!
//! The single seam between endpoint handlers and the LLM router. Handlers
//! hold an `Arc<dyn ChatPort>`, which lets tests substitute a mock.

use async_trait::async_trait;

use crate::domain::Message;
use crate::error::RelayError;

/// Relay a conversation to a backend and return the reply text.
#[async_trait]
pub trait ChatPort: Send + Sync {
    /// Send `messages` (in conversation order) and return the assistant's
    /// reply. A reply with no text content resolves to an empty string.
    async fn chat(&self, messages: Vec<Message>) -> Result<String, RelayError>;
}
