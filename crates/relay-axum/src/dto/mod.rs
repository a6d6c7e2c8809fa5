//! Data Transfer Objects (DTOs) for HTTP API contract.
//!
//! These types define the response shapes callers depend on. They decouple
//! the domain types in `relay-core` from the external representation.

pub mod a2a;
pub mod chat;
pub mod status;

pub use a2a::{AgentMessage, SendMessageResult, TextPart};
pub use chat::ChatResponse;
pub use status::{ConfigSnapshot, StatusData, StatusResponse};
