//! Core domain types.
//!
//! These types represent the chat exchange independent of any transport
//! (HTTP server, upstream client) concerns.

pub mod chat;

pub use chat::{Message, MessageRole};
