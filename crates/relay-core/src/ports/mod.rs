//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the HTTP adapter expects from the
//! upstream layer. They use only domain types.

pub mod chat;

pub use chat::ChatPort;
