#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod error;
pub mod ports;

// Re-export commonly used types for convenience
pub use config::{
    DEFAULT_AGENT_NAME, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, RelayConfig,
    redact_url_credentials,
};
pub use domain::{Message, MessageRole};
pub use error::RelayError;
pub use ports::ChatPort;
