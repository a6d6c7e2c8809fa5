//! Library half of the `agent-relay` binary: argument parsing and process
//! plumbing kept out of `main.rs` so it can be unit tested.

#![deny(unused_crate_dependencies)]

// Used by the binary target only
use anyhow as _;
use dotenvy as _;
use relay_core as _;
use tracing_subscriber as _;

pub mod parser;
pub mod signal;

pub use parser::Cli;
pub use signal::shutdown_signal;
