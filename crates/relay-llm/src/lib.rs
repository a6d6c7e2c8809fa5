#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

pub mod provider;
pub mod request;
pub mod router;

pub use provider::Provider;
pub use request::{GenerationParams, ProviderRequest, build_request};
pub use router::LlmRouter;
