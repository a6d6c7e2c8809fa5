//! `agent-relay` entry point - the composition root.
//!
//! Loads `.env`, installs logging, reads the relay configuration once and
//! serves until Ctrl-C.

use clap::Parser;
use relay_cli::{Cli, shutdown_signal};
use relay_core::RelayConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before anything reads them
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    let cli = Cli::parse();
    let config = RelayConfig::from_env();

    let ctx = relay_axum::bootstrap(config)?;
    relay_axum::start_server(cli.server_config(), ctx, shutdown_signal()).await
}
