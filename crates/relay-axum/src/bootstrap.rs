//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where the relay is wired together for the
//! Axum web adapter. The concrete [`LlmRouter`] is instantiated here and
//! handed to handlers as a [`ChatPort`] trait object.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use relay_core::{ChatPort, RelayConfig, redact_url_credentials};
use relay_llm::LlmRouter;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins.
    #[default]
    AllowAll,
    /// Allow specific origins.
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port for the HTTP server.
    pub port: u16,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }

    /// Resolve the bind address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// Relay configuration, read once at startup.
    pub config: Arc<RelayConfig>,
    /// Chat backend handlers delegate to.
    pub chat: Arc<dyn ChatPort>,
}

impl AxumContext {
    pub fn new(config: RelayConfig, chat: Arc<dyn ChatPort>) -> Self {
        Self {
            config: Arc::new(config),
            chat,
        }
    }
}

/// Build the context: construct the LLM router and log what it will talk to.
pub fn bootstrap(config: RelayConfig) -> Result<AxumContext> {
    let router = LlmRouter::new(&config).context("Failed to build LLM router")?;

    match (router.provider(), config.api_url.as_deref()) {
        (Some(provider), Some(url)) => info!(
            target: "relay.bootstrap",
            provider = %provider,
            llm_url = %redact_url_credentials(url),
            model = %config.effective_model(),
            "LLM backend configured"
        ),
        _ => warn!(
            target: "relay.bootstrap",
            "LLM_API_URL is not set; chat requests will fail until it is configured"
        ),
    }

    Ok(AxumContext::new(config, Arc::new(router)))
}

/// Serve the relay until `shutdown` resolves.
pub async fn start_server<F>(config: ServerConfig, ctx: AxumContext, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.socket_addr()?;
    let app = crate::routes::create_router(ctx, &config.cors);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("agent relay listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("agent relay stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::DEFAULT_AGENT_NAME;

    #[test]
    fn test_server_config_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:3000");
        assert!(matches!(config.cors, CorsConfig::AllowAll));
    }

    #[test]
    fn test_invalid_host_is_an_error() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_bootstrap_without_backend_url() {
        let ctx = bootstrap(RelayConfig::default()).unwrap();
        assert!(ctx.config.api_url.is_none());
        assert_eq!(ctx.config.effective_agent_name(), DEFAULT_AGENT_NAME);
    }
}
