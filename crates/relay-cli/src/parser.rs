//! Command-line arguments.

use clap::Parser;
use relay_axum::ServerConfig;

/// HTTP relay in front of an LLM backend (Anthropic, Ollama or OpenAI-compatible).
///
/// Backend settings (`LLM_API_URL`, `LLM_API_KEY`, `LLM_MODEL`, ...) are read
/// from the environment or a `.env` file.
#[derive(Debug, Parser)]
#[command(name = "agent-relay")]
#[command(version, about)]
pub struct Cli {
    /// Interface to listen on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Restrict CORS to these origins (comma-separated); all origins when omitted
    #[arg(long = "allowed-origins", env = "CORS_ALLOWED_ORIGINS", value_delimiter = ',')]
    pub allowed_origins: Vec<String>,
}

impl Cli {
    /// Server settings for [`relay_axum::start_server`].
    pub fn server_config(&self) -> ServerConfig {
        let config = ServerConfig {
            host: self.host.clone(),
            port: self.port,
            ..ServerConfig::default()
        };

        let origins: Vec<String> = self
            .allowed_origins
            .iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        if origins.is_empty() {
            config
        } else {
            config.with_allowed_origins(origins)
        }
    }
}
