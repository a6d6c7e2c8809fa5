//! LLM router - the [`ChatPort`] implementation backed by raw HTTP.
//!
//! The router is built once from [`RelayConfig`]. The provider is detected
//! at construction time; each chat is exactly one outbound round trip with no
//! retries.

use async_trait::async_trait;
use relay_core::{ChatPort, Message, RelayConfig, RelayError};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::provider::Provider;
use crate::request::{GenerationParams, ProviderRequest, build_request};

/// Backend selected at construction time.
#[derive(Debug, Clone)]
struct Upstream {
    base_url: String,
    provider: Provider,
}

/// Routes chats to the configured backend and normalizes its reply.
#[derive(Clone)]
pub struct LlmRouter {
    client: Client,
    /// `None` when no backend URL is configured; every chat then fails.
    upstream: Option<Upstream>,
    api_key: Option<String>,
    params: GenerationParams,
    system_prompt: Option<String>,
}

impl LlmRouter {
    /// Create a router with its own HTTP client.
    ///
    /// The configured request timeout, if any, is applied to the client.
    pub fn new(config: &RelayConfig) -> Result<Self, RelayError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            RelayError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;
        Ok(Self::with_client(config, client))
    }

    /// Create a router that sends through an existing client.
    pub fn with_client(config: &RelayConfig, client: Client) -> Self {
        let upstream = config.api_url.as_ref().map(|url| Upstream {
            base_url: url.clone(),
            provider: Provider::detect(url),
        });

        Self {
            client,
            upstream,
            api_key: config.api_key.clone(),
            params: GenerationParams::from_config(config),
            system_prompt: config.system_prompt.clone(),
        }
    }

    /// The detected provider, or `None` when no backend is configured.
    pub fn provider(&self) -> Option<Provider> {
        self.upstream.as_ref().map(|u| u.provider)
    }

    /// Build the outbound request for a conversation without sending it.
    pub fn prepare(&self, messages: Vec<Message>) -> Result<ProviderRequest, RelayError> {
        let upstream = self.upstream.as_ref().ok_or_else(|| {
            RelayError::Configuration("LLM_API_URL is not configured".to_string())
        })?;

        let conversation = self.with_system_prompt(messages);
        build_request(
            upstream.provider,
            &upstream.base_url,
            &conversation,
            &self.params,
            self.api_key.as_deref(),
        )
    }

    fn with_system_prompt(&self, messages: Vec<Message>) -> Vec<Message> {
        match &self.system_prompt {
            Some(prompt) => {
                let mut conversation = Vec::with_capacity(messages.len() + 1);
                conversation.push(Message::system(prompt.clone()));
                conversation.extend(messages);
                conversation
            }
            None => messages,
        }
    }
}

#[async_trait]
impl ChatPort for LlmRouter {
    async fn chat(&self, messages: Vec<Message>) -> Result<String, RelayError> {
        let request = self.prepare(messages)?;
        let provider = self.provider().map_or("none", |p| p.as_str());

        debug!(
            provider = %provider,
            url = %request.redacted_url(),
            model = %self.params.model,
            "Forwarding chat to upstream"
        );

        let response = self
            .client
            .post(&request.url)
            .headers(request.headers.clone())
            .json(&request.body)
            .send()
            .await
            .map_err(|e| {
                error!(provider = %provider, "Failed to reach upstream: {e}");
                RelayError::Transport(e.to_string())
            })?;

        let status = response.status();

        // Errors carry the raw body through for diagnostics
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                warn!(provider = %provider, "Failed to read upstream error body: {e}");
                String::new()
            });
            warn!(
                provider = %provider,
                status = status.as_u16(),
                "Upstream returned an error status"
            );
            return Err(RelayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let data: Value = response.json().await.map_err(|e| {
            error!(provider = %provider, "Failed to parse upstream response: {e}");
            RelayError::InvalidResponse(e.to_string())
        })?;

        let reply = request.extract_reply(&data);
        if reply.is_empty() {
            debug!(provider = %provider, "Upstream reply carried no text content");
        }
        Ok(reply)
    }
}
