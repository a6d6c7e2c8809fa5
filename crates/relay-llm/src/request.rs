//! Provider-specific request builders and reply extractors.
//!
//! Each builder is a pure function from a message sequence and generation
//! parameters to a [`ProviderRequest`]. The request carries the extractor for
//! the matching reply schema, so sending and interpreting stay decoupled.

use std::fmt;

use relay_core::{Message, RelayConfig, RelayError, redact_url_credentials};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::{Value, json};

use crate::provider::Provider;

/// Version pinned in the `anthropic-version` header.
pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";

const X_API_KEY: HeaderName = HeaderName::from_static("x-api-key");
const ANTHROPIC_VERSION: HeaderName = HeaderName::from_static("anthropic-version");

/// Pulls the reply text out of a parsed backend response.
///
/// Returns an empty string when the expected field is absent.
pub type ReplyExtractor = fn(&Value) -> String;

/// Sampling parameters shared by every provider.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl GenerationParams {
    /// Resolve parameters from configuration, applying defaults.
    pub fn from_config(config: &RelayConfig) -> Self {
        Self {
            model: config.effective_model().to_string(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

/// A fully built outbound call. Always sent as `POST`.
#[derive(Clone)]
pub struct ProviderRequest {
    pub url: String,
    pub headers: HeaderMap,
    pub body: Value,
    extract: ReplyExtractor,
}

impl ProviderRequest {
    /// Apply this provider's extractor to a parsed response body.
    pub fn extract_reply(&self, data: &Value) -> String {
        (self.extract)(data)
    }

    /// Target URL with any userinfo password masked, for logs.
    pub fn redacted_url(&self) -> String {
        redact_url_credentials(&self.url)
    }
}

impl fmt::Debug for ProviderRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRequest")
            .field("url", &self.redacted_url())
            .field("headers", &self.headers)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

/// Build the request for `provider`.
pub fn build_request(
    provider: Provider,
    base_url: &str,
    messages: &[Message],
    params: &GenerationParams,
    api_key: Option<&str>,
) -> Result<ProviderRequest, RelayError> {
    match provider {
        Provider::Anthropic => build_anthropic_request(base_url, messages, params, api_key),
        Provider::Ollama => Ok(build_ollama_request(base_url, messages, params)),
        Provider::OpenAiCompatible => build_openai_request(base_url, messages, params, api_key),
    }
}

/// Anthropic Messages API.
///
/// System messages are lifted out of the sequence into the top-level `system`
/// field, joined by newlines.
pub fn build_anthropic_request(
    base_url: &str,
    messages: &[Message],
    params: &GenerationParams,
    api_key: Option<&str>,
) -> Result<ProviderRequest, RelayError> {
    let (system, conversation): (Vec<&Message>, Vec<&Message>) =
        messages.iter().partition(|m| m.is_system());

    let system_prompt = system
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let mut body = json!({
        "model": params.model,
        "max_tokens": params.max_tokens,
        "temperature": params.temperature,
        "messages": wire_messages(conversation),
    });
    if !system_prompt.is_empty() {
        body["system"] = Value::String(system_prompt);
    }

    let mut headers = json_headers();
    if let Some(key) = present(api_key) {
        headers.insert(X_API_KEY, secret_header(key)?);
    }
    headers.insert(
        ANTHROPIC_VERSION,
        HeaderValue::from_static(ANTHROPIC_API_VERSION),
    );

    Ok(ProviderRequest {
        url: endpoint(base_url, Provider::Anthropic),
        headers,
        body,
        extract: extract_anthropic_reply,
    })
}

/// Ollama native chat API. No authentication; streaming is always off.
pub fn build_ollama_request(
    base_url: &str,
    messages: &[Message],
    params: &GenerationParams,
) -> ProviderRequest {
    let body = json!({
        "model": params.model,
        "messages": wire_messages(messages),
        "stream": false,
        "options": {
            "temperature": params.temperature,
            "num_predict": params.max_tokens,
        },
    });

    ProviderRequest {
        url: endpoint(base_url, Provider::Ollama),
        headers: json_headers(),
        body,
        extract: extract_ollama_reply,
    }
}

/// OpenAI chat completions (and compatible backends).
///
/// The bearer token is only attached when a key is configured.
pub fn build_openai_request(
    base_url: &str,
    messages: &[Message],
    params: &GenerationParams,
    api_key: Option<&str>,
) -> Result<ProviderRequest, RelayError> {
    let body = json!({
        "model": params.model,
        "messages": wire_messages(messages),
        "temperature": params.temperature,
        "max_tokens": params.max_tokens,
    });

    let mut headers = json_headers();
    if let Some(key) = present(api_key) {
        headers.insert(AUTHORIZATION, secret_header(&format!("Bearer {key}"))?);
    }

    Ok(ProviderRequest {
        url: endpoint(base_url, Provider::OpenAiCompatible),
        headers,
        body,
        extract: extract_openai_reply,
    })
}

/// `content[0].text`
pub fn extract_anthropic_reply(data: &Value) -> String {
    text_at(&data["content"][0]["text"])
}

/// `message.content`
pub fn extract_ollama_reply(data: &Value) -> String {
    text_at(&data["message"]["content"])
}

/// `choices[0].message.content`
pub fn extract_openai_reply(data: &Value) -> String {
    text_at(&data["choices"][0]["message"]["content"])
}

fn text_at(value: &Value) -> String {
    value.as_str().unwrap_or_default().to_string()
}

fn wire_messages<'a>(messages: impl IntoIterator<Item = &'a Message>) -> Vec<Value> {
    messages
        .into_iter()
        .map(|m| json!({ "role": m.role.as_str(), "content": m.content }))
        .collect()
}

fn endpoint(base_url: &str, provider: Provider) -> String {
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    format!("{base}{}", provider.chat_path())
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

fn present(api_key: Option<&str>) -> Option<&str> {
    api_key.filter(|key| !key.is_empty())
}

fn secret_header(value: &str) -> Result<HeaderValue, RelayError> {
    let mut header = HeaderValue::from_str(value).map_err(|_| {
        RelayError::Configuration(
            "LLM_API_KEY contains characters that are not valid in an HTTP header".to_string(),
        )
    })?;
    header.set_sensitive(true);
    Ok(header)
}
