//! Relay configuration.
//!
//! `RelayConfig` is built once at process start and shared read-only with the
//! router and handlers. Values come from environment-style key/value settings;
//! [`RelayConfig::from_lookup`] takes the lookup as a closure so parsing can be
//! exercised without touching the process environment.

use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tracing::warn;
use url::Url;

/// Model used when `LLM_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Sampling temperature used when `TEMPERATURE` is unset or invalid.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Output token limit used when `MAX_TOKENS` is unset or invalid.
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

/// Display name reported by the status endpoint when `AGENT_NAME` is unset.
pub const DEFAULT_AGENT_NAME: &str = "agent-relay";

/// Environment keys read by [`RelayConfig::from_env`].
pub mod keys {
    pub const API_URL: &str = "LLM_API_URL";
    pub const API_KEY: &str = "LLM_API_KEY";
    pub const MODEL: &str = "LLM_MODEL";
    pub const TEMPERATURE: &str = "TEMPERATURE";
    pub const MAX_TOKENS: &str = "MAX_TOKENS";
    pub const SYSTEM_PROMPT: &str = "SYSTEM_PROMPT";
    pub const AGENT_NAME: &str = "AGENT_NAME";
    pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
}

/// Process-wide relay configuration.
///
/// Optional fields are `None` when the corresponding setting is absent or
/// blank. The API key is redacted from the `Debug` output.
#[derive(Clone, PartialEq)]
pub struct RelayConfig {
    /// Base URL of the upstream LLM backend.
    pub api_url: Option<String>,
    /// Credential forwarded to the backend, if any.
    pub api_key: Option<String>,
    /// Model identifier; see [`RelayConfig::effective_model`].
    pub model: Option<String>,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Prepended as a system message to every conversation.
    pub system_prompt: Option<String>,
    /// Display name for the status endpoint.
    pub agent_name: Option<String>,
    /// Upper bound for one upstream round trip. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            model: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            system_prompt: None,
            agent_name: None,
            request_timeout: None,
        }
    }
}

impl RelayConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key/value lookup.
    ///
    /// Blank values count as unset. Numbers that fail to parse fall back to
    /// their defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_blank(lookup(key));

        let temperature = get(keys::TEMPERATURE)
            .and_then(|raw| match raw.trim().parse::<f64>() {
                Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
                _ => {
                    warn!(key = keys::TEMPERATURE, value = %raw, "Ignoring invalid setting");
                    None
                }
            })
            .unwrap_or(DEFAULT_TEMPERATURE);

        let max_tokens = get(keys::MAX_TOKENS)
            .and_then(|raw| match raw.trim().parse::<u32>() {
                Ok(value) if value > 0 => Some(value),
                _ => {
                    warn!(key = keys::MAX_TOKENS, value = %raw, "Ignoring invalid setting");
                    None
                }
            })
            .unwrap_or(DEFAULT_MAX_TOKENS);

        let request_timeout = get(keys::REQUEST_TIMEOUT_SECS).and_then(|raw| {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    warn!(
                        key = keys::REQUEST_TIMEOUT_SECS,
                        value = %raw,
                        "Ignoring invalid setting"
                    );
                    None
                }
            }
        });

        Self {
            api_url: get(keys::API_URL),
            api_key: get(keys::API_KEY),
            model: get(keys::MODEL),
            temperature,
            max_tokens,
            system_prompt: get(keys::SYSTEM_PROMPT),
            agent_name: get(keys::AGENT_NAME),
            request_timeout,
        }
    }

    /// Model identifier sent upstream (with default fallback).
    #[must_use]
    pub fn effective_model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Agent display name (with default fallback).
    #[must_use]
    pub fn effective_agent_name(&self) -> &str {
        self.agent_name.as_deref().unwrap_or(DEFAULT_AGENT_NAME)
    }

    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub const fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    #[must_use]
    pub fn with_agent_name(mut self, name: impl Into<String>) -> Self {
        self.agent_name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field(
                "api_url",
                &self.api_url.as_deref().map(redact_url_credentials),
            )
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("system_prompt", &self.system_prompt)
            .field("agent_name", &self.agent_name)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Mask the password in a URL's userinfo: `//user:pass@host` → `//user:***@host`.
///
/// Well-formed URLs are rewritten through [`Url`]. Anything the parser rejects
/// or reads without a password (a password containing `/`, `?` or `#` makes
/// the authority ambiguous) goes through the `//user:pass@` pattern instead,
/// which masks everything up to the first `@`.
pub fn redact_url_credentials(url: &str) -> String {
    if let Ok(mut parsed) = Url::parse(url) {
        if parsed.password().is_some() && parsed.set_password(Some("***")).is_ok() {
            return parsed.into();
        }
    }

    match USERINFO.as_ref() {
        Some(pattern) => pattern.replace(url, "//${user}:***@").into_owned(),
        None => url.to_string(),
    }
}

static USERINFO: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"//(?P<user>.+?):(?:.+?)@").ok());

/// Blank values count as unset; anything else is kept verbatim.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
