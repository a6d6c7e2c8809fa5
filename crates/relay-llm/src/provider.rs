//! Backend provider detection.
//!
//! The provider is derived from the backend base URL once, when the router is
//! built, and carried as a closed enum from then on.

use std::fmt;

/// Host:port pairs a default local Ollama install listens on.
const OLLAMA_DEFAULT_HOSTS: &[&str] = &["localhost:11434", "127.0.0.1:11434"];

/// The wire format spoken by an upstream backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// Anthropic Messages API.
    Anthropic,
    /// Ollama native chat API.
    Ollama,
    /// OpenAI chat completions, or any backend speaking the same schema
    /// (Together, Mistral, Groq, vLLM, LM Studio, ...).
    OpenAiCompatible,
}

impl Provider {
    /// Classify a backend base URL.
    ///
    /// Case-insensitive substring match, first hit wins:
    /// 1. `anthropic` → [`Provider::Anthropic`]
    /// 2. `ollama` or a default local Ollama host:port → [`Provider::Ollama`]
    /// 3. anything else → [`Provider::OpenAiCompatible`]
    #[must_use]
    pub fn detect(url: &str) -> Self {
        let lower = url.to_lowercase();
        if lower.contains("anthropic") {
            Self::Anthropic
        } else if lower.contains("ollama")
            || OLLAMA_DEFAULT_HOSTS.iter().any(|host| lower.contains(host))
        {
            Self::Ollama
        } else {
            Self::OpenAiCompatible
        }
    }

    /// Stable tag for logs and diagnostics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::Ollama => "ollama",
            Self::OpenAiCompatible => "openai-compatible",
        }
    }

    /// Chat endpoint path appended to the backend base URL.
    #[must_use]
    pub const fn chat_path(&self) -> &'static str {
        match self {
            Self::Anthropic => "/v1/messages",
            Self::Ollama => "/api/chat",
            Self::OpenAiCompatible => "/v1/chat/completions",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
