//! Relay error types.
//!
//! `RelayError` is returned by every [`ChatPort`](crate::ports::ChatPort)
//! implementation. Adapters map it onto their own envelopes (plain JSON
//! errors, JSON-RPC error objects).

use thiserror::Error;

/// Errors that can occur while relaying a chat to an upstream backend.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Required configuration is missing (e.g. no backend URL).
    #[error("{0}")]
    Configuration(String),

    /// The caller's payload was rejected before any network call.
    #[error("{0}")]
    Validation(String),

    /// The backend answered with a non-success status.
    /// `body` is the raw response text, kept verbatim for diagnostics.
    #[error("LLM API error ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// The backend could not be reached or the call timed out.
    #[error("LLM request failed: {0}")]
    Transport(String),

    /// The backend answered with a success status but an unparseable body.
    #[error("Invalid LLM response: {0}")]
    InvalidResponse(String),
}

impl RelayError {
    /// Returns true if the failure was caused by the caller's input.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns a suggested HTTP status code for this error.
    #[must_use]
    pub const fn suggested_status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Configuration(_)
            | Self::Upstream { .. }
            | Self::Transport(_)
            | Self::InvalidResponse(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_message_carries_status_and_body() {
        let err = RelayError::Upstream {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "LLM API error (500): boom");
        assert_eq!(err.suggested_status_code(), 500);
    }

    #[test]
    fn test_configuration_message_is_verbatim() {
        let err = RelayError::Configuration("LLM_API_URL is not configured".to_string());
        assert_eq!(err.to_string(), "LLM_API_URL is not configured");
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_validation_is_client_error() {
        let err = RelayError::Validation("bad".to_string());
        assert!(err.is_client_error());
        assert_eq!(err.suggested_status_code(), 400);
    }
}
