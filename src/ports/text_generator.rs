//! Text Generator Port - Interface for the reply-generating language model.
//!
//! The conversation layer builds a single prompt per turn and hands it to
//! a generator. Generators are opaque request/response services: no
//! streaming, no tool calls.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct Echo;
//!
//! #[async_trait]
//! impl TextGenerator for Echo {
//!     async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, GenerationError> {
//!         Ok(GenerationResponse::new(request.prompt, "echo"))
//!     }
//!     fn is_configured(&self) -> bool { true }
//!     fn provider_info(&self) -> ProviderInfo { ProviderInfo::new("echo", "echo") }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::SessionId;

/// Port for reply generation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates a reply for the prompt.
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, GenerationError>;

    /// Returns false when a required credential is missing.
    ///
    /// An unconfigured generator still accepts calls; they fail with
    /// [`GenerationError::MissingCredential`].
    fn is_configured(&self) -> bool;

    /// Get provider information (name, model).
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for one reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Fully assembled prompt text.
    pub prompt: String,
    /// Session the turn belongs to, for tracing.
    pub session_id: SessionId,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, session_id: SessionId) -> Self {
        Self {
            prompt: prompt.into(),
            session_id,
        }
    }
}

/// Reply from the generator, before sanitization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResponse {
    /// Raw reply text.
    pub content: String,
    /// Model that produced the reply.
    pub model: String,
}

impl GenerationResponse {
    pub fn new(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            model: model.into(),
        }
    }
}

/// Provider information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "gemini", "relay").
    pub name: String,
    /// Model identifier, or the endpoint for relays.
    pub model: String,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Text generation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// No API key configured.
    #[error("missing credential: {0}")]
    MissingCredential(String),

    /// API key rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Rate limited by provider.
    #[error("rate limited")]
    RateLimited,

    /// Provider returned a server error.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Provider rejected the request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The relay answered with an explicit error.
    #[error("relay error: {0}")]
    Relay(String),
}

impl GenerationError {
    /// Creates a missing credential error.
    pub fn missing_credential(name: impl Into<String>) -> Self {
        Self::MissingCredential(name.into())
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if sending the same message again may succeed.
    ///
    /// The conversation never retries by itself; this only shapes logging.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::Unavailable { .. } | Self::Network(_) | Self::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_prompt_and_session() {
        let session_id = SessionId::new();
        let request = GenerationRequest::new("Hello", session_id);
        assert_eq!(request.prompt, "Hello");
        assert_eq!(request.session_id, session_id);
    }

    #[test]
    fn provider_info_holds_name_and_model() {
        let info = ProviderInfo::new("gemini", "gemini-2.0-flash-lite-001");
        assert_eq!(info.name, "gemini");
        assert_eq!(info.model, "gemini-2.0-flash-lite-001");
    }

    #[test]
    fn error_constructors_work() {
        assert!(matches!(
            GenerationError::missing_credential("GEMINI_API_KEY"),
            GenerationError::MissingCredential(_)
        ));
        assert!(matches!(
            GenerationError::unavailable("503"),
            GenerationError::Unavailable { .. }
        ));
    }

    #[test]
    fn transient_classification() {
        assert!(GenerationError::RateLimited.is_transient());
        assert!(GenerationError::network("reset").is_transient());
        assert!(GenerationError::Timeout { timeout_secs: 30 }.is_transient());

        assert!(!GenerationError::AuthenticationFailed.is_transient());
        assert!(!GenerationError::missing_credential("key").is_transient());
        assert!(!GenerationError::Relay("bad".into()).is_transient());
    }

    #[test]
    fn errors_display_without_secrets() {
        let err = GenerationError::missing_credential("gemini_api_key");
        assert_eq!(err.to_string(), "missing credential: gemini_api_key");
    }
}
