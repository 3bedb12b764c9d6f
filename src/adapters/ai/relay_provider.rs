//! Chat Relay Provider - Forwards prompts to a small relay service.
//!
//! The relay holds the model credential server-side and exposes one
//! endpoint:
//!
//! ```text
//! POST {relay_url}/chat   {"message": "<prompt>"}
//!   -> {"response": "<reply>"}  or  {"error": "<details>"}
//! ```
//!
//! A body with neither field yields [`NO_RESPONSE_REPLY`].

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::ports::{
    GenerationError, GenerationRequest, GenerationResponse, ProviderInfo, TextGenerator,
};

/// Reply used when the relay returns no text.
pub const NO_RESPONSE_REPLY: &str = "Sorry, no response.";

/// Configuration for the relay provider.
#[derive(Debug, Clone)]
pub struct ChatRelayConfig {
    /// Relay base URL, e.g. `http://localhost:8000`.
    pub relay_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl ChatRelayConfig {
    pub fn new(relay_url: impl Into<String>) -> Self {
        Self {
            relay_url: relay_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Relay-backed text generator.
pub struct ChatRelayProvider {
    config: ChatRelayConfig,
    client: Client,
}

impl ChatRelayProvider {
    pub fn new(config: ChatRelayConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { config, client }
    }

    fn chat_url(&self) -> String {
        format!("{}/chat", self.config.relay_url.trim_end_matches('/'))
    }
}

/// Interprets a relay body.
fn interpret(body: RelayResponse) -> Result<String, GenerationError> {
    match (body.response, body.error) {
        (Some(text), _) if !text.is_empty() => Ok(text),
        (_, Some(error)) => Err(GenerationError::Relay(error)),
        _ => Ok(NO_RESPONSE_REPLY.to_string()),
    }
}

#[async_trait]
impl TextGenerator for ChatRelayProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, GenerationError> {
        debug!(
            session_id = %request.session_id,
            prompt_chars = request.prompt.chars().count(),
            "Sending relay request"
        );

        let response = self
            .client
            .post(self.chat_url())
            .json(&RelayRequest {
                message: &request.prompt,
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else {
                    GenerationError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                429 => GenerationError::RateLimited,
                500..=599 => GenerationError::unavailable(format!("Relay error {}", status)),
                _ => GenerationError::InvalidRequest(error_body),
            });
        }

        let body: RelayResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::parse(format!("Failed to parse relay response: {}", e)))?;

        Ok(GenerationResponse::new(interpret(body)?, "relay"))
    }

    fn is_configured(&self) -> bool {
        !self.config.relay_url.trim().is_empty()
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("relay", self.chat_url())
    }
}

#[derive(Debug, Serialize)]
struct RelayRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct RelayResponse {
    response: Option<String>,
    error: Option<String>,
}
