//! Text generation configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

use super::error::ValidationError;
use super::is_http_url;
use crate::adapters::ai::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};

/// Text generation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Which generator answers the user
    #[serde(default)]
    pub provider: AiProvider,

    /// Google generative-language API key (redacted in `Debug`)
    pub gemini_api_key: Option<Secret<String>>,

    /// Gemini model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Gemini API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Chat relay base URL (`/chat` is appended)
    #[serde(default = "default_relay_url")]
    pub relay_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Text generator type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Gemini,
    Relay,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a non-blank Gemini key is present
    pub fn has_gemini_key(&self) -> bool {
        self.gemini_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Validate text generation configuration
    ///
    /// A missing Gemini key is allowed; every turn then falls back.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }

        match self.provider {
            AiProvider::Gemini => {
                if !is_http_url(&self.base_url) {
                    return Err(ValidationError::InvalidUrl("ai.base_url"));
                }
                if self.model.trim().is_empty() {
                    return Err(ValidationError::MissingRequired("ai.model"));
                }
                if !self.has_gemini_key() {
                    warn!("No Gemini API key configured; replies will use fallbacks");
                }
            }
            AiProvider::Relay => {
                if !is_http_url(&self.relay_url) {
                    return Err(ValidationError::InvalidUrl("ai.relay_url"));
                }
            }
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::default(),
            gemini_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            relay_url: default_relay_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}

fn default_relay_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.provider, AiProvider::Gemini);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.model, "gemini-2.0-flash-lite-001");
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 60,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_blank_key_is_not_a_key() {
        let config = AiConfig {
            gemini_api_key: Some(Secret::new("   ".to_string())),
            ..Default::default()
        };
        assert!(!config.has_gemini_key());
    }

    #[test]
    fn test_debug_output_redacts_key() {
        let config = AiConfig {
            gemini_api_key: Some(Secret::new("AIza-very-secret".to_string())),
            ..Default::default()
        };
        assert!(config.has_gemini_key());
        assert!(!format!("{:?}", config).contains("AIza-very-secret"));
    }

    #[test]
    fn test_missing_gemini_key_still_validates() {
        assert!(AiConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_bad_timeout() {
        let config = AiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validation_relay_url() {
        let config = AiConfig {
            provider: AiProvider::Relay,
            relay_url: "localhost:8000".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidUrl("ai.relay_url"))
        );
    }

    #[test]
    fn test_relay_ignores_gemini_settings() {
        let config = AiConfig {
            provider: AiProvider::Relay,
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
