//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `WELLNESS_COMPANION` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use wellness_companion::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Generating replies with {:?}", config.ai.provider);
//! ```

mod ai;
mod error;
mod logging;
mod voice;

pub use ai::{AiConfig, AiProvider};
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use voice::VoiceConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment loads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Text generation (Gemini or chat relay)
    #[serde(default)]
    pub ai: AiConfig,

    /// Speech output and voice input
    #[serde(default)]
    pub voice: VoiceConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `WELLNESS_COMPANION` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `WELLNESS_COMPANION__AI__PROVIDER=relay` -> `ai.provider = relay`
    /// - `WELLNESS_COMPANION__VOICE__VOICE_ID=...` -> `voice.voice_id = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("WELLNESS_COMPANION")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for malformed URLs, out-of-range timeouts,
    /// an empty player command or an unparsable log filter.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.voice.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Loose URL check shared by the sections.
pub(crate) fn is_http_url(url: &str) -> bool {
    let url = url.trim();
    (url.starts_with("http://") || url.starts_with("https://"))
        && url.split("://").nth(1).is_some_and(|rest| !rest.is_empty())
}
