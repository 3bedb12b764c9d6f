//! Voice input and output configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::is_http_url;
use crate::adapters::voice::{DEFAULT_ELEVENLABS_BASE_URL, DEFAULT_PLAYER_COMMAND};
use crate::application::InputMode;

/// Voice configuration
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceConfig {
    /// ElevenLabs API key (redacted in `Debug`)
    pub elevenlabs_api_key: Option<Secret<String>>,

    /// ElevenLabs voice to speak with
    #[serde(default)]
    pub voice_id: String,

    /// ElevenLabs API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Command that plays MP3 audio from stdin
    #[serde(default = "default_player_command")]
    pub player_command: String,

    /// Input mode of a new session
    #[serde(default)]
    pub default_mode: InputMode,

    /// Quiet period that ends a spoken utterance, in milliseconds
    #[serde(default = "default_silence_timeout")]
    pub silence_timeout_ms: u64,
}

impl VoiceConfig {
    pub fn silence_timeout(&self) -> Duration {
        Duration::from_millis(self.silence_timeout_ms)
    }

    /// Check if speech output can work at all
    pub fn has_speech_output(&self) -> bool {
        self.elevenlabs_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
            && !self.voice_id.trim().is_empty()
    }

    /// Validate voice configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_http_url(&self.base_url) {
            return Err(ValidationError::InvalidUrl("voice.base_url"));
        }
        if self.player_command.trim().is_empty() {
            return Err(ValidationError::EmptyPlayerCommand);
        }
        if self.silence_timeout_ms < 100 || self.silence_timeout_ms > 30_000 {
            return Err(ValidationError::InvalidSilenceTimeout);
        }
        Ok(())
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            elevenlabs_api_key: None,
            voice_id: String::new(),
            base_url: default_base_url(),
            player_command: default_player_command(),
            default_mode: InputMode::default(),
            silence_timeout_ms: default_silence_timeout(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_ELEVENLABS_BASE_URL.to_string()
}

fn default_player_command() -> String {
    DEFAULT_PLAYER_COMMAND.to_string()
}

fn default_silence_timeout() -> u64 {
    2000
}
