//! ElevenLabs Synthesizer - Implementation of SpeechSynthesizer over the ElevenLabs REST API.
//!
//! Fetches MP3 audio for the reply and hands it to an [`AudioPlayer`].
//! Cancellation is checked before the request, raced against the request,
//! and checked again before playback starts.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::ports::{AudioPlayer, SpeechError, SpeechSynthesizer};

/// Default API base URL.
pub const DEFAULT_ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io";

/// Synthesis model.
pub const ELEVENLABS_MODEL_ID: &str = "eleven_turbo_v2";

/// Requested audio encoding.
pub const ELEVENLABS_OUTPUT_FORMAT: &str = "mp3_44100_128";

/// Voice tuning sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    /// Calm, consistent delivery.
    fn default() -> Self {
        Self {
            stability: 0.80,
            similarity_boost: 0.88,
            style: 0.10,
            use_speaker_boost: false,
        }
    }
}

/// Configuration for the ElevenLabs synthesizer.
#[derive(Debug, Clone)]
pub struct ElevenLabsConfig {
    api_key: Option<Secret<String>>,
    /// Voice to synthesize with.
    pub voice_id: String,
    /// Base URL for the API.
    pub base_url: String,
    pub voice_settings: VoiceSettings,
    /// Request timeout.
    pub timeout: Duration,
}

impl ElevenLabsConfig {
    /// Creates a configuration. Blank keys count as missing.
    pub fn new(api_key: Option<Secret<String>>, voice_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.expose_secret().trim().is_empty()),
            voice_id: voice_id.into(),
            base_url: DEFAULT_ELEVENLABS_BASE_URL.to_string(),
            voice_settings: VoiceSettings::default(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|key| key.expose_secret().as_str())
    }
}

/// ElevenLabs-backed synthesizer.
pub struct ElevenLabsSynthesizer {
    config: ElevenLabsConfig,
    client: Client,
    player: Arc<dyn AudioPlayer>,
}

impl ElevenLabsSynthesizer {
    pub fn new(config: ElevenLabsConfig, player: Arc<dyn AudioPlayer>) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            config,
            client,
            player,
        }
    }

    fn speech_url(&self) -> String {
        format!(
            "{}/v1/text-to-speech/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.voice_id
        )
    }

    fn request_body<'a>(&self, text: &'a str) -> SpeechRequest<'a> {
        SpeechRequest {
            text,
            model_id: ELEVENLABS_MODEL_ID,
            voice_settings: self.config.voice_settings,
            output_format: ELEVENLABS_OUTPUT_FORMAT,
        }
    }

    async fn fetch_audio(&self, api_key: &str, text: &str) -> Result<Vec<u8>, SpeechError> {
        let response = self
            .client
            .post(self.speech_url())
            .header("Accept", "audio/mpeg")
            .header("Content-Type", "application/json")
            .header("xi-api-key", api_key)
            .json(&self.request_body(text))
            .send()
            .await
            .map_err(|e| SpeechError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpeechError::from_status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsSynthesizer {
    fn is_available(&self) -> bool {
        self.config.has_api_key() && !self.config.voice_id.trim().is_empty()
    }

    async fn speak(&self, text: &str, cancel: CancellationToken) -> Result<(), SpeechError> {
        let api_key = self.config.api_key().ok_or(SpeechError::NotConfigured)?;
        if self.config.voice_id.trim().is_empty() {
            return Err(SpeechError::NotConfigured);
        }
        if cancel.is_cancelled() {
            return Err(SpeechError::Cancelled);
        }

        debug!(
            voice_id = %self.config.voice_id,
            text_chars = text.chars().count(),
            "Requesting speech"
        );

        let audio = tokio::select! {
            _ = cancel.cancelled() => return Err(SpeechError::Cancelled),
            audio = self.fetch_audio(api_key, text) => audio?,
        };

        if cancel.is_cancelled() {
            return Err(SpeechError::Cancelled);
        }

        self.player.play(audio, cancel).await
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// ElevenLabs API Types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'static str,
    voice_settings: VoiceSettings,
    output_format: &'static str,
}
