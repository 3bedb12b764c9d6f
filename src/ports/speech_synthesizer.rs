//! Speech Synthesizer Port - Speaks assistant replies aloud.
//!
//! Synthesis is best effort: the conversation continues in text form when
//! it fails. Every call takes a cancellation token so a newer utterance or
//! an explicit stop can silence the current one.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Port for text-to-speech.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Returns true when synthesis can be attempted (credential present).
    fn is_available(&self) -> bool;

    /// Synthesizes and plays `text`, returning when playback ends.
    ///
    /// Returns `Err(SpeechError::Cancelled)` if `cancel` fires first.
    async fn speak(&self, text: &str, cancel: CancellationToken) -> Result<(), SpeechError>;
}

/// Speech synthesis errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    #[error("speech synthesis not configured")]
    NotConfigured,

    #[error("invalid speech API key")]
    InvalidApiKey,

    #[error("speech API access forbidden")]
    Forbidden,

    #[error("speech API rate limit exceeded")]
    RateLimited,

    #[error("speech service error: {status}")]
    Server {
        /// HTTP status returned by the service.
        status: u16,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("playback failed: {0}")]
    Playback(String),

    #[error("playback cancelled")]
    Cancelled,
}

impl SpeechError {
    /// Maps a non-success HTTP status to an error.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::InvalidApiKey,
            403 => Self::Forbidden,
            429 => Self::RateLimited,
            other => Self::Server { status: other },
        }
    }

    /// Returns true for the error produced by a deliberate stop.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
