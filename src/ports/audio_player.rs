//! Audio Player Port - Plays encoded audio produced by a synthesizer.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::SpeechError;

/// Port for playing a complete audio clip.
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Plays `audio` (MP3) and returns when playback finishes.
    ///
    /// Stops early and returns `Err(SpeechError::Cancelled)` when `cancel` fires.
    async fn play(&self, audio: Vec<u8>, cancel: CancellationToken) -> Result<(), SpeechError>;
}
