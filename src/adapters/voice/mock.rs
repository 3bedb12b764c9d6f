//! Mock voice adapters for testing.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::ports::{
    AudioPlayer, RecognitionError, RecognitionEvent, RecognitionStream, SpeechError,
    SpeechRecognizer, SpeechSynthesizer,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ════════════════════════════════════════════════════════════════════════════════
// Synthesizer
// ════════════════════════════════════════════════════════════════════════════════

/// Records spoken texts; optionally slow or failing.
#[derive(Debug, Clone)]
pub struct MockSpeechSynthesizer {
    available: bool,
    duration: Duration,
    failure: Option<SpeechError>,
    spoken: Arc<Mutex<Vec<String>>>,
    completed: Arc<Mutex<Vec<String>>>,
    cancelled: Arc<Mutex<Vec<String>>>,
}

impl Default for MockSpeechSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSpeechSynthesizer {
    pub fn new() -> Self {
        Self {
            available: true,
            duration: Duration::ZERO,
            failure: None,
            spoken: Arc::new(Mutex::new(Vec::new())),
            completed: Arc::new(Mutex::new(Vec::new())),
            cancelled: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Simulates playback lasting `duration`.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Fails every call with `error`.
    pub fn failing(mut self, error: SpeechError) -> Self {
        self.failure = Some(error);
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Texts passed to `speak`, in order.
    pub fn spoken(&self) -> Vec<String> {
        lock(&self.spoken).clone()
    }

    /// Texts whose playback ran to the end.
    pub fn completed(&self) -> Vec<String> {
        lock(&self.completed).clone()
    }

    /// Texts whose playback was cancelled.
    pub fn cancelled(&self) -> Vec<String> {
        lock(&self.cancelled).clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSpeechSynthesizer {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn speak(&self, text: &str, cancel: CancellationToken) -> Result<(), SpeechError> {
        lock(&self.spoken).push(text.to_string());

        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        tokio::select! {
            _ = cancel.cancelled() => {
                lock(&self.cancelled).push(text.to_string());
                Err(SpeechError::Cancelled)
            }
            _ = sleep(self.duration) => {
                lock(&self.completed).push(text.to_string());
                Ok(())
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Audio player
// ════════════════════════════════════════════════════════════════════════════════

/// Records clips instead of playing them.
#[derive(Debug, Clone, Default)]
pub struct MockAudioPlayer {
    played: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MockAudioPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play_count(&self) -> usize {
        lock(&self.played).len()
    }

    pub fn played(&self) -> Vec<Vec<u8>> {
        lock(&self.played).clone()
    }
}

#[async_trait]
impl AudioPlayer for MockAudioPlayer {
    async fn play(&self, audio: Vec<u8>, cancel: CancellationToken) -> Result<(), SpeechError> {
        if cancel.is_cancelled() {
            return Err(SpeechError::Cancelled);
        }
        lock(&self.played).push(audio);
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Recognizer
// ════════════════════════════════════════════════════════════════════════════════

/// Replays a script of `(delay, event)` pairs each time it listens.
#[derive(Debug, Clone, Default)]
pub struct MockSpeechRecognizer {
    script: Vec<(Duration, RecognitionEvent)>,
    unsupported: bool,
}

impl MockSpeechRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `event` after waiting `delay`.
    pub fn then(mut self, delay: Duration, event: RecognitionEvent) -> Self {
        self.script.push((delay, event));
        self
    }

    /// Emits a final segment immediately.
    pub fn says(self, text: impl Into<String>) -> Self {
        self.then(
            Duration::ZERO,
            RecognitionEvent::Segment {
                text: text.into(),
                is_final: true,
            },
        )
    }

    /// Behaves as a platform without recognition.
    pub fn unsupported(mut self) -> Self {
        self.unsupported = true;
        self
    }
}

impl SpeechRecognizer for MockSpeechRecognizer {
    fn is_available(&self) -> bool {
        !self.unsupported
    }

    fn listen(&self) -> Result<RecognitionStream, RecognitionError> {
        if self.unsupported {
            return Err(RecognitionError::NotSupported);
        }
        let events = stream::iter(self.script.clone()).then(|(delay, event)| async move {
            if !delay.is_zero() {
                sleep(delay).await;
            }
            event
        });
        Ok(Box::pin(events))
    }
}
