//! Utterance accumulation.
//!
//! Recognition engines deliver speech in pieces and pause detection is
//! unreliable, so final segments are joined until the user has been quiet
//! for the silence timeout or the engine stops. Interim segments only
//! restart the silence timer.
//!
//! Used by `ChatSession::handle_voice_input` with whatever
//! [`SpeechRecognizer`](crate::ports::SpeechRecognizer) the embedder supplies.

use futures::StreamExt;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use crate::ports::{RecognitionEvent, RecognitionStream};

/// Default quiet period that ends an utterance.
pub const DEFAULT_SILENCE_TIMEOUT: Duration = Duration::from_millis(2000);

/// Result of one listening session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UtteranceOutcome {
    /// The user said something.
    Transcript(String),
    /// Listening ended without any final text.
    Silence,
    /// Recognition failed; show this to the user.
    Advisory(String),
}

/// Joins recognition events into a single utterance.
#[derive(Debug, Clone)]
pub struct UtteranceAccumulator {
    silence_timeout: Duration,
}

impl Default for UtteranceAccumulator {
    fn default() -> Self {
        Self::new(DEFAULT_SILENCE_TIMEOUT)
    }
}

impl UtteranceAccumulator {
    pub fn new(silence_timeout: Duration) -> Self {
        Self { silence_timeout }
    }

    pub fn silence_timeout(&self) -> Duration {
        self.silence_timeout
    }

    /// Consumes events until the utterance is complete.
    pub async fn collect(&self, mut events: RecognitionStream) -> UtteranceOutcome {
        let mut accumulated = String::new();
        let mut deadline: Option<Instant> = None;

        loop {
            let event = match deadline {
                Some(at) => tokio::select! {
                    event = events.next() => event,
                    _ = sleep_until(at) => {
                        debug!("Silence timeout reached");
                        break;
                    }
                },
                None => events.next().await,
            };

            let Some(event) = event else {
                break;
            };

            match event {
                RecognitionEvent::Started => {
                    accumulated.clear();
                    deadline = None;
                }
                RecognitionEvent::Segment { text, is_final } => {
                    if is_final && !text.trim().is_empty() {
                        accumulated.push_str(&text);
                        accumulated.push(' ');
                    }
                    deadline = Some(Instant::now() + self.silence_timeout);
                }
                RecognitionEvent::SpeechStarted => deadline = None,
                RecognitionEvent::SpeechEnded => {
                    deadline = Some(Instant::now() + self.silence_timeout);
                }
                RecognitionEvent::Ended => break,
                RecognitionEvent::Error(error) if error.is_benign() => {
                    debug!(%error, "Ignoring benign recognition error");
                }
                RecognitionEvent::Error(error) => {
                    let message = error
                        .advisory_message()
                        .unwrap_or_else(|| error.to_string());
                    return UtteranceOutcome::Advisory(message);
                }
            }
        }

        let transcript = accumulated.trim();
        if transcript.is_empty() {
            UtteranceOutcome::Silence
        } else {
            UtteranceOutcome::Transcript(transcript.to_string())
        }
    }
}
