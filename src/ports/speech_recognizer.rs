//! Speech Recognizer Port - Turns microphone input into text.
//!
//! A recognizer produces a stream of events. Adapters turn the stream into
//! finished utterances; recognition problems become advisory messages and
//! never touch the conversation state.
//!
//! No microphone engine ships with this crate. The terminal binary reads
//! typed input only; embedders with a platform recognizer implement this
//! trait and pass it to `ChatSession::handle_voice_input`.

use futures::Stream;
use std::pin::Pin;

/// Boxed stream of recognition events.
pub type RecognitionStream = Pin<Box<dyn Stream<Item = RecognitionEvent> + Send>>;

/// Port for a speech recognition engine.
pub trait SpeechRecognizer: Send + Sync {
    /// Returns false when the platform has no recognition support.
    fn is_available(&self) -> bool;

    /// Starts listening and returns the event stream.
    ///
    /// # Errors
    ///
    /// - `NotSupported` if the engine is unavailable
    fn listen(&self) -> Result<RecognitionStream, RecognitionError>;
}

/// Event emitted while listening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// The engine started listening.
    Started,
    /// A piece of recognized text. Interim segments may be revised.
    Segment { text: String, is_final: bool },
    /// The user started speaking.
    SpeechStarted,
    /// The user stopped speaking.
    SpeechEnded,
    /// The engine stopped listening.
    Ended,
    Error(RecognitionError),
}

/// Recognition failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecognitionError {
    #[error("no speech detected")]
    NoSpeech,

    #[error("recognition aborted")]
    Aborted,

    #[error("audio capture failed")]
    AudioCapture,

    #[error("microphone permission denied")]
    NotAllowed,

    #[error("network error")]
    Network,

    #[error("speech recognition not supported")]
    NotSupported,

    #[error("recognition error: {0}")]
    Other(String),
}

impl RecognitionError {
    /// Maps an engine error code (`no-speech`, `not-allowed`, ...) to an error.
    pub fn from_code(code: &str) -> Self {
        match code {
            "no-speech" => Self::NoSpeech,
            "aborted" => Self::Aborted,
            "audio-capture" => Self::AudioCapture,
            "not-allowed" => Self::NotAllowed,
            "network" => Self::Network,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns true for errors that are part of normal listening.
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::NoSpeech | Self::Aborted)
    }

    /// Text to show the user, or `None` for benign errors.
    pub fn advisory_message(&self) -> Option<String> {
        let message = match self {
            Self::NoSpeech | Self::Aborted => return None,
            Self::AudioCapture => {
                "Microphone not accessible. Please check your microphone connection and permissions."
                    .to_string()
            }
            Self::NotAllowed => {
                "Microphone access denied. Please allow microphone permissions in your browser settings."
                    .to_string()
            }
            Self::Network => {
                "Network error occurred. Please check your internet connection.".to_string()
            }
            Self::NotSupported => {
                "Speech recognition not supported in this browser. Please try using Chrome or Edge."
                    .to_string()
            }
            Self::Other(code) => format!("Speech recognition error: {code}"),
        };
        Some(message)
    }
}
