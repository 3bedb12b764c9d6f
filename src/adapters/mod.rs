//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Text generators (Gemini, chat relay, mock)
//! - `voice` - Speech synthesis, audio playback, utterance accumulation
//! - `crisis` - Crisis surfaces (watch channel, log)

pub mod ai;
pub mod crisis;
pub mod voice;

pub use ai::{ChatRelayConfig, ChatRelayProvider, GeminiConfig, GeminiProvider, MockTextGenerator};
pub use crisis::{LoggingCrisisSurface, WatchCrisisSurface};
pub use voice::{
    CommandAudioPlayer, ElevenLabsConfig, ElevenLabsSynthesizer, PlaybackController,
    UtteranceAccumulator, UtteranceOutcome,
};
