//! Voice Adapters.
//!
//! ## Available Adapters
//!
//! - `ElevenLabsSynthesizer` - ElevenLabs text-to-speech, played through an `AudioPlayer`
//! - `CommandAudioPlayer` - Pipes audio into an external player process
//! - `PlaybackController` - One live utterance at a time, cancellable
//! - `UtteranceAccumulator` - Turns recognition events into finished utterances
//! - `MockSpeechSynthesizer`, `MockAudioPlayer`, `MockSpeechRecognizer` - Test doubles

mod command_player;
mod elevenlabs_synthesizer;
mod mock;
mod playback;
mod utterance;

pub use command_player::{CommandAudioPlayer, DEFAULT_PLAYER_COMMAND};
pub use elevenlabs_synthesizer::{
    ElevenLabsConfig, ElevenLabsSynthesizer, VoiceSettings, DEFAULT_ELEVENLABS_BASE_URL,
    ELEVENLABS_MODEL_ID, ELEVENLABS_OUTPUT_FORMAT,
};
pub use mock::{MockAudioPlayer, MockSpeechRecognizer, MockSpeechSynthesizer};
pub use playback::{PlaybackController, PlaybackTicket};
pub use utterance::{UtteranceAccumulator, UtteranceOutcome, DEFAULT_SILENCE_TIMEOUT};
