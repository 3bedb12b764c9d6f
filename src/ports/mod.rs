//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Generation
//!
//! - `TextGenerator` - Produces the assistant reply for an assembled prompt
//!
//! ## Voice
//!
//! - `SpeechSynthesizer` - Speaks replies, cancellable per utterance
//! - `AudioPlayer` - Plays synthesized audio
//! - `SpeechRecognizer` - Streams recognition events from the microphone
//!
//! ## Safety
//!
//! - `CrisisSurface` - Presents crisis resources

mod audio_player;
mod crisis_surface;
mod speech_recognizer;
mod speech_synthesizer;
mod text_generator;

pub use audio_player::AudioPlayer;
pub use crisis_surface::CrisisSurface;
pub use speech_recognizer::{
    RecognitionError, RecognitionEvent, RecognitionStream, SpeechRecognizer,
};
pub use speech_synthesizer::{SpeechError, SpeechSynthesizer};
pub use text_generator::{
    GenerationError, GenerationRequest, GenerationResponse, ProviderInfo, TextGenerator,
};
