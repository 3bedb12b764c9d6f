//! Application layer - Handlers and wiring.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! `bootstrap` turns loaded configuration into concrete adapters.

pub mod bootstrap;
pub mod handlers;

pub use bootstrap::{build_session, build_speech_synthesizer, build_text_generator};
pub use handlers::{
    ChatSession, ChatSessionConfig, InputMode, TurnError, TurnOutcome, VoiceTurn,
};
