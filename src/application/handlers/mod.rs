//! Application handlers.
//!
//! Orchestrate domain operations across ports.

pub mod session;

pub use session::{ChatSession, ChatSessionConfig, InputMode, TurnError, TurnOutcome, VoiceTurn};
