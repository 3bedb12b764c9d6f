//! Chat session handler.

mod chat_session;

pub use chat_session::{
    ChatSession, ChatSessionConfig, InputMode, TurnError, TurnOutcome, VoiceTurn,
};
