//! Wellness conversation domain.
//!
//! Pure logic for a supportive conversation: crisis language detection,
//! the phase controller and its directives, prompt assembly, reply
//! sanitization and the transcript.

mod content;
mod context;
mod controller;
mod crisis;
mod directive;
mod message;
mod phase;
mod prompt;
mod sanitizer;

pub use content::{
    choose_fallback, choose_quote, CrisisResource, CrisisResources, ResourceChannel,
    FALLBACK_REPLIES, POSITIVE_QUOTES, WELCOME_MESSAGE,
};
pub use context::{ConversationPhase, SessionContext, TOTAL_SOLUTION_STEPS};
pub use controller::{
    is_affirmative, PhaseController, TurnPlan, AFFIRMATIVE_RESPONSES,
    ASSESSMENT_WINDOW,
};
pub use crisis::{CrisisAssessment, CrisisDetector, CrisisMatch, EXPLICIT_SELF_HARM_PHRASES};
pub use directive::{Directive, CRISIS_PREFIX};
pub use message::{ContentType, Message, Sender, Transcript};
pub use phase::PhaseKind;
pub use prompt::{PromptBuilder, CLOSING_INSTRUCTION, RECENT_WINDOW};
pub use sanitizer::{ReplySanitizer, SanitizationError, EMPHASIS_CHARS, MAX_REPLY_LENGTH};
