//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `wellness` - Conversation phases, crisis detection, prompts and transcript

pub mod foundation;
pub mod wellness;
