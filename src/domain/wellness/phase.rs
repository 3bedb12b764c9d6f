//! Conversation phases.
//!
//! A session walks forward through four phases: the assistant first
//! assesses what is going on, then offers a stepwise solution, then agrees
//! a concrete action and finally follows up on it. There is no way back.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The top-level phase of a wellness conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseKind {
    /// Asking short clarifying questions. Never offers solutions.
    #[default]
    Assessment,

    /// Walking the user through an approach one step at a time.
    Solution,

    /// Agreeing one concrete, time-boxed step.
    Action,

    /// Checking how the agreed step went.
    FollowUp,
}

impl PhaseKind {
    /// Returns the ordinal of the phase, used to assert monotonic progress.
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Assessment => 0,
            Self::Solution => 1,
            Self::Action => 2,
            Self::FollowUp => 3,
        }
    }
}

impl StateMachine for PhaseKind {
    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            Self::Assessment => vec![Self::Solution],
            Self::Solution => vec![Self::Action],
            Self::Action => vec![Self::FollowUp],
            Self::FollowUp => vec![],
        }
    }
}
