//! Per-session conversation context.
//!
//! The context is the only mutable record the phase controller reads. Each
//! phase carries its own payload so that flags which only make sense in one
//! phase (awaiting confirmation, the agreed plan) cannot leak into another.

use serde::{Deserialize, Serialize};

use super::phase::PhaseKind;
use crate::domain::foundation::Timestamp;

/// Number of solution steps presented before moving to action.
pub const TOTAL_SOLUTION_STEPS: u32 = 2;

/// Phase state with phase-specific payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "kebab-case")]
pub enum ConversationPhase {
    /// Gathering context.
    Assessment {
        /// Clarifying questions asked so far.
        questions_asked: u32,
    },

    /// Presenting the approach step by step.
    Solution {
        /// Current step, starting at 1. Exceeds [`TOTAL_SOLUTION_STEPS`]
        /// once the last step has been acknowledged.
        step: u32,
        /// True after a step was presented and before the user acknowledged it.
        awaiting_confirmation: bool,
    },

    /// Agreeing a concrete step.
    Action {
        /// Assistant reply that proposed the step, once one exists.
        plan: Option<String>,
    },

    /// Checking on the agreed step.
    FollowUp {
        plan: String,
        last_action_check: Timestamp,
        /// Never set by the controller.
        action_completed: bool,
    },
}

impl ConversationPhase {
    /// Returns the phase kind without payload.
    pub fn kind(&self) -> PhaseKind {
        match self {
            Self::Assessment { .. } => PhaseKind::Assessment,
            Self::Solution { .. } => PhaseKind::Solution,
            Self::Action { .. } => PhaseKind::Action,
            Self::FollowUp { .. } => PhaseKind::FollowUp,
        }
    }
}

impl Default for ConversationPhase {
    fn default() -> Self {
        Self::Assessment { questions_asked: 0 }
    }
}

/// Running state of one conversation.
///
/// `Default` is the initial state of a fresh session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionContext {
    message_count: u32,
    phase: ConversationPhase,
    /// Questions asked during assessment. Frozen once the phase is left.
    questions_asked: u32,
}

impl SessionContext {
    /// Creates the initial context of a session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a context from its parts.
    #[cfg(test)]
    pub(crate) fn from_parts(message_count: u32, phase: ConversationPhase) -> Self {
        let questions_asked = match &phase {
            ConversationPhase::Assessment { questions_asked } => *questions_asked,
            _ => 0,
        };
        Self {
            message_count,
            phase,
            questions_asked,
        }
    }

    pub(crate) fn with_phase(mut self, phase: ConversationPhase) -> Self {
        if let ConversationPhase::Assessment { questions_asked } = &phase {
            self.questions_asked = *questions_asked;
        }
        self.phase = phase;
        self
    }

    pub(crate) fn with_message_count(mut self, message_count: u32) -> Self {
        self.message_count = message_count;
        self
    }

    /// User turns that completed successfully.
    pub fn message_count(&self) -> u32 {
        self.message_count
    }

    /// Full phase state.
    pub fn phase(&self) -> &ConversationPhase {
        &self.phase
    }

    /// Current phase kind.
    pub fn current_phase(&self) -> PhaseKind {
        self.phase.kind()
    }

    /// Clarifying questions asked during assessment.
    pub fn questions_asked(&self) -> u32 {
        self.questions_asked
    }

    /// Current solution step, 0 outside the solution phase.
    pub fn solution_step(&self) -> u32 {
        match &self.phase {
            ConversationPhase::Solution { step, .. } => *step,
            _ => 0,
        }
    }

    /// 0 until the solution phase is entered, [`TOTAL_SOLUTION_STEPS`] after.
    pub fn total_solution_steps(&self) -> u32 {
        if self.solution_offered() {
            TOTAL_SOLUTION_STEPS
        } else {
            0
        }
    }

    /// True once the conversation has left assessment.
    pub fn solution_offered(&self) -> bool {
        !matches!(self.phase, ConversationPhase::Assessment { .. })
    }

    /// True while a presented solution step awaits acknowledgment.
    pub fn waiting_for_confirmation(&self) -> bool {
        matches!(
            self.phase,
            ConversationPhase::Solution {
                awaiting_confirmation: true,
                ..
            }
        )
    }

    /// The agreed plan, empty before one exists.
    pub fn action_plan(&self) -> &str {
        match &self.phase {
            ConversationPhase::Action { plan: Some(plan) } => plan,
            ConversationPhase::FollowUp { plan, .. } => plan,
            _ => "",
        }
    }

    /// Always false: no transition sets it.
    pub fn action_completed(&self) -> bool {
        matches!(
            self.phase,
            ConversationPhase::FollowUp {
                action_completed: true,
                ..
            }
        )
    }

    /// When the follow-up phase last checked on the plan.
    pub fn last_action_check(&self) -> Option<Timestamp> {
        match &self.phase {
            ConversationPhase::FollowUp {
                last_action_check, ..
            } => Some(*last_action_check),
            _ => None,
        }
    }
}
