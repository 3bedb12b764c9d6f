//! State machine trait for phase-like enums.
//!
//! Gives every forward-only lifecycle enum in the crate the same
//! validated-transition vocabulary.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// Implementors define the legal edges and get validated transitions and
/// terminal detection for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for PhaseKind {
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Assessment => vec![Solution],
///             Solution => vec![Action],
///             Action => vec![FollowUp],
///             FollowUp => vec![],
///         }
///     }
/// }
///
/// let next = PhaseKind::Assessment.transition_to(PhaseKind::Solution)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns all valid target states from the current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if a transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
