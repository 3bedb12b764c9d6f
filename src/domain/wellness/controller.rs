//! Phase controller.
//!
//! Decides, for one user turn, which phase the turn belongs to, what the
//! assistant should be told to do, and what the context becomes once the
//! reply has been produced. Planning is pure; the caller persists the
//! result only when generation succeeds.

use std::ops::RangeInclusive;

use tracing::debug;

use super::context::{ConversationPhase, SessionContext, TOTAL_SOLUTION_STEPS};
use super::directive::Directive;
use super::phase::PhaseKind;
use crate::domain::foundation::Timestamp;

/// Words and phrases that count as the user acknowledging a solution step.
pub const AFFIRMATIVE_RESPONSES: &[&str] = &[
    "yes",
    "yeah",
    "ok",
    "okay",
    "sure",
    "makes sense",
    "understand",
    "got it",
    "clear",
    "right",
    "correct",
    "good",
    "sounds good",
];

/// Question counts at which assessment hands over to solutions.
pub const ASSESSMENT_WINDOW: RangeInclusive<u32> = 3..=6;

/// Returns true if the text acknowledges a presented step.
///
/// Matches any entry of [`AFFIRMATIVE_RESPONSES`] as a substring of the
/// lower-cased text.
pub fn is_affirmative(text: &str) -> bool {
    let lower = text.to_lowercase();
    AFFIRMATIVE_RESPONSES
        .iter()
        .any(|signal| lower.contains(signal))
}

/// Outcome of planning a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnPlan {
    phase: PhaseKind,
    directive: Directive,
    crisis_detected: bool,
    next: SessionContext,
}

impl TurnPlan {
    /// Phase the turn is attributed to.
    pub fn phase(&self) -> PhaseKind {
        self.phase
    }

    pub fn directive(&self) -> Directive {
        self.directive
    }

    pub fn crisis_detected(&self) -> bool {
        self.crisis_detected
    }

    /// Instruction text for the generator.
    pub fn directive_text(&self) -> String {
        self.directive.render(self.crisis_detected)
    }

    /// Produces the context to persist once the reply is known.
    ///
    /// During the action phase the reply becomes the agreed plan.
    pub fn complete(self, reply: &str) -> SessionContext {
        match (self.directive, self.next.phase()) {
            (Directive::ProposeAction, ConversationPhase::Action { .. }) => {
                self.next.with_phase(ConversationPhase::Action {
                    plan: Some(reply.to_string()),
                })
            }
            _ => self.next,
        }
    }
}

/// Plans turns from the stored context.
///
/// The assessment window and the number of solution steps are fixed by
/// [`ASSESSMENT_WINDOW`] and [`TOTAL_SOLUTION_STEPS`], the same constants the
/// context reports through `total_solution_steps()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseController;

impl PhaseController {
    pub fn new() -> Self {
        Self
    }

    /// Plans one turn. Does not mutate `ctx`.
    pub fn plan_turn(&self, ctx: &SessionContext, crisis: bool, user_text: &str) -> TurnPlan {
        let now = Timestamp::now();
        let entered = self.enter(ctx.phase().clone(), now);

        let (phase, directive, next_phase) = match entered {
            ConversationPhase::Assessment { questions_asked } => (
                PhaseKind::Assessment,
                Directive::AskClarifyingQuestion,
                ConversationPhase::Assessment {
                    questions_asked: questions_asked + 1,
                },
            ),
            ConversationPhase::Solution { step, .. } if step > TOTAL_SOLUTION_STEPS => (
                PhaseKind::Action,
                Directive::SummarizeSolution,
                ConversationPhase::Action { plan: None },
            ),
            ConversationPhase::Solution {
                step,
                awaiting_confirmation,
            } => {
                let directive = if step <= 1 {
                    Directive::IntroduceApproach
                } else {
                    Directive::ContinueSolution { step }
                };
                (
                    PhaseKind::Solution,
                    directive,
                    self.confirm(step, awaiting_confirmation, user_text),
                )
            }
            ConversationPhase::Action { plan } => (
                PhaseKind::Action,
                Directive::ProposeAction,
                ConversationPhase::Action { plan },
            ),
            ConversationPhase::FollowUp {
                plan,
                action_completed,
                ..
            } => (
                PhaseKind::FollowUp,
                Directive::CheckProgress,
                ConversationPhase::FollowUp {
                    plan,
                    last_action_check: now,
                    action_completed,
                },
            ),
        };

        debug!(
            from = ?ctx.current_phase(),
            turn_phase = ?phase,
            directive = ?directive,
            crisis,
            "Planned turn"
        );

        let next = ctx
            .clone()
            .with_phase(next_phase)
            .with_message_count(ctx.message_count() + 1);

        TurnPlan {
            phase,
            directive,
            crisis_detected: crisis,
            next,
        }
    }

    fn enter(&self, phase: ConversationPhase, now: Timestamp) -> ConversationPhase {
        match phase {
            ConversationPhase::Assessment { questions_asked }
                if ASSESSMENT_WINDOW.contains(&questions_asked) =>
            {
                ConversationPhase::Solution {
                    step: 1,
                    awaiting_confirmation: false,
                }
            }
            ConversationPhase::Action { plan: Some(plan) } if !plan.is_empty() => {
                ConversationPhase::FollowUp {
                    plan,
                    last_action_check: now,
                    action_completed: false,
                }
            }
            other => other,
        }
    }

    fn confirm(&self, step: u32, awaiting: bool, user_text: &str) -> ConversationPhase {
        if awaiting && is_affirmative(user_text) {
            ConversationPhase::Solution {
                step: step + 1,
                awaiting_confirmation: false,
            }
        } else {
            ConversationPhase::Solution {
                step,
                awaiting_confirmation: true,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run(
        controller: &PhaseController,
        ctx: SessionContext,
        text: &str,
        reply: &str,
    ) -> (TurnPlan, SessionContext) {
        let plan = controller.plan_turn(&ctx, false, text);
        let next = plan.clone().complete(reply);
        (plan, next)
    }

    mod affirmative {
        use super::*;

        #[test]
        fn recognises_plain_acknowledgments() {
            assert!(is_affirmative("okay"));
            assert!(is_affirmative("Yes, that makes sense"));
            assert!(is_affirmative("GOT IT"));
        }

        #[test]
        fn rejects_unrelated_text() {
            assert!(!is_affirmative("I don't follow"));
            assert!(!is_affirmative("what do you mean?"));
        }
    }

    mod assessment {
        use super::*;

        #[test]
        fn first_turn_asks_question_and_counts_it() {
            let controller = PhaseController::default();
            let (plan, next) = run(&controller, SessionContext::new(), "I can't sleep", "How long?");

            assert_eq!(plan.phase(), PhaseKind::Assessment);
            assert_eq!(plan.directive(), Directive::AskClarifyingQuestion);
            assert_eq!(next.questions_asked(), 1);
            assert_eq!(next.message_count(), 1);
        }

        #[test]
        fn fourth_turn_enters_solution() {
            let controller = PhaseController::default();
            let mut ctx = SessionContext::new();
            for _ in 0..3 {
                let (plan, next) = run(&controller, ctx, "work stress", "Tell me more?");
                assert_eq!(plan.phase(), PhaseKind::Assessment);
                ctx = next;
            }
            assert_eq!(ctx.questions_asked(), 3);

            let (plan, next) = run(&controller, ctx, "it started last month", "Try this.");
            assert_eq!(plan.phase(), PhaseKind::Solution);
            assert_eq!(plan.directive(), Directive::IntroduceApproach);
            assert_eq!(next.solution_step(), 1);
            assert!(next.waiting_for_confirmation());
            assert_eq!(next.questions_asked(), 3);
        }

        #[test]
        fn planning_does_not_mutate_input() {
            let controller = PhaseController::default();
            let ctx = SessionContext::new();
            let _ = controller.plan_turn(&ctx, true, "hello");
            assert_eq!(ctx, SessionContext::new());
        }
    }

    mod solution {
        use super::*;

        fn awaiting(step: u32) -> SessionContext {
            SessionContext::from_parts(
                5,
                ConversationPhase::Solution {
                    step,
                    awaiting_confirmation: true,
                },
            )
        }

        #[test]
        fn affirmative_advances_step_and_clears_flag() {
            let controller = PhaseController::default();
            let (_, next) = run(&controller, awaiting(1), "okay", "Next part.");
            assert_eq!(next.solution_step(), 2);
            assert!(!next.waiting_for_confirmation());
        }

        #[test]
        fn non_affirmative_leaves_step_unchanged() {
            let controller = PhaseController::default();
            let (_, next) = run(&controller, awaiting(1), "I'm lost", "Let me rephrase.");
            assert_eq!(next.solution_step(), 1);
            assert!(next.waiting_for_confirmation());
        }

        #[test]
        fn second_step_continues_solution() {
            let controller = PhaseController::default();
            let ctx = SessionContext::from_parts(
                6,
                ConversationPhase::Solution {
                    step: 2,
                    awaiting_confirmation: false,
                },
            );
            let (plan, next) = run(&controller, ctx, "go on", "Part two.");
            assert_eq!(plan.directive(), Directive::ContinueSolution { step: 2 });
            assert!(next.waiting_for_confirmation());
        }

        #[test]
        fn past_last_step_summarizes_and_moves_to_action() {
            let controller = PhaseController::default();
            let ctx = SessionContext::from_parts(
                7,
                ConversationPhase::Solution {
                    step: TOTAL_SOLUTION_STEPS + 1,
                    awaiting_confirmation: false,
                },
            );
            let (plan, next) = run(&controller, ctx, "anything at all", "To sum up.");
            assert_eq!(plan.phase(), PhaseKind::Action);
            assert_eq!(plan.directive(), Directive::SummarizeSolution);
            assert_eq!(next.current_phase(), PhaseKind::Action);
            assert_eq!(next.action_plan(), "");
        }
    }

    mod action_and_follow_up {
        use super::*;

        #[test]
        fn action_turn_captures_reply_as_plan() {
            let controller = PhaseController::default();
            let ctx = SessionContext::from_parts(8, ConversationPhase::Action { plan: None });
            let (plan, next) = run(&controller, ctx, "which one?", "Walk ten minutes daily. Can you try this for 3 days?");
            assert_eq!(plan.directive(), Directive::ProposeAction);
            assert_eq!(next.action_plan(), "Walk ten minutes daily. Can you try this for 3 days?");
        }

        #[test]
        fn agreed_plan_enters_follow_up() {
            let controller = PhaseController::default();
            let ctx = SessionContext::from_parts(
                9,
                ConversationPhase::Action {
                    plan: Some("Walk daily.".to_string()),
                },
            );
            let (plan, next) = run(&controller, ctx, "I'll try", "How did it go?");
            assert_eq!(plan.phase(), PhaseKind::FollowUp);
            assert_eq!(plan.directive(), Directive::CheckProgress);
            assert_eq!(next.action_plan(), "Walk daily.");
            assert!(next.last_action_check().is_some());
            assert!(!next.action_completed());
        }

        #[test]
        fn follow_up_is_sticky_and_refreshes_check_time() {
            let controller = PhaseController::default();
            let earlier = Timestamp::from_datetime(chrono::Utc::now() - chrono::Duration::hours(1));
            let ctx = SessionContext::from_parts(
                10,
                ConversationPhase::FollowUp {
                    plan: "Walk daily.".to_string(),
                    last_action_check: earlier,
                    action_completed: false,
                },
            );
            let (plan, next) = run(&controller, ctx, "I did it", "Great.");
            assert_eq!(plan.phase(), PhaseKind::FollowUp);
            assert!(earlier.is_before(&next.last_action_check().unwrap_or(earlier)));
        }
    }

    mod crisis {
        use super::*;

        #[test]
        fn crisis_flag_prefixes_directive_without_changing_phase() {
            let controller = PhaseController::default();
            let calm = controller.plan_turn(&SessionContext::new(), false, "hi");
            let urgent = controller.plan_turn(&SessionContext::new(), true, "hi");
            assert_eq!(calm.phase(), urgent.phase());
            assert!(urgent.directive_text().starts_with("CRITICAL: User expressed concerning language."));
            assert_eq!(calm.complete("Hello."), urgent.complete("Hello."));
        }
    }

    proptest! {
        #[test]
        fn phases_never_move_backwards(
            texts in prop::collection::vec(
                prop_oneof![Just("okay".to_string()), Just("hmm".to_string()), "[a-z ]{0,20}"],
                1..25,
            )
        ) {
            let controller = PhaseController::default();
            let mut ctx = SessionContext::new();
            for text in texts {
                let before = ctx.current_phase();
                let plan = controller.plan_turn(&ctx, false, &text);
                prop_assert!(plan.phase().ordinal() >= before.ordinal());
                let next = plan.complete("A reply.");
                prop_assert!(next.current_phase().ordinal() >= before.ordinal());
                if before != PhaseKind::Assessment {
                    prop_assert_ne!(next.current_phase(), PhaseKind::Assessment);
                }
                ctx = next;
            }
        }

        #[test]
        fn solution_turns_never_pass_reported_total(
            step in 1u32..=TOTAL_SOLUTION_STEPS + 1,
            awaiting in any::<bool>(),
            text in prop_oneof![Just("okay".to_string()), "[a-z ]{0,20}"],
        ) {
            let controller = PhaseController::new();
            let ctx = SessionContext::from_parts(
                6,
                ConversationPhase::Solution { step, awaiting_confirmation: awaiting },
            );
            let plan = controller.plan_turn(&ctx, false, &text);
            if let Directive::ContinueSolution { step: presented } = plan.directive() {
                prop_assert!(presented <= ctx.total_solution_steps());
            }
            if plan.phase() == PhaseKind::Solution {
                prop_assert!(step <= ctx.total_solution_steps());
            }
            let next = plan.complete("A reply.");
            if next.current_phase() == PhaseKind::Solution {
                prop_assert!(next.solution_step() <= next.total_solution_steps() + 1);
            }
        }

        #[test]
        fn assessment_ends_when_question_count_enters_window(q in 0u32..3) {
            let controller = PhaseController::default();
            let ctx = SessionContext::from_parts(q, ConversationPhase::Assessment { questions_asked: q });
            let plan = controller.plan_turn(&ctx, false, "still talking");
            prop_assert_eq!(plan.phase(), PhaseKind::Assessment);

            let ctx = SessionContext::from_parts(q, ConversationPhase::Assessment { questions_asked: 3 + q });
            let plan = controller.plan_turn(&ctx, false, "still talking");
            prop_assert_eq!(plan.phase(), PhaseKind::Solution);
        }
    }
}
