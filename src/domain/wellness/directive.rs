//! Per-turn directives for the text generator.
//!
//! A directive is the phase-specific instruction block placed at the top of
//! the outbound prompt. Every directive demands a short, unformatted reply
//! because the reply may be read aloud.

use serde::{Deserialize, Serialize};

/// Prefix added to any directive when the user's message contained crisis language.
pub const CRISIS_PREFIX: &str = "CRITICAL: User expressed concerning language. \
Gently encourage professional help while being supportive. ";

/// What the assistant should do this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Directive {
    /// Ask one short clarifying question; never offer solutions.
    AskClarifyingQuestion,
    /// Introduce the approach and give the first technique.
    IntroduceApproach,
    /// Deliver the next increment of the approach.
    ContinueSolution {
        /// 1-based step being delivered.
        step: u32,
    },
    /// Summarize, ask which part is most doable, move to planning.
    SummarizeSolution,
    /// Propose one concrete, time-boxed step and ask for a commitment.
    ProposeAction,
    /// Ask how the agreed step went.
    CheckProgress,
}

impl Directive {
    /// Renders the instruction text, optionally prefixed for crisis handling.
    pub fn render(&self, crisis_detected: bool) -> String {
        let prefix = if crisis_detected { CRISIS_PREFIX } else { "" };
        let body = match self {
            Self::AskClarifyingQuestion => ASSESSMENT.to_string(),
            Self::IntroduceApproach => SOLUTION_FIRST_STEP.to_string(),
            Self::ContinueSolution { step } => {
                SOLUTION_NEXT_STEP.replace("{step}", &step.to_string())
            }
            Self::SummarizeSolution => SOLUTION_SUMMARY.to_string(),
            Self::ProposeAction => ACTION_PLAN.to_string(),
            Self::CheckProgress => FOLLOW_UP.to_string(),
        };
        format!("{prefix}{body}")
    }
}

// ============================================================================
// Directive templates
// ============================================================================

const ASSESSMENT: &str = "You are a therapist in ASSESSMENT phase.

CRITICAL: Keep responses SHORT (1-2 sentences max).
- Ask ONE simple question to understand better
- Be warm but brief
- Don't offer solutions yet
- After 3-6 questions, move to solutions
- NEVER use asterisks or special formatting - this will be spoken aloud

Ask about: triggers, duration, daily impact, what they've tried, when it's better/worse.";

const SOLUTION_FIRST_STEP: &str = "You are offering SOLUTIONS step by step.

CRITICAL: Keep responses SHORT (1-2 sentences max).
- Introduce that you'll share an approach
- Give the FIRST technique briefly
- End with \"Make sense?\" or \"Following me?\"
- Don't give all solutions at once
- NEVER use asterisks or special formatting - this will be spoken aloud";

const SOLUTION_NEXT_STEP: &str = "Continue offering solutions step by step.

CRITICAL: Keep responses SHORT (1-2 sentences max).
- This is step {step} of your approach
- Explain the NEXT part briefly
- End with \"Ready for the next part?\"
- NEVER use asterisks or special formatting - this will be spoken aloud";

const SOLUTION_SUMMARY: &str = "Finish solution and move to ACTION.

CRITICAL: Keep responses SHORT (1-2 sentences max).
- Summarize briefly
- Ask which part feels most doable
- Transition to creating action plan
- NEVER use asterisks or special formatting - this will be spoken aloud";

const ACTION_PLAN: &str = "Create a SPECIFIC ACTION PLAN.

CRITICAL: Keep responses SHORT (1-2 sentences max).
- Give ONE specific step they can try today
- Make it simple and measurable
- Ask \"Can you try this for 3 days?\"
- NEVER use asterisks or special formatting - this will be spoken aloud";

const FOLLOW_UP: &str = "Check on progress.

CRITICAL: Keep responses SHORT (1-2 sentences max).
- Ask specifically about their action plan
- If they tried it, ask how it went
- If not, gently encourage and problem-solve
- NEVER use asterisks or special formatting - this will be spoken aloud";

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Directive; 6] = [
        Directive::AskClarifyingQuestion,
        Directive::IntroduceApproach,
        Directive::ContinueSolution { step: 2 },
        Directive::SummarizeSolution,
        Directive::ProposeAction,
        Directive::CheckProgress,
    ];

    #[test]
    fn every_directive_demands_short_unformatted_output() {
        for directive in ALL {
            let text = directive.render(false);
            assert!(text.contains("1-2 sentences"), "{:?}", directive);
            assert!(text.contains("NEVER use asterisks"), "{:?}", directive);
        }
    }

    #[test]
    fn crisis_prefix_is_prepended_only_when_detected() {
        for directive in ALL {
            assert!(directive.render(true).starts_with(CRISIS_PREFIX));
            assert!(!directive.render(false).contains("concerning language"));
        }
    }

    #[test]
    fn continue_solution_names_its_step() {
        let text = Directive::ContinueSolution { step: 2 }.render(false);
        assert!(text.contains("This is step 2 of your approach"));
        assert!(!text.contains("{step}"));
    }

    #[test]
    fn assessment_forbids_solutions() {
        let text = Directive::AskClarifyingQuestion.render(false);
        assert!(text.contains("Don't offer solutions yet"));
    }
}
