//! Prompt assembly.
//!
//! The generator sees a single text block: the directive, a short window
//! of recent history, the current user text and a closing instruction.

use super::message::Message;

/// Messages of history replayed to the generator.
pub const RECENT_WINDOW: usize = 4;

/// Closing instruction appended to every prompt.
pub const CLOSING_INSTRUCTION: &str = "Respond as a caring therapist - SHORT, warm, natural. \
1-2 sentences max. This will be spoken aloud so use natural speech without any asterisks, \
bold text, or special formatting.";

/// Builds the outbound prompt text.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    recent_window: usize,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self {
            recent_window: RECENT_WINDOW,
        }
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recent_window(mut self, recent_window: usize) -> Self {
        self.recent_window = recent_window;
        self
    }

    pub fn recent_window(&self) -> usize {
        self.recent_window
    }

    /// Assembles the prompt.
    ///
    /// `history` must not include the current user message; only its last
    /// `recent_window` entries are used.
    pub fn build(&self, directive: &str, history: &[Message], user_text: &str) -> String {
        let start = history.len().saturating_sub(self.recent_window);
        let recent = history[start..]
            .iter()
            .map(|m| format!("{}: {}", m.sender().prompt_label(), m.content()))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "{directive}\n\nRecent conversation:\n{recent}\n\nClient: \"{user_text}\"\n\n{CLOSING_INSTRUCTION}"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    fn history() -> Vec<Message> {
        let user = UserId::new("user-1").unwrap();
        vec![
            Message::from_assistant("Hi. I'm here to listen. What's bothering you?").unwrap(),
            Message::from_user(user.clone(), "I can't sleep").unwrap(),
            Message::from_assistant("How long has this been going on?").unwrap(),
            Message::from_user(user.clone(), "About a month").unwrap(),
            Message::from_assistant("What keeps you up?").unwrap(),
        ]
    }

    #[test]
    fn includes_directive_first_and_closing_last() {
        let prompt = PromptBuilder::new().build("DIRECTIVE", &history(), "Work worries");
        assert!(prompt.starts_with("DIRECTIVE\n\nRecent conversation:\n"));
        assert!(prompt.ends_with(CLOSING_INSTRUCTION));
    }

    #[test]
    fn replays_only_the_recent_window_with_speaker_labels() {
        let prompt = PromptBuilder::new().build("D", &history(), "Work worries");
        assert!(!prompt.contains("What's bothering you?"));
        assert!(prompt.contains("Client: I can't sleep\nTherapist: How long has this been going on?"));
        assert!(prompt.contains("Therapist: What keeps you up?"));
    }

    #[test]
    fn quotes_current_user_text() {
        let prompt = PromptBuilder::new().build("D", &history(), "Work worries");
        assert!(prompt.contains("Client: \"Work worries\""));
    }

    #[test]
    fn empty_history_still_builds() {
        let prompt = PromptBuilder::new().build("D", &[], "hello");
        assert!(prompt.contains("Recent conversation:\n\n\nClient: \"hello\""));
    }

    #[test]
    fn window_is_configurable() {
        let prompt = PromptBuilder::new()
            .with_recent_window(1)
            .build("D", &history(), "x");
        assert!(!prompt.contains("About a month"));
        assert!(prompt.contains("Therapist: What keeps you up?"));
    }
}
