//! Transcript messages.
//!
//! Messages are immutable once appended. The transcript only grows, except
//! when a session is restarted.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, MessageId, Timestamp, UserId};

/// Who wrote a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Sender {
    /// The person using the companion.
    User(UserId),
    /// The companion itself.
    Assistant,
}

impl Sender {
    /// Speaker label used when replaying history to the generator.
    pub fn prompt_label(&self) -> &'static str {
        match self {
            Self::User(_) => "Client",
            Self::Assistant => "Therapist",
        }
    }
}

/// Kind of payload. Only text is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    #[default]
    Text,
    Image,
    File,
}

/// A single transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    sender: Sender,
    content: String,
    created_at: Timestamp,
    content_type: ContentType,
    edited: bool,
}

impl Message {
    /// Creates a text message.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is empty or whitespace
    pub fn new(sender: Sender, content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::validation(
                "content",
                "Message content cannot be empty",
            ));
        }

        Ok(Self {
            id: MessageId::new(),
            sender,
            content,
            created_at: Timestamp::now(),
            content_type: ContentType::Text,
            edited: false,
        })
    }

    /// Creates a message from the user.
    pub fn from_user(user: UserId, content: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(Sender::User(user), content)
    }

    /// Creates a message from the companion.
    pub fn from_assistant(content: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(Sender::Assistant, content)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn sender(&self) -> &Sender {
        &self.sender
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Carried for display; never set by the conversation logic.
    pub fn is_edited(&self) -> bool {
        self.edited
    }

    pub fn is_user(&self) -> bool {
        matches!(self.sender, Sender::User(_))
    }

    pub fn is_assistant(&self) -> bool {
        self.sender == Sender::Assistant
    }
}

/// Append-only list of messages for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and returns a reference to it.
    pub fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    /// Drops every message. Used only when a session restarts.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns up to `count` messages immediately preceding the last one.
    pub fn recent_before_last(&self, count: usize) -> &[Message] {
        let end = self.messages.len().saturating_sub(1);
        let start = end.saturating_sub(count);
        &self.messages[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    mod message {
        use super::*;

        #[test]
        fn rejects_blank_content() {
            assert!(Message::from_assistant("   ").is_err());
            assert!(Message::from_user(user(), "").is_err());
        }

        #[test]
        fn new_message_is_plain_unedited_text() {
            let msg = Message::from_user(user(), "hello").unwrap();
            assert!(msg.is_user());
            assert!(!msg.is_assistant());
            assert_eq!(msg.content_type(), ContentType::Text);
            assert!(!msg.is_edited());
        }

        #[test]
        fn senders_have_prompt_labels() {
            assert_eq!(Sender::User(user()).prompt_label(), "Client");
            assert_eq!(Sender::Assistant.prompt_label(), "Therapist");
        }
    }

    mod transcript {
        use super::*;

        fn filled(count: usize) -> Transcript {
            let mut transcript = Transcript::new();
            for i in 0..count {
                transcript.push(Message::from_assistant(format!("m{i}")).unwrap());
            }
            transcript
        }

        #[test]
        fn recent_before_last_excludes_last_message() {
            let transcript = filled(6);
            let recent: Vec<&str> = transcript
                .recent_before_last(4)
                .iter()
                .map(Message::content)
                .collect();
            assert_eq!(recent, vec!["m1", "m2", "m3", "m4"]);
        }

        #[test]
        fn recent_before_last_handles_short_transcripts() {
            assert!(Transcript::new().recent_before_last(4).is_empty());
            assert!(filled(1).recent_before_last(4).is_empty());
            assert_eq!(filled(3).recent_before_last(4).len(), 2);
        }

        #[test]
        fn clear_empties_transcript() {
            let mut transcript = filled(2);
            transcript.clear();
            assert!(transcript.is_empty());
        }
    }
}
