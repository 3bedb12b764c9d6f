//! Reply sanitization.
//!
//! Generated replies may be spoken, so anything a speech engine would read
//! out literally (markdown emphasis, control characters, prompt-injection
//! markers) is removed before the reply reaches the transcript.

use thiserror::Error;

/// Maximum accepted reply length in bytes.
pub const MAX_REPLY_LENGTH: usize = 100_000;

/// Characters used for rich-text emphasis.
pub const EMPHASIS_CHARS: &[char] = &['*', '_', '`', '~'];

const INJECTION_MARKERS: &[&str] = &[
    "```system",
    "```assistant",
    "[INST]",
    "[/INST]",
    "<|system|>",
    "<|assistant|>",
    "<|user|>",
    "<|im_start|>",
    "<|im_end|>",
    "<<SYS>>",
    "<</SYS>>",
];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SanitizationError {
    #[error("Reply too long: {actual} bytes exceeds maximum of {max} bytes")]
    TooLong { max: usize, actual: usize },

    #[error("Reply is empty after sanitization")]
    Empty,
}

/// Cleans generated replies.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplySanitizer;

impl ReplySanitizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanitizes a reply.
    ///
    /// # Errors
    ///
    /// - `TooLong` if the raw reply exceeds [`MAX_REPLY_LENGTH`]
    /// - `Empty` if nothing is left after cleaning and trimming
    pub fn sanitize(&self, reply: &str) -> Result<String, SanitizationError> {
        if reply.len() > MAX_REPLY_LENGTH {
            return Err(SanitizationError::TooLong {
                max: MAX_REPLY_LENGTH,
                actual: reply.len(),
            });
        }

        let mut cleaned: String = reply
            .chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t' || *c == '\r')
            .collect();

        // Markers first: some contain emphasis characters.
        for marker in INJECTION_MARKERS {
            cleaned = cleaned.replace(marker, "");
        }

        let cleaned: String = cleaned
            .chars()
            .filter(|c| !EMPHASIS_CHARS.contains(c))
            .collect();

        let trimmed = cleaned.trim();
        if trimmed.is_empty() {
            return Err(SanitizationError::Empty);
        }
        Ok(trimmed.to_string())
    }
}
