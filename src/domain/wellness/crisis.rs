//! Crisis language detection.
//!
//! Flags explicit self-harm or suicide language in a user message. The rule
//! set is deliberately narrow: casual expressions of frustration ("this
//! homework is killing me") must not trip it, so recall is traded for
//! precision.

use once_cell::sync::Lazy;
use regex::Regex;

/// Explicit phrases matched as plain substrings of the lower-cased text.
pub const EXPLICIT_SELF_HARM_PHRASES: &[&str] = &[
    "kill myself",
    "killing myself",
    "suicide",
    "suicidal",
    "end my life",
    "ending my life",
    "want to die",
    "wanna die",
    "wish i was dead",
    "wish i were dead",
    "hurt myself",
    "hurting myself",
    "harm myself",
    "harming myself",
    "self harm",
    "self-harm",
    "cut myself",
    "cutting myself",
    "take my own life",
    "taking my own life",
    "end it all",
    "ending it all",
    "better off dead",
    "not worth living",
    "no point in living",
    "cant go on",
    "can't go on",
    "cannot go on",
    "overdose on",
    "jump off",
    "hang myself",
    "hanging myself",
];

/// Intent + self-harm verb combinations.
const CONCERNING_PATTERN_SOURCES: &[&str] = &[
    r"\b(want|wanna|going|planning)\s+to\s+(die|kill\s+myself|end\s+my\s+life)\b",
    r"\b(feel|am|getting)\s+(suicidal|like\s+killing\s+myself)\b",
    r"\b(thinking\s+about|thoughts\s+of)\s+(suicide|killing\s+myself|ending\s+my\s+life)\b",
    r"\b(have\s+a\s+plan|planning)\s+to\s+(kill\s+myself|end\s+my\s+life|commit\s+suicide)\b",
];

static CONCERNING_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    CONCERNING_PATTERN_SOURCES
        .iter()
        .filter_map(|source| Regex::new(&format!("(?i){source}")).ok())
        .collect()
});

/// Which rule produced a positive verdict.
///
/// Carries only the rule, never the user's text, so it is safe to log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrisisMatch {
    /// An entry of [`EXPLICIT_SELF_HARM_PHRASES`] matched.
    Phrase(&'static str),
    /// The pattern at this index matched.
    Pattern(usize),
}

/// Verdict for a single message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CrisisAssessment {
    matched: Option<CrisisMatch>,
}

impl CrisisAssessment {
    /// Returns true if the message contains crisis language.
    pub fn is_crisis(&self) -> bool {
        self.matched.is_some()
    }

    /// Returns the rule that matched, if any.
    pub fn matched(&self) -> Option<CrisisMatch> {
        self.matched
    }
}

/// Stateless detector over the phrase list and compiled patterns.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrisisDetector;

impl CrisisDetector {
    /// Creates a detector.
    pub fn new() -> Self {
        Self
    }

    /// Returns true if the text contains crisis language.
    pub fn detect(&self, text: &str) -> bool {
        self.assess(text).is_crisis()
    }

    /// Classifies the text and reports the first matching rule.
    ///
    /// Phrases are checked before patterns.
    pub fn assess(&self, text: &str) -> CrisisAssessment {
        let normalized = text.trim().to_lowercase();
        if normalized.is_empty() {
            return CrisisAssessment::default();
        }

        if let Some(phrase) = EXPLICIT_SELF_HARM_PHRASES
            .iter()
            .find(|phrase| normalized.contains(*phrase))
        {
            return CrisisAssessment {
                matched: Some(CrisisMatch::Phrase(phrase)),
            };
        }

        let matched = CONCERNING_PATTERNS
            .iter()
            .position(|pattern| pattern.is_match(&normalized))
            .map(CrisisMatch::Pattern);

        CrisisAssessment { matched }
    }
}
