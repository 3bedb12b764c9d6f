//! Fixed copy shown or spoken by the companion.

use rand::seq::SliceRandom;
use rand::Rng;

// ============================================================================
// Conversation copy
// ============================================================================

/// First message of every session.
pub const WELCOME_MESSAGE: &str = "Hi. I'm here to listen. What's bothering you?";

/// Replies used when the generator cannot produce one.
pub const FALLBACK_REPLIES: &[&str] = &[
    "I'm having trouble connecting. Can you tell me more?",
    "Sorry, lost you there. What's most important right now?",
    "Connection issue. What do you need me to know?",
];

/// Encouragement shown on the welcome screen.
pub const POSITIVE_QUOTES: &[&str] = &[
    "Your feelings are valid and deserve to be heard.",
    "Every step forward, no matter how small, is progress.",
    "You are stronger than you know and braver than you feel.",
    "It's okay to not be okay. Healing takes time.",
    "Your story matters, and so do you.",
    "Speaking your truth is an act of courage.",
    "You don't have to carry this alone.",
    "Your vulnerability is your strength.",
    "This moment doesn't define your entire story.",
    "You are worthy of love, care, and understanding.",
    "Your mental health matters as much as your physical health.",
    "It's brave to ask for help when you need it.",
];

/// Picks a fallback reply.
pub fn choose_fallback<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    FALLBACK_REPLIES
        .choose(rng)
        .copied()
        .unwrap_or(FALLBACK_REPLIES[0])
}

/// Picks an encouragement quote.
pub fn choose_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    POSITIVE_QUOTES
        .choose(rng)
        .copied()
        .unwrap_or(POSITIVE_QUOTES[0])
}

// ============================================================================
// Crisis resources
// ============================================================================

/// How a resource is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceChannel {
    Call,
    Text,
    Web,
    Emergency,
}

/// One crisis support line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrisisResource {
    pub name: &'static str,
    pub contact: &'static str,
    pub description: &'static str,
    pub channel: ResourceChannel,
}

/// Static content shown when crisis language is detected.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrisisResources;

impl CrisisResources {
    pub const TITLE: &'static str = "Crisis Support Available";

    pub const SUBTITLE: &'static str = "You don't have to face this alone";

    pub const INTRO: &'static str = "I'm deeply concerned about what you've shared. \
While I'm here to support you, professional crisis counselors are specially trained to \
help with thoughts of self-harm. Please reach out to one of these resources for \
immediate, compassionate support:";

    pub const RESOURCES: &'static [CrisisResource] = &[
        CrisisResource {
            name: "National Suicide Prevention Lifeline",
            contact: "988",
            description: "24/7 crisis support in English and Spanish",
            channel: ResourceChannel::Call,
        },
        CrisisResource {
            name: "Crisis Text Line",
            contact: "Text HOME to 741741",
            description: "24/7 crisis support via text message",
            channel: ResourceChannel::Text,
        },
        CrisisResource {
            name: "International Association for Suicide Prevention",
            contact: "Visit iasp.info/resources",
            description: "Crisis centers worldwide",
            channel: ResourceChannel::Web,
        },
        CrisisResource {
            name: "Emergency Services",
            contact: "911 (US) / 112 (EU) / 000 (AU)",
            description: "Immediate emergency assistance",
            channel: ResourceChannel::Emergency,
        },
    ];

    pub const REMINDERS: &'static [&'static str] = &[
        "Crisis counselors are available 24/7 and genuinely want to help",
        "These overwhelming feelings can be temporary, even when they feel endless",
        "You deserve support, care, and compassion",
        "Many people have felt this way and found their path to healing",
        "Your story isn't over - there are chapters yet to be written",
    ];

    /// Renders the content as plain text for a terminal.
    pub fn render_plain(&self) -> String {
        let mut out = format!("{}\n{}\n\n{}\n\n", Self::TITLE, Self::SUBTITLE, Self::INTRO);
        for resource in Self::RESOURCES {
            out.push_str(&format!(
                "  {}: {}\n    {}\n",
                resource.name, resource.contact, resource.description
            ));
        }
        out.push_str("\nRemember, you are not alone:\n");
        for reminder in Self::REMINDERS {
            out.push_str(&format!("  - {reminder}\n"));
        }
        out
    }
}
