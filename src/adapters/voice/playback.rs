//! Playback cancellation.
//!
//! At most one utterance is live. Starting a new one cancels the previous
//! token; stopping cancels the current one. Each utterance gets a
//! generation number so stale completions can be told apart.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Handle for one utterance.
#[derive(Debug, Clone)]
pub struct PlaybackTicket {
    generation: u64,
    token: CancellationToken,
}

impl PlaybackTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Token to pass to the synthesizer.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Tracks the live utterance.
#[derive(Debug, Default)]
pub struct PlaybackController {
    current: Mutex<Option<CancellationToken>>,
    generation: AtomicU64,
}

impl PlaybackController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any live utterance and issues a ticket for a new one.
    pub fn begin(&self) -> PlaybackTicket {
        let token = CancellationToken::new();
        let previous = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(token.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, "Playback started");
        PlaybackTicket { generation, token }
    }

    /// Cancels the live utterance, if any. Safe to call in any state.
    pub fn stop(&self) {
        let current = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(token) = current {
            debug!(generation = self.generation(), "Playback stopped");
            token.cancel();
        }
    }

    /// Generation of the most recent ticket, 0 before the first.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Returns true if `ticket` belongs to the most recent utterance.
    pub fn is_current(&self, ticket: &PlaybackTicket) -> bool {
        ticket.generation == self.generation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_cancels_previous_ticket() {
        let controller = PlaybackController::new();
        let first = controller.begin();
        let second = controller.begin();

        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert!(!controller.is_current(&first));
        assert!(controller.is_current(&second));
    }

    #[test]
    fn generations_increase() {
        let controller = PlaybackController::new();
        assert_eq!(controller.generation(), 0);
        assert_eq!(controller.begin().generation(), 1);
        assert_eq!(controller.begin().generation(), 2);
    }

    #[test]
    fn stop_cancels_current_and_is_idempotent() {
        let controller = PlaybackController::new();
        let ticket = controller.begin();

        controller.stop();
        controller.stop();

        assert!(ticket.is_cancelled());
    }

    #[test]
    fn stop_before_any_playback_is_harmless() {
        PlaybackController::new().stop();
    }
}
