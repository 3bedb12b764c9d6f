//! Chat session orchestrator.
//!
//! Ties crisis detection, the phase controller, prompt assembly, the text
//! generator, reply sanitization, the transcript and speech output together
//! for one conversation. Collaborator failures never surface as errors: a
//! failed generation produces a fallback reply and leaves the context
//! untouched, and failed speech is logged and ignored.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::adapters::voice::{PlaybackController, UtteranceAccumulator, UtteranceOutcome};
use crate::domain::foundation::{DomainError, SessionId, StateMachine, UserId};
use crate::domain::wellness::{
    choose_fallback, CrisisDetector, Message, PhaseController, PhaseKind, PromptBuilder,
    ReplySanitizer, SanitizationError, SessionContext, Transcript, TOTAL_SOLUTION_STEPS,
    WELCOME_MESSAGE,
};
use crate::ports::{
    CrisisSurface, GenerationError, GenerationRequest, ProviderInfo, RecognitionError,
    SpeechRecognizer, SpeechSynthesizer, TextGenerator,
};

/// How the user is talking to the companion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Replies are spoken; input may come from the microphone.
    #[default]
    Voice,
    /// Replies are shown only.
    Text,
}

/// Session tunables.
#[derive(Debug, Clone)]
pub struct ChatSessionConfig {
    /// Upper bound on one generation call.
    pub generation_timeout: Duration,
    /// Mode every new session starts in.
    pub default_mode: InputMode,
    /// Quiet period that ends a spoken utterance.
    pub silence_timeout: Duration,
}

impl Default for ChatSessionConfig {
    fn default() -> Self {
        Self {
            generation_timeout: Duration::from_secs(30),
            default_mode: InputMode::Voice,
            silence_timeout: Duration::from_millis(2000),
        }
    }
}

/// What one user turn produced.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The assistant message appended to the transcript.
    pub message: Message,
    /// Phase the turn was handled in.
    pub phase: PhaseKind,
    pub crisis_detected: bool,
    /// True if the reply is a canned fallback.
    pub fallback: bool,
}

/// Result of listening for one spoken turn.
#[derive(Debug, Clone)]
pub enum VoiceTurn {
    Replied(TurnOutcome),
    /// Nothing usable was heard.
    NothingHeard,
    /// Recognition failed; show this text to the user.
    Advisory(String),
}

/// Programmer-level failures. Collaborator failures are absorbed.
#[derive(Debug, Clone, Error)]
pub enum TurnError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

#[derive(Debug, Error)]
enum ReplyFailure {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Sanitization(#[from] SanitizationError),
}

/// One conversation with the companion.
///
/// Turns are handled one at a time (`&mut self`). Playback can be stopped
/// from elsewhere through [`ChatSession::playback`].
pub struct ChatSession {
    id: SessionId,
    user_id: UserId,
    context: SessionContext,
    transcript: Transcript,
    input_mode: InputMode,
    config: ChatSessionConfig,

    generator: Arc<dyn TextGenerator>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    crisis_surface: Arc<dyn CrisisSurface>,

    detector: CrisisDetector,
    controller: PhaseController,
    prompt_builder: PromptBuilder,
    sanitizer: ReplySanitizer,
    accumulator: UtteranceAccumulator,

    playback: Arc<PlaybackController>,
    speech_task: Option<JoinHandle<()>>,
}

impl ChatSession {
    /// Creates a session holding only the welcome message.
    ///
    /// The welcome is not spoken; call [`ChatSession::start_new_session`]
    /// for a spoken start.
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        crisis_surface: Arc<dyn CrisisSurface>,
        config: ChatSessionConfig,
    ) -> Self {
        let mut session = Self {
            id: SessionId::new(),
            user_id: UserId::anonymous(),
            context: SessionContext::new(),
            transcript: Transcript::new(),
            input_mode: config.default_mode,
            accumulator: UtteranceAccumulator::new(config.silence_timeout),
            config,
            generator,
            synthesizer,
            crisis_surface,
            detector: CrisisDetector::new(),
            controller: PhaseController::default(),
            prompt_builder: PromptBuilder::new(),
            sanitizer: ReplySanitizer::new(),
            playback: Arc::new(PlaybackController::new()),
            speech_task: None,
        };
        session.append_welcome();
        session
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Turns
    // ─────────────────────────────────────────────────────────────────────────

    /// Handles one typed or transcribed user message.
    ///
    /// Returns `Ok(None)` for blank input, which records nothing.
    pub async fn handle_user_turn(&mut self, text: &str) -> Result<Option<TurnOutcome>, TurnError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        self.transcript
            .push(Message::from_user(self.user_id.clone(), text)?);

        let assessment = self.detector.assess(text);
        let crisis = assessment.is_crisis();
        if crisis {
            warn!(
                session_id = %self.id,
                rule = ?assessment.matched(),
                "Crisis language detected"
            );
            self.crisis_surface.raise();
        }

        let plan = self.controller.plan_turn(&self.context, crisis, text);
        let history = self
            .transcript
            .recent_before_last(self.prompt_builder.recent_window());
        let prompt = self
            .prompt_builder
            .build(&plan.directive_text(), history, text);

        debug!(
            session_id = %self.id,
            phase = ?plan.phase(),
            prompt_chars = prompt.chars().count(),
            "Requesting reply"
        );

        let generated = self.request_reply(prompt).await;
        let (reply, phase, fallback) = match generated {
            Ok(reply) => {
                let phase = plan.phase();
                self.commit(plan.complete(&reply));
                (reply, phase, false)
            }
            Err(error) => {
                warn!(
                    session_id = %self.id,
                    error = %error,
                    "Reply generation failed, using fallback"
                );
                let reply = choose_fallback(&mut rand::thread_rng()).to_string();
                (reply, self.context.current_phase(), true)
            }
        };

        let message = Message::from_assistant(reply)?;
        self.transcript.push(message.clone());
        self.speak(message.content());

        Ok(Some(TurnOutcome {
            message,
            phase,
            crisis_detected: crisis,
            fallback,
        }))
    }

    /// Listens for one spoken message and handles it as a turn.
    ///
    /// Stops any playback first so the companion does not hear itself. The
    /// recognizer comes from the embedder; the terminal binary has none.
    pub async fn handle_voice_input(
        &mut self,
        recognizer: &dyn SpeechRecognizer,
    ) -> Result<VoiceTurn, TurnError> {
        self.stop_playback();

        if !recognizer.is_available() {
            return Ok(VoiceTurn::Advisory(advisory_for(&RecognitionError::NotSupported)));
        }

        let events = match recognizer.listen() {
            Ok(events) => events,
            Err(error) => return Ok(VoiceTurn::Advisory(advisory_for(&error))),
        };

        let utterance = self.accumulator.collect(events).await;
        match utterance {
            UtteranceOutcome::Transcript(text) => Ok(self
                .handle_user_turn(&text)
                .await?
                .map(VoiceTurn::Replied)
                .unwrap_or(VoiceTurn::NothingHeard)),
            UtteranceOutcome::Silence => Ok(VoiceTurn::NothingHeard),
            UtteranceOutcome::Advisory(message) => Ok(VoiceTurn::Advisory(message)),
        }
    }

    async fn request_reply(&self, prompt: String) -> Result<String, ReplyFailure> {
        let request = GenerationRequest::new(prompt, self.id);
        let timeout = self.config.generation_timeout;

        let response = tokio::time::timeout(timeout, self.generator.generate(request))
            .await
            .map_err(|_| GenerationError::Timeout {
                timeout_secs: timeout.as_secs(),
            })??;

        Ok(self.sanitizer.sanitize(&response.content)?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Discards the conversation and starts over with a spoken welcome.
    pub fn start_new_session(&mut self) {
        self.stop_playback();
        self.id = SessionId::new();
        self.context = SessionContext::new();
        self.transcript.clear();
        self.input_mode = self.config.default_mode;
        self.append_welcome();

        info!(session_id = %self.id, mode = ?self.input_mode, "Started new session");
        self.speak(WELCOME_MESSAGE);
    }

    /// Switches input mode. Leaving voice mode silences playback.
    pub fn set_input_mode(&mut self, mode: InputMode) {
        if mode == InputMode::Text {
            self.stop_playback();
        }
        if mode != self.input_mode {
            info!(session_id = %self.id, ?mode, "Input mode changed");
        }
        self.input_mode = mode;
    }

    /// Stops any playback. Never fails.
    pub fn stop_playback(&self) {
        self.playback.stop();
    }

    /// Header text describing where the conversation is.
    pub fn phase_status_label(&self) -> String {
        match self.context.current_phase() {
            PhaseKind::Assessment => "A compassionate companion".to_string(),
            PhaseKind::Solution => format!(
                "Exploring solutions together (Step {}/{})",
                self.context.solution_step().min(TOTAL_SOLUTION_STEPS),
                TOTAL_SOLUTION_STEPS
            ),
            PhaseKind::Action => "Creating your action plan".to_string(),
            PhaseKind::FollowUp => "Checking your progress".to_string(),
        }
    }

    /// Waits until the current utterance finishes or is cancelled.
    pub async fn wait_for_speech(&mut self) {
        if let Some(task) = self.speech_task.take() {
            let _ = task.await;
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn messages(&self) -> &[Message] {
        self.transcript.messages()
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn is_voice_mode(&self) -> bool {
        self.input_mode == InputMode::Voice
    }

    /// Shared playback controller, for stopping speech from another task.
    pub fn playback(&self) -> Arc<PlaybackController> {
        Arc::clone(&self.playback)
    }

    pub fn provider_info(&self) -> ProviderInfo {
        self.generator.provider_info()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn commit(&mut self, next: SessionContext) {
        let from = self.context.current_phase();
        let to = next.current_phase();
        if from != to {
            match from.transition_to(to) {
                Ok(_) => info!(session_id = %self.id, ?from, ?to, "Phase advanced"),
                Err(error) => warn!(session_id = %self.id, %error, "Unexpected phase change"),
            }
        }
        self.context = next;
    }

    fn append_welcome(&mut self) {
        if let Ok(welcome) = Message::from_assistant(WELCOME_MESSAGE) {
            self.transcript.push(welcome);
        }
    }

    /// Speaks `text` in the background when voice output is on.
    fn speak(&mut self, text: &str) {
        if !self.is_voice_mode() || !self.synthesizer.is_available() {
            return;
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!("No async runtime; skipping speech");
            return;
        };

        let ticket = self.playback.begin();
        let synthesizer = Arc::clone(&self.synthesizer);
        let text = text.to_string();
        let session_id = self.id;

        self.speech_task = Some(runtime.spawn(async move {
            match synthesizer.speak(&text, ticket.token()).await {
                Ok(()) => debug!(generation = ticket.generation(), "Speech finished"),
                Err(error) if error.is_cancelled() => {
                    debug!(generation = ticket.generation(), "Speech cancelled")
                }
                Err(error) => warn!(%session_id, %error, "Speech synthesis failed"),
            }
        }));
    }
}

fn advisory_for(error: &RecognitionError) -> String {
    error
        .advisory_message()
        .unwrap_or_else(|| error.to_string())
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.playback.stop();
    }
}
