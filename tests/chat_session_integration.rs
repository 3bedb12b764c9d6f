//! Full conversations through `ChatSession` with mock adapters.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use wellness_companion::adapters::ai::MockTextGenerator;
use wellness_companion::adapters::crisis::WatchCrisisSurface;
use wellness_companion::adapters::voice::MockSpeechSynthesizer;
use wellness_companion::application::{ChatSession, ChatSessionConfig, InputMode};
use wellness_companion::domain::wellness::{
    ConversationPhase, PhaseKind, SessionContext, FALLBACK_REPLIES, WELCOME_MESSAGE,
};
use wellness_companion::ports::GenerationError;

fn session_with(
    generator: &MockTextGenerator,
    synthesizer: &MockSpeechSynthesizer,
    crisis: &Arc<WatchCrisisSurface>,
) -> ChatSession {
    ChatSession::new(
        Arc::new(generator.clone()),
        Arc::new(synthesizer.clone()),
        crisis.clone(),
        ChatSessionConfig {
            default_mode: InputMode::Text,
            ..Default::default()
        },
    )
}

async fn say(session: &mut ChatSession, text: &str) -> PhaseKind {
    session
        .handle_user_turn(text)
        .await
        .expect("turn should not error")
        .expect("non-blank text should produce a reply")
        .phase
}

#[tokio::test]
async fn conversation_walks_through_every_phase() {
    let generator = MockTextGenerator::new();
    let synthesizer = MockSpeechSynthesizer::new();
    let crisis = Arc::new(WatchCrisisSurface::new());
    let mut session = session_with(&generator, &synthesizer, &crisis);

    // Three clarifying questions, then the approach is introduced.
    assert_eq!(say(&mut session, "I can't sleep").await, PhaseKind::Assessment);
    assert_eq!(say(&mut session, "About a month").await, PhaseKind::Assessment);
    assert_eq!(say(&mut session, "Work stress mostly").await, PhaseKind::Assessment);
    assert_eq!(say(&mut session, "I lie awake worrying").await, PhaseKind::Solution);
    assert_eq!(
        session.phase_status_label(),
        "Exploring solutions together (Step 1/2)"
    );

    // Each acknowledged step moves on.
    assert_eq!(say(&mut session, "okay").await, PhaseKind::Solution);
    assert_eq!(session.context().solution_step(), 2);
    assert_eq!(say(&mut session, "what else?").await, PhaseKind::Solution);
    assert_eq!(say(&mut session, "sounds good").await, PhaseKind::Solution);
    assert_eq!(session.context().solution_step(), 3);

    // Past the last step the summary moves the session into action.
    assert_eq!(say(&mut session, "I see").await, PhaseKind::Action);
    assert_eq!(session.phase_status_label(), "Creating your action plan");

    generator.push_response("Try writing tomorrow's worries down before bed.");
    assert_eq!(say(&mut session, "What should I do first?").await, PhaseKind::Action);
    assert_eq!(
        session.context().action_plan(),
        "Try writing tomorrow's worries down before bed."
    );
    assert_eq!(session.context().message_count(), 9);
    assert!(!crisis.is_raised());
    assert!(synthesizer.spoken().is_empty());
}

#[tokio::test]
async fn phases_never_return_to_assessment() {
    let generator = MockTextGenerator::new();
    let synthesizer = MockSpeechSynthesizer::new();
    let crisis = Arc::new(WatchCrisisSurface::new());
    let mut session = session_with(&generator, &synthesizer, &crisis);

    let mut highest = PhaseKind::Assessment;
    for turn in 0..20 {
        let text = if turn % 2 == 0 { "okay" } else { "hmm" };
        say(&mut session, text).await;
        let current = session.context().current_phase();
        assert!(current.ordinal() >= highest.ordinal());
        highest = current;
    }
    assert_ne!(highest, PhaseKind::Assessment);
}

#[tokio::test]
async fn failed_turns_do_not_move_the_conversation() {
    let generator = MockTextGenerator::new()
        .with_response("How long has this been happening?")
        .with_error(GenerationError::network("connection reset"))
        .with_error(GenerationError::Timeout { timeout_secs: 30 });
    let synthesizer = MockSpeechSynthesizer::new();
    let crisis = Arc::new(WatchCrisisSurface::new());
    let mut session = session_with(&generator, &synthesizer, &crisis);

    say(&mut session, "I feel low").await;
    let after_first = session.context().clone();

    for text in ["Are you there?", "Hello?"] {
        let outcome = session.handle_user_turn(text).await.unwrap().unwrap();
        assert!(outcome.fallback);
        assert!(FALLBACK_REPLIES.contains(&outcome.message.content()));
    }

    assert_eq!(session.context(), &after_first);
    assert_eq!(session.messages().len(), 7);
}

#[tokio::test]
async fn crisis_mid_conversation_keeps_phase_logic_running() {
    let generator = MockTextGenerator::new();
    let synthesizer = MockSpeechSynthesizer::new();
    let crisis = Arc::new(WatchCrisisSurface::new());
    let mut session = session_with(&generator, &synthesizer, &crisis);
    let mut alerts = crisis.subscribe();

    say(&mut session, "Things are bad").await;
    let outcome = session
        .handle_user_turn("Sometimes I think I'm better off dead")
        .await
        .unwrap()
        .unwrap();

    assert!(outcome.crisis_detected);
    assert!(alerts.has_changed().unwrap());
    assert!(*alerts.borrow_and_update());
    assert_eq!(session.context().questions_asked(), 2);
    assert!(generator
        .last_prompt()
        .unwrap()
        .contains("Client: \"Sometimes I think I'm better off dead\""));
}

#[tokio::test(start_paused = true)]
async fn crisis_resources_appear_before_the_reply_arrives() {
    let generator = MockTextGenerator::new().with_delay(Duration::from_secs(10));
    let synthesizer = MockSpeechSynthesizer::new();
    let crisis = Arc::new(WatchCrisisSurface::new());
    let mut session = session_with(&generator, &synthesizer, &crisis);

    let shown = Arc::new(AtomicUsize::new(0));
    let counter = shown.clone();
    let listener = crisis.spawn_alert_listener(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let turn = tokio::spawn(async move {
        session
            .handle_user_turn("Sometimes I think I'm better off dead")
            .await
    });
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(shown.load(Ordering::SeqCst), 1);
    assert!(!crisis.is_raised());
    assert!(!turn.is_finished());

    let outcome = turn.await.unwrap().unwrap().unwrap();
    assert!(outcome.crisis_detected);
    assert!(!outcome.fallback);
    assert_eq!(shown.load(Ordering::SeqCst), 1);
    listener.abort();
}

#[tokio::test]
async fn restart_returns_to_a_fresh_session() {
    let generator = MockTextGenerator::new();
    let synthesizer = MockSpeechSynthesizer::new();
    let crisis = Arc::new(WatchCrisisSurface::new());
    let mut session = session_with(&generator, &synthesizer, &crisis);

    for text in ["one", "two", "three", "four"] {
        say(&mut session, text).await;
    }
    session.start_new_session();

    assert_eq!(session.context(), &SessionContext::new());
    assert_eq!(
        session.context().phase(),
        &ConversationPhase::Assessment { questions_asked: 0 }
    );
    assert_eq!(session.messages().len(), 1);
    assert_eq!(session.messages()[0].content(), WELCOME_MESSAGE);
}

#[tokio::test(start_paused = true)]
async fn voice_session_speaks_and_can_be_silenced() {
    let generator = MockTextGenerator::new().with_response("I'm listening.");
    let synthesizer = MockSpeechSynthesizer::new().with_duration(Duration::from_secs(30));
    let crisis = Arc::new(WatchCrisisSurface::new());
    let mut session = ChatSession::new(
        Arc::new(generator.clone()),
        Arc::new(synthesizer.clone()),
        crisis.clone(),
        ChatSessionConfig::default(),
    );
    assert!(session.is_voice_mode());

    session.handle_user_turn("hello").await.unwrap();
    tokio::task::yield_now().await;

    let playback = session.playback();
    playback.stop();
    session.wait_for_speech().await;

    assert_eq!(synthesizer.cancelled(), vec!["I'm listening."]);

    session.set_input_mode(InputMode::Text);
    session.handle_user_turn("still there?").await.unwrap();
    session.wait_for_speech().await;
    assert_eq!(synthesizer.spoken().len(), 1);
}
