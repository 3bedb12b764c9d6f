//! Builds adapters and sessions from loaded configuration.

use std::sync::Arc;

use tracing::info;

use crate::adapters::ai::{ChatRelayConfig, ChatRelayProvider, GeminiConfig, GeminiProvider};
use crate::adapters::voice::{CommandAudioPlayer, ElevenLabsConfig, ElevenLabsSynthesizer};
use crate::config::{AiConfig, AiProvider, AppConfig, VoiceConfig};
use crate::ports::{CrisisSurface, SpeechError, SpeechSynthesizer, TextGenerator};

use super::handlers::{ChatSession, ChatSessionConfig};

/// Creates the configured text generator.
pub fn build_text_generator(config: &AiConfig) -> Arc<dyn TextGenerator> {
    let generator: Arc<dyn TextGenerator> = match config.provider {
        AiProvider::Gemini => Arc::new(GeminiProvider::new(
            GeminiConfig::new(config.gemini_api_key.clone())
                .with_model(config.model.clone())
                .with_base_url(config.base_url.clone())
                .with_timeout(config.timeout()),
        )),
        AiProvider::Relay => Arc::new(ChatRelayProvider::new(
            ChatRelayConfig::new(config.relay_url.clone()).with_timeout(config.timeout()),
        )),
    };

    let provider = generator.provider_info();
    info!(
        provider = %provider.name,
        model = %provider.model,
        configured = generator.is_configured(),
        "Text generator ready"
    );
    generator
}

/// Creates the ElevenLabs synthesizer playing through the configured command.
///
/// Without a key or voice the synthesizer reports itself unavailable and
/// sessions stay silent.
///
/// # Errors
///
/// - `Playback` if the player command is blank
pub fn build_speech_synthesizer(
    config: &VoiceConfig,
) -> Result<Arc<dyn SpeechSynthesizer>, SpeechError> {
    let player = CommandAudioPlayer::new(&config.player_command)?;
    let synthesizer = ElevenLabsSynthesizer::new(
        ElevenLabsConfig::new(config.elevenlabs_api_key.clone(), config.voice_id.clone())
            .with_base_url(config.base_url.clone()),
        Arc::new(player),
    );

    info!(
        available = synthesizer.is_available(),
        player = %config.player_command,
        "Speech synthesizer ready"
    );
    Ok(Arc::new(synthesizer))
}

/// Session settings derived from configuration.
pub fn session_config(config: &AppConfig) -> ChatSessionConfig {
    ChatSessionConfig {
        generation_timeout: config.ai.timeout(),
        default_mode: config.voice.default_mode,
        silence_timeout: config.voice.silence_timeout(),
    }
}

/// Wires a session from configuration.
///
/// # Errors
///
/// - `Playback` if the player command is blank
pub fn build_session(
    config: &AppConfig,
    crisis_surface: Arc<dyn CrisisSurface>,
) -> Result<ChatSession, SpeechError> {
    Ok(ChatSession::new(
        build_text_generator(&config.ai),
        build_speech_synthesizer(&config.voice)?,
        crisis_surface,
        session_config(config),
    ))
}
