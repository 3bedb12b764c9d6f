//! Command Audio Player - Pipes audio into an external player process.
//!
//! The command is split on whitespace; the audio is written to its stdin.
//! The default `ffplay -nodisp -autoexit -loglevel quiet -` plays MP3 from
//! stdin and exits when done. On cancellation the child is killed.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::ports::{AudioPlayer, SpeechError};

/// Default player command.
pub const DEFAULT_PLAYER_COMMAND: &str = "ffplay -nodisp -autoexit -loglevel quiet -";

/// Audio player backed by an external process.
#[derive(Debug, Clone)]
pub struct CommandAudioPlayer {
    program: String,
    args: Vec<String>,
}

impl CommandAudioPlayer {
    /// Parses a command line.
    ///
    /// # Errors
    ///
    /// - `Playback` if the command is blank
    pub fn new(command: &str) -> Result<Self, SpeechError> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| SpeechError::Playback("player command is empty".to_string()))?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

#[async_trait]
impl AudioPlayer for CommandAudioPlayer {
    async fn play(&self, audio: Vec<u8>, cancel: CancellationToken) -> Result<(), SpeechError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| SpeechError::Playback(format!("failed to start {}: {}", self.program, e)))?;

        debug!(program = %self.program, bytes = audio.len(), "Started audio player");

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| SpeechError::Playback("player stdin unavailable".to_string()))?;

        let write = async move {
            stdin.write_all(&audio).await?;
            stdin.shutdown().await
        };

        tokio::select! {
            _ = cancel.cancelled() => {
                let _ = child.kill().await;
                return Err(SpeechError::Cancelled);
            }
            written = write => {
                // A player that exits early closes its stdin; the exit status decides.
                if let Err(e) = written {
                    debug!(error = %e, "Audio player stopped reading");
                }
            }
        }

        tokio::select! {
            _ = cancel.cancelled() => {
                let _ = child.kill().await;
                Err(SpeechError::Cancelled)
            }
            status = child.wait() => {
                let status = status.map_err(|e| SpeechError::Playback(e.to_string()))?;
                if status.success() {
                    Ok(())
                } else {
                    Err(SpeechError::Playback(format!("{} exited with {}", self.program, status)))
                }
            }
        }
    }
}
