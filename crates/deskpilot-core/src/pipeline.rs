//! Inbound trigger handling: capture, acknowledgment, transcription, run.

use crate::error::CoreError;
use crate::orchestrator::Orchestrator;
use async_trait::async_trait;
use deskpilot_capture::{CaptureController, CaptureError};
use deskpilot_protocol::{Trigger, TriggerEvent, TriggerSource};
use deskpilot_tools::SpeechEngine;
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Speech-to-text failed on the captured audio.
#[derive(Debug, Clone, Error)]
#[error("transcription failed: {0}")]
pub struct TranscriptionError(pub String);

impl TranscriptionError {
    /// Build a transcription error from any displayable cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Turns a finished WAV capture into text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe the audio file at `path`.
    async fn transcribe(&self, path: &Path) -> Result<String, TranscriptionError>;
}

/// Routes session-boundary triggers into captures and conversations.
pub struct TriggerPipeline {
    capture: Arc<CaptureController>,
    transcriber: Arc<dyn Transcriber>,
    speech: Arc<dyn SpeechEngine>,
    orchestrator: Arc<Orchestrator>,
    one_shot_frames: usize,
    first_run: AtomicBool,
}

impl TriggerPipeline {
    /// Build a pipeline over the capture controller and orchestrator.
    pub fn new(
        capture: Arc<CaptureController>,
        transcriber: Arc<dyn Transcriber>,
        speech: Arc<dyn SpeechEngine>,
        orchestrator: Arc<Orchestrator>,
        one_shot_frames: usize,
    ) -> Self {
        Self {
            capture,
            transcriber,
            speech,
            orchestrator,
            one_shot_frames,
            first_run: AtomicBool::new(true),
        }
    }

    /// Handle one inbound trigger.
    ///
    /// `start` runs the one-shot voice path; `start-text` feeds the literal
    /// task text straight into the orchestrator. Triggers from unknown
    /// sources are ignored.
    pub async fn handle(&self, trigger: Trigger) -> Result<(), CoreError> {
        if trigger.source != TriggerSource::Renderer {
            warn!("ignoring trigger from unknown source");
            return Ok(());
        }

        match trigger.event {
            TriggerEvent::Start => self.capture_and_run().await,
            TriggerEvent::StartText => {
                let Some(text) = trigger.data else {
                    warn!("start-text trigger without text, ignoring");
                    return Ok(());
                };
                info!("starting text conversation (len={})", text.len());
                self.orchestrator.run_once(&text).await
            }
        }
    }

    /// Begin a toggled capture; a second start while busy is a no-op.
    pub fn toggle_start(&self) {
        self.capture.toggle_start();
    }

    /// Stop the toggled capture and run the conversation on its audio.
    pub async fn toggle_stop_and_run(&self) -> Result<(), CoreError> {
        match self.capture.toggle_stop().await {
            Ok(_) => (),
            Err(CaptureError::NotRecording) => {
                warn!("toggle stop without an active capture, ignoring");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        }
        self.transcribe_and_run().await
    }

    /// One-shot capture path; a busy controller turns the trigger into a
    /// logged no-op.
    async fn capture_and_run(&self) -> Result<(), CoreError> {
        match self.capture.one_shot(self.one_shot_frames).await {
            Ok(_) => (),
            Err(CaptureError::Busy) => {
                info!("already recording, skipping trigger");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        }
        self.transcribe_and_run().await
    }

    async fn transcribe_and_run(&self) -> Result<(), CoreError> {
        self.acknowledge().await;
        let text = self
            .transcriber
            .transcribe(self.capture.scratch_path())
            .await?;
        info!("transcription done (len={})", text.len());
        self.orchestrator.run_once(&text).await
    }

    /// Best-effort spoken acknowledgment; longer phrasing on the first run.
    async fn acknowledge(&self) {
        let line = if self.first_run.swap(false, Ordering::SeqCst) {
            "Ok, let me process that"
        } else {
            "Ok"
        };
        if let Err(err) = self.speech.say(line).await {
            warn!("could not speak acknowledgment: {err}");
        }
    }
}
