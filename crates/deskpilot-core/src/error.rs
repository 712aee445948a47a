//! Error types for the core orchestrator crate.

use crate::model::ModelError;
use crate::pipeline::TranscriptionError;
use deskpilot_capture::CaptureError;
use thiserror::Error;

/// Errors returned by orchestrator and pipeline operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Model request or stream error.
    #[error("model error: {0}")]
    Model(#[from] ModelError),
    /// Audio capture error.
    #[error("capture error: {0}")]
    Capture(#[from] CaptureError),
    /// Speech-to-text error.
    #[error("transcription error: {0}")]
    Transcription(#[from] TranscriptionError),
}
