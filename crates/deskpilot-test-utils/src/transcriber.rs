//! Scripted transcribers.

use async_trait::async_trait;
use deskpilot_core::{Transcriber, TranscriptionError};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

/// Returns a fixed transcription and records the paths it was asked about.
pub struct FixedTranscriber {
    text: String,
    /// Paths transcribed so far.
    pub paths: Mutex<Vec<PathBuf>>,
}

impl FixedTranscriber {
    /// Build a transcriber that always yields `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            paths: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Transcriber for FixedTranscriber {
    async fn transcribe(&self, path: &Path) -> Result<String, TranscriptionError> {
        self.paths.lock().push(path.to_path_buf());
        Ok(self.text.clone())
    }
}

/// Always fails to transcribe.
pub struct FailingTranscriber;

#[async_trait]
impl Transcriber for FailingTranscriber {
    async fn transcribe(&self, _path: &Path) -> Result<String, TranscriptionError> {
        Err(TranscriptionError::new("backend offline"))
    }
}
