//! Error types for capture operations.

use thiserror::Error;

/// The audio device could not be acquired or read.
#[derive(Debug, Clone, Error)]
#[error("audio device error: {0}")]
pub struct DeviceError(pub String);

impl DeviceError {
    /// Build a device error from any displayable cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors returned by the capture controller.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Device acquisition or frame read failed; the current capture attempt
    /// is aborted and the device released.
    #[error(transparent)]
    Device(#[from] DeviceError),
    /// A capture is already active; start requests are rejected, not queued.
    #[error("a capture is already active")]
    Busy,
    /// Toggle stop was requested with no toggled capture in flight.
    #[error("no toggled capture in flight")]
    NotRecording,
    /// Writing the scratch WAV file failed.
    #[error("scratch file error: {0}")]
    Scratch(#[from] hound::Error),
    /// The background capture task panicked or was cancelled.
    #[error("capture task failed: {0}")]
    Task(String),
}
