//! Microphone capture state machine.
//!
//! Owns the one-shot and toggled recording flows, the process-wide
//! mutual-exclusion flag, and the scratch WAV file handed to transcription.

pub mod controller;
pub mod device;
pub mod error;

/// Capture controller state machine.
pub use controller::CaptureController;
/// Audio collaborator traits and the finished-capture payload.
pub use device::{AudioDevice, AudioSource, RecordedAudio};
/// Capture error types.
pub use error::{CaptureError, DeviceError};
