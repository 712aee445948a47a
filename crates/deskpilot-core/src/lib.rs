//! Core conversation loop for Deskpilot.
//!
//! Owns the transcript, the model-client seam, the orchestrator step loop,
//! and the inbound trigger pipeline that ties capture and transcription to
//! conversations.

pub mod error;
pub mod instructions;
pub mod model;
pub mod orchestrator;
pub mod pipeline;
pub mod transcript;

/// Core error type.
pub use error::CoreError;
/// System prompt assembly helpers.
pub use instructions::{DEFAULT_INSTRUCTIONS, build_system_prompt};
/// Model client seam types.
pub use model::{ModelClient, ModelDelta, ModelError, ModelStream, StepRequest, ToolResult};
/// Conversation orchestrator.
pub use orchestrator::Orchestrator;
/// Trigger pipeline and transcription seam.
pub use pipeline::{Transcriber, TranscriptionError, TriggerPipeline};
/// Append-only conversation transcript.
pub use transcript::{Fragment, Transcript};
