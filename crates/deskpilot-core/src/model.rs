//! Model client seam: one streamed step of the conversation loop.

use async_trait::async_trait;
use deskpilot_tools::{ToolOutput, ToolSpec};
use futures_util::Stream;
use serde_json::Value;
use std::pin::Pin;
use thiserror::Error;

/// The model backend rejected or failed a request.
#[derive(Debug, Clone, Error)]
pub enum ModelError {
    /// The request could not be started.
    #[error("model request failed: {0}")]
    Request(String),
    /// The stream broke mid-step.
    #[error("model stream failed: {0}")]
    Stream(String),
}

/// One tool result fed back into the next step.
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// Name of the tool that produced the output.
    pub name: String,
    /// The dispatched output.
    pub output: ToolOutput,
}

/// Everything the model needs for one step of the loop.
#[derive(Debug, Clone)]
pub struct StepRequest {
    /// Instruction text plus the rendered transcript.
    pub system_prompt: String,
    /// The user's task for this conversation.
    pub prompt: String,
    /// Results of the tool calls from the previous step.
    pub tool_results: Vec<ToolResult>,
    /// Specs of every registered tool.
    pub tools: Vec<ToolSpec>,
}

/// Incremental model output within one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelDelta {
    /// A chunk of assistant text.
    Text(String),
    /// The model began emitting a tool call.
    ToolCallStarted { name: String },
    /// A tool call completed with its full arguments.
    ToolCall { name: String, arguments: Value },
}

/// Stream of deltas for one step.
pub type ModelStream = Pin<Box<dyn Stream<Item = Result<ModelDelta, ModelError>> + Send>>;

/// Streaming conversation backend.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Run one step and stream its deltas.
    async fn stream_step(&self, request: StepRequest) -> Result<ModelStream, ModelError>;
}
