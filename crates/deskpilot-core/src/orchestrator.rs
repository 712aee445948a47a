//! Conversation orchestrator: the step loop between model and tools.

use crate::error::CoreError;
use crate::instructions::{DEFAULT_INSTRUCTIONS, build_system_prompt};
use crate::model::{ModelClient, ModelDelta, StepRequest, ToolResult};
use crate::transcript::{Fragment, Transcript};
use chrono::Utc;
use deskpilot_config::ModelConfig;
use deskpilot_memory::{MemoryEntry, MemoryTable};
use deskpilot_protocol::{Role, SessionEvent};
use deskpilot_tools::{DesktopServices, ToolContext, ToolRegistry};
use futures_util::StreamExt;
use log::{debug, info, warn};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Drives one conversation at a time through the model step loop.
///
/// The transcript lock doubles as the run guard: at most one conversation is
/// in flight, and every append happens under it.
pub struct Orchestrator {
    model: Arc<dyn ModelClient>,
    registry: ToolRegistry,
    services: Arc<DesktopServices>,
    instructions: String,
    max_steps: usize,
    session_id: Uuid,
    transcript: Mutex<Transcript>,
}

impl Orchestrator {
    /// Build an orchestrator over a model, tool registry, and services.
    pub fn new(
        model: Arc<dyn ModelClient>,
        registry: ToolRegistry,
        services: Arc<DesktopServices>,
        config: &ModelConfig,
    ) -> Self {
        Self {
            model,
            registry,
            services,
            instructions: config
                .system_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_INSTRUCTIONS.to_string()),
            max_steps: config.max_steps,
            session_id: Uuid::new_v4(),
            transcript: Mutex::new(Transcript::new()),
        }
    }

    /// Session id shared by every run of this orchestrator.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Rendered transcript snapshot, for diagnostics and tests.
    pub async fn rendered_transcript(&self) -> String {
        self.transcript.lock().await.render()
    }

    /// Run one conversation to completion.
    ///
    /// Appends the start marker, persists the prompt best-effort, loops the
    /// model for at most `max_steps`, then appends the end marker. Hitting
    /// the step cap is a normal termination.
    pub async fn run_once(&self, prompt: &str) -> Result<(), CoreError> {
        let mut transcript = self.transcript.lock().await;
        info!("starting conversation (prompt_len={})", prompt.len());
        transcript.push(Fragment::ConversationStart {
            at: Utc::now(),
            prompt: prompt.to_string(),
        });

        self.persist_prompt(prompt).await;

        let ctx = ToolContext::new(self.session_id, self.services.clone());
        let mut tool_results: Vec<ToolResult> = Vec::new();

        for step in 0..self.max_steps {
            let request = StepRequest {
                system_prompt: build_system_prompt(
                    &self.instructions,
                    Utc::now(),
                    &transcript.render(),
                ),
                prompt: prompt.to_string(),
                tool_results: std::mem::take(&mut tool_results),
                tools: self.registry.specs(),
            };

            let mut stream = self.model.stream_step(request).await?;
            let mut calls: Vec<(String, Value)> = Vec::new();

            while let Some(delta) = stream.next().await {
                match delta? {
                    ModelDelta::Text(text) => {
                        transcript.push(Fragment::Text(text.clone()));
                        self.emit(SessionEvent::transcription(Role::User, text));
                    }
                    ModelDelta::ToolCallStarted { name } => {
                        debug!("tool call started (name={})", name);
                    }
                    ModelDelta::ToolCall { name, arguments } => {
                        let summary = tool_summary(&name, &arguments);
                        transcript.push(Fragment::ToolActivity(summary.clone()));
                        self.emit(SessionEvent::transcription(
                            Role::System,
                            format!("[{summary}]"),
                        ));
                        calls.push((name, arguments));
                    }
                }
            }

            if calls.is_empty() {
                debug!("conversation settled (steps={})", step + 1);
                break;
            }

            // Strictly in emission order; results feed the next step.
            for (name, arguments) in calls {
                let output = self.registry.dispatch(&ctx, &name, arguments).await;
                tool_results.push(ToolResult { name, output });
            }

            if step + 1 == self.max_steps {
                info!("step budget exhausted (max_steps={})", self.max_steps);
            }
        }

        transcript.push(Fragment::ConversationEnd);
        info!("conversation done");
        Ok(())
    }

    /// Best-effort persistence of the raw prompt into the prompts table.
    async fn persist_prompt(&self, prompt: &str) {
        let embedding = match self.services.embedder.embed(prompt).await {
            Ok(embedding) => embedding,
            Err(err) => {
                warn!("could not embed prompt for persistence: {err}");
                return;
            }
        };
        let entry = MemoryEntry::new(prompt, None, embedding);
        if let Err(err) = self.services.memory.write(MemoryTable::Prompts, entry).await {
            warn!("could not persist prompt: {err}");
        }
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(sink) = &self.services.event_sink {
            sink.emit(event);
        }
    }
}

/// One-line narration for a tool call.
fn tool_summary(name: &str, arguments: &Value) -> String {
    match name {
        "computer" => {
            let action = arguments
                .get("action")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            format!("Computer action: {action}")
        }
        "speak" => "Speaking...".to_string(),
        "sleep" => "Waiting...".to_string(),
        "get_clipboard" => "Reading the clipboard...".to_string(),
        "set_clipboard" => "Copying to the clipboard...".to_string(),
        "apps" => "Listing installed apps...".to_string(),
        "open_app" => {
            let app = arguments
                .get("app_name")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            format!("Opening app \"{app}\"")
        }
        "fetch_context" => "Fetching context...".to_string(),
        "store_context" => "Storing context...".to_string(),
        other => format!("Using tool \"{other}\""),
    }
}

#[cfg(test)]
mod tests {
    use super::tool_summary;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn summaries_name_the_action() {
        assert_eq!(
            tool_summary("computer", &json!({ "action": "left_click" })),
            "Computer action: left_click"
        );
        assert_eq!(
            tool_summary("open_app", &json!({ "app_name": "Slack" })),
            "Opening app \"Slack\""
        );
        assert_eq!(tool_summary("fetch_context", &json!({})), "Fetching context...");
        assert_eq!(tool_summary("custom", &json!({})), "Using tool \"custom\"");
    }

    #[test]
    fn summaries_survive_malformed_arguments() {
        assert_eq!(
            tool_summary("computer", &json!("not an object")),
            "Computer action: unknown"
        );
    }
}
