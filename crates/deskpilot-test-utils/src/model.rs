//! Scripted model clients.

use async_trait::async_trait;
use deskpilot_core::{ModelClient, ModelDelta, ModelError, ModelStream, StepRequest};
use futures_util::stream;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Plays back pre-scripted steps and records every request it receives.
///
/// Each inner `Vec<ModelDelta>` is one step; once the script runs out the
/// model yields empty steps, which end the conversation loop.
#[derive(Default)]
pub struct ScriptedModel {
    steps: Mutex<VecDeque<Vec<ModelDelta>>>,
    /// Requests seen so far, in order.
    pub requests: Mutex<Vec<StepRequest>>,
}

impl ScriptedModel {
    /// Build a model that plays the given steps in order.
    pub fn new(steps: Vec<Vec<ModelDelta>>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of steps the orchestrator has requested.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl ModelClient for ScriptedModel {
    async fn stream_step(&self, request: StepRequest) -> Result<ModelStream, ModelError> {
        self.requests.lock().push(request);
        let deltas = self.steps.lock().pop_front().unwrap_or_default();
        Ok(Box::pin(stream::iter(deltas.into_iter().map(Ok))))
    }
}

/// Always fails to start a step.
pub struct FailingModel;

#[async_trait]
impl ModelClient for FailingModel {
    async fn stream_step(&self, _request: StepRequest) -> Result<ModelStream, ModelError> {
        Err(ModelError::Request("backend offline".to_string()))
    }
}
