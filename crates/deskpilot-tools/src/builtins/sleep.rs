//! Step-pause tool.

use crate::builtins::utils::parse_args;
use crate::context::ToolContext;
use crate::tool::{Tool, ToolOutput};
use async_trait::async_trait;
use deskpilot_protocol::ToolError;
use log::debug;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct SleepArgs {
    ms: u64,
}

/// Suspends the current tool step for a number of milliseconds.
#[derive(Debug)]
pub struct SleepTool;

#[async_trait]
impl Tool for SleepTool {
    fn name(&self) -> &str {
        "sleep"
    }

    fn description(&self) -> &str {
        "A tool that waits for the given number of milliseconds before the next action"
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "ms": { "type": "integer", "description": "Milliseconds to wait" }
            },
            "required": ["ms"]
        })
    }

    async fn call(&self, _ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        let args: SleepArgs = parse_args(args)?;
        debug!("sleeping (ms={})", args.ms);
        tokio::time::sleep(Duration::from_millis(args.ms)).await;
        Ok(ToolOutput::text(format!(
            "Sure, I waited for {} ms",
            args.ms
        )))
    }
}
