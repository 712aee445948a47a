//! Registry for tool implementations.

use crate::context::ToolContext;
use crate::tool::{Tool, ToolOutput, ToolSpec};
use log::{debug, warn};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory registry for tool implementations.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    /// Map of tool name to implementation.
    tools: Arc<RwLock<HashMap<String, Arc<dyn Tool>>>>,
}

impl ToolRegistry {
    /// Create an empty tool registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool by name.
    pub fn register(&self, tool: Arc<dyn Tool>) {
        debug!("registering tool (name={})", tool.name());
        self.tools.write().insert(tool.name().to_string(), tool);
    }

    /// Fetch a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.read().get(name).cloned()
    }

    /// List all registered tool names.
    pub fn list(&self) -> Vec<String> {
        self.tools.read().keys().cloned().collect()
    }

    /// Return tool specs for all registered tools.
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.read().values().map(|tool| tool.spec()).collect()
    }

    /// Invoke a tool by name, converting every failure into a text result.
    ///
    /// The model always receives a well-formed tool result: unknown names,
    /// malformed arguments, and executor errors all come back as plain text.
    pub async fn dispatch(&self, ctx: &ToolContext, name: &str, args: Value) -> ToolOutput {
        let Some(tool) = self.get(name) else {
            warn!("tool not found (name={})", name);
            return ToolOutput::text(format!("Tool \"{name}\" is not available"));
        };

        let mut ctx = ctx.clone();
        ctx.tool_name = Some(name.to_string());
        debug!("dispatching tool (name={})", name);
        match tool.call(&ctx, args).await {
            Ok(output) => output,
            Err(err) => {
                warn!("tool call failed (name={}): {}", name, err);
                ToolOutput::text(format!("Tool \"{name}\" failed: {err}"))
            }
        }
    }
}
