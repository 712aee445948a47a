//! Memory tools: retrieving and storing conversational context.

use crate::builtins::utils::parse_args;
use crate::context::ToolContext;
use crate::tool::{Tool, ToolOutput};
use async_trait::async_trait;
use deskpilot_memory::{MemoryEntry, MemoryTable};
use deskpilot_protocol::ToolError;
use log::{info, warn};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
struct FetchContextArgs {
    prompt: String,
}

/// Retrieves the stored context closest to the given prompt.
#[derive(Debug)]
pub struct FetchContextTool;

#[async_trait]
impl Tool for FetchContextTool {
    fn name(&self) -> &str {
        "fetch_context"
    }

    fn description(&self) -> &str {
        "A tool that retrieves previously stored context relevant to the prompt"
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "prompt": {
                    "type": "string",
                    "description": "The prompt to find relevant context for"
                }
            },
            "required": ["prompt"]
        })
    }

    async fn call(&self, ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        let args: FetchContextArgs = parse_args(args)?;

        let query = match ctx.services.embedder.embed(&args.prompt).await {
            Ok(query) => query,
            Err(err) => {
                warn!("could not embed context query: {err}");
                return Ok(ToolOutput::text("Could not fetch context"));
            }
        };

        let entry = match ctx.services.memory.nearest_context(&query).await {
            Ok(entry) => entry,
            Err(err) => {
                warn!("context lookup failed: {err}");
                return Ok(ToolOutput::text("Could not fetch context"));
            }
        };

        let Some(entry) = entry else {
            return Ok(ToolOutput::text("No relevant context found"));
        };
        info!("fetched context (len={})", entry.text.len());
        let categories = entry.categories.unwrap_or_default().join(", ");
        Ok(ToolOutput::text(format!(
            "Context found (categories: {categories}):\n{}",
            entry.text
        )))
    }
}

#[derive(Debug, Deserialize)]
struct StoreContextArgs {
    context: String,
    #[serde(default)]
    categories: Vec<String>,
}

/// Stores a piece of context for later retrieval.
#[derive(Debug)]
pub struct StoreContextTool;

#[async_trait]
impl Tool for StoreContextTool {
    fn name(&self) -> &str {
        "store_context"
    }

    fn description(&self) -> &str {
        "A tool that stores context about the user for future conversations"
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "context": {
                    "type": "string",
                    "description": "The context to remember"
                },
                "categories": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Category labels for the context"
                }
            },
            "required": ["context"]
        })
    }

    async fn call(&self, ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        let args: StoreContextArgs = parse_args(args)?;

        // Categories are folded into the embedded text so retrieval can match
        // on them as well as on the context body.
        let embedded = format!(
            "categories: {}\n{}",
            args.categories.join(", "),
            args.context
        );
        let embedding = match ctx.services.embedder.embed(&embedded).await {
            Ok(embedding) => embedding,
            Err(err) => {
                warn!("could not embed context for storage: {err}");
                return Ok(ToolOutput::text(
                    "Sure, I noted that, but could not persist it for later",
                ));
            }
        };

        let entry = MemoryEntry::new(args.context, Some(args.categories), embedding);
        if let Err(err) = ctx.services.memory.write(MemoryTable::Context, entry).await {
            warn!("could not store context: {err}");
            return Ok(ToolOutput::text(
                "Sure, I noted that, but could not persist it for later",
            ));
        }
        info!("stored context entry");
        Ok(ToolOutput::text("Sure, I stored the context"))
    }
}
