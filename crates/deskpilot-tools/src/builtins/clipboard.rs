//! Clipboard access tools.

use crate::builtins::utils::parse_args;
use crate::context::ToolContext;
use crate::tool::{Tool, ToolOutput};
use async_trait::async_trait;
use deskpilot_protocol::ToolError;
use log::debug;
use serde::Deserialize;
use serde_json::{Value, json};

/// Reads the system clipboard.
#[derive(Debug)]
pub struct GetClipboardTool;

#[async_trait]
impl Tool for GetClipboardTool {
    fn name(&self) -> &str {
        "get_clipboard"
    }

    fn description(&self) -> &str {
        "A tool that returns the current clipboard contents"
    }

    fn args_schema(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    async fn call(&self, ctx: &ToolContext, _args: Value) -> Result<ToolOutput, ToolError> {
        let text = ctx.services.actuator.clipboard_get().await?;
        debug!("read clipboard (len={})", text.len());
        Ok(ToolOutput::text(format!(
            "The clipboard contains: \"{text}\""
        )))
    }
}

#[derive(Debug, Deserialize)]
struct SetClipboardArgs {
    text: String,
}

/// Replaces the system clipboard contents.
#[derive(Debug)]
pub struct SetClipboardTool;

#[async_trait]
impl Tool for SetClipboardTool {
    fn name(&self) -> &str {
        "set_clipboard"
    }

    fn description(&self) -> &str {
        "A tool that copies the provided text to the clipboard"
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "text": { "type": "string", "description": "The text to copy" }
            },
            "required": ["text"]
        })
    }

    async fn call(&self, ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        let args: SetClipboardArgs = parse_args(args)?;
        debug!("writing clipboard (len={})", args.text.len());
        ctx.services.actuator.clipboard_set(&args.text).await?;
        Ok(ToolOutput::text("Sure, I copied the text to the clipboard"))
    }
}

#[cfg(test)]
mod tests {
    use super::{GetClipboardTool, SetClipboardTool};
    use crate::test_support::context_with_doubles;
    use crate::tool::{Tool, ToolOutput};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let (ctx, _doubles) = context_with_doubles();
        let set = SetClipboardTool
            .call(&ctx, json!({ "text": "meeting at 4pm" }))
            .await
            .expect("set");
        assert_eq!(
            set,
            ToolOutput::text("Sure, I copied the text to the clipboard")
        );

        let get = GetClipboardTool.call(&ctx, json!({})).await.expect("get");
        assert_eq!(
            get,
            ToolOutput::text("The clipboard contains: \"meeting at 4pm\"")
        );
    }
}
