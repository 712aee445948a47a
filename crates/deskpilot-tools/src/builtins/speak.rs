//! Text-to-speech tool.

use crate::builtins::utils::parse_args;
use crate::context::ToolContext;
use crate::tool::{Tool, ToolOutput};
use async_trait::async_trait;
use deskpilot_protocol::ToolError;
use log::debug;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
struct SpeakArgs {
    text: String,
}

/// Speaks the provided text through the speech engine.
#[derive(Debug)]
pub struct SpeakTool;

#[async_trait]
impl Tool for SpeakTool {
    fn name(&self) -> &str {
        "speak"
    }

    fn description(&self) -> &str {
        "A tool that speaks the provided text"
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "text": { "type": "string", "description": "The text to speak" }
            },
            "required": ["text"]
        })
    }

    async fn call(&self, ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        let args: SpeakArgs = parse_args(args)?;
        debug!("speaking text (len={})", args.text.len());
        ctx.services.speech.say(&args.text).await?;
        Ok(ToolOutput::text(format!(
            "Sure, I spoke the text: \"{}\"",
            args.text
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::SpeakTool;
    use crate::test_support::context_with_doubles;
    use crate::tool::{Tool, ToolOutput};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn speaks_and_confirms() {
        let (ctx, doubles) = context_with_doubles();
        let output = SpeakTool
            .call(&ctx, json!({ "text": "hello there" }))
            .await
            .expect("call");

        assert_eq!(
            output,
            ToolOutput::text("Sure, I spoke the text: \"hello there\"")
        );
        assert_eq!(doubles.speech.spoken.lock().clone(), vec!["hello there"]);
    }
}
