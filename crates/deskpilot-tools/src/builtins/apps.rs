//! Application enumeration and launching tools.

use crate::builtins::utils::parse_args;
use crate::context::ToolContext;
use crate::tool::{Tool, ToolOutput};
use async_trait::async_trait;
use deskpilot_protocol::ToolError;
use log::{info, warn};
use serde::Deserialize;
use serde_json::{Value, json};

/// Built-in note-taking surface, always present in the catalog.
const SYNTHETIC_NOTES_APP: &str = "notes";

/// Installed apps plus the built-in notes entry.
async fn catalog_names(ctx: &ToolContext) -> Result<Vec<String>, ToolError> {
    let mut apps = ctx.services.apps.installed().await?;
    apps.push(SYNTHETIC_NOTES_APP.to_string());
    Ok(apps)
}

/// Lists the installed applications.
#[derive(Debug)]
pub struct AppsTool;

#[async_trait]
impl Tool for AppsTool {
    fn name(&self) -> &str {
        "apps"
    }

    fn description(&self) -> &str {
        "A tool that lists the installed apps"
    }

    fn args_schema(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    async fn call(&self, ctx: &ToolContext, _args: Value) -> Result<ToolOutput, ToolError> {
        let apps = catalog_names(ctx).await?;
        let listing = apps
            .iter()
            .map(|name| format!("- {name}"))
            .collect::<Vec<_>>()
            .join("\n");
        Ok(ToolOutput::text(format!("Installed apps\n{listing}")))
    }
}

#[derive(Debug, Deserialize)]
struct OpenAppArgs {
    app_name: String,
}

/// Opens an application by name, case-insensitively.
#[derive(Debug)]
pub struct OpenAppTool;

#[async_trait]
impl Tool for OpenAppTool {
    fn name(&self) -> &str {
        "open_app"
    }

    fn description(&self) -> &str {
        "A tool that opens the specified application"
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "app_name": { "type": "string", "description": "The name of the app to open" }
            },
            "required": ["app_name"]
        })
    }

    async fn call(&self, ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        let args: OpenAppArgs = parse_args(args)?;
        let apps = catalog_names(ctx).await?;
        let wanted = args.app_name.to_lowercase();
        let Some(app) = apps.iter().find(|name| name.to_lowercase() == wanted) else {
            info!("app not found (name={})", args.app_name);
            return Ok(ToolOutput::text(format!(
                "App \"{}\" not found",
                args.app_name
            )));
        };

        info!("opening app (name={})", app);
        if let Err(err) = ctx.services.apps.launch(app).await {
            warn!("could not open app (name={}): {}", app, err);
            return Ok(ToolOutput::text(format!("Could not open app \"{app}\"")));
        }
        Ok(ToolOutput::text(format!("Sure, I opened the app \"{app}\"")))
    }
}
