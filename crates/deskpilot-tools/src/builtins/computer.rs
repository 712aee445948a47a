//! Desktop control tool covering the computer-use action set.

use crate::actuator::{MouseButton, Point, VirtualDisplay};
use crate::builtins::utils::parse_args;
use crate::context::ToolContext;
use crate::tool::{Tool, ToolOutput};
use async_trait::async_trait;
use deskpilot_protocol::ToolError;
use log::debug;
use serde::Deserialize;
use serde_json::{Value, json};

/// Wheel ticks used when a page key is remapped to a scroll.
const PAGE_SCROLL_TICKS: i64 = 10;

#[derive(Debug, Deserialize)]
struct ComputerArgs {
    action: String,
    coordinate: Option<[i64; 2]>,
    text: Option<String>,
}

/// Screen, mouse, and keyboard control.
#[derive(Debug)]
pub struct ComputerTool;

#[async_trait]
impl Tool for ComputerTool {
    fn name(&self) -> &str {
        "computer"
    }

    fn description(&self) -> &str {
        "Controls the screen, mouse, and keyboard of the user's computer"
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "action": {
                    "type": "string",
                    "description": "One of: screenshot, mouse_move, left_click, double_click, right_click, middle_click, cursor_position, left_click_drag, type, key"
                },
                "coordinate": {
                    "type": "array",
                    "items": { "type": "integer" },
                    "description": "Target (x, y) in the scaled-down display resolution"
                },
                "text": {
                    "type": "string",
                    "description": "Text to type or key chord to press"
                }
            },
            "required": ["action"]
        })
    }

    async fn call(&self, ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        let args: ComputerArgs = parse_args(args)?;
        debug!("computer action (action={})", args.action);

        let actuator = ctx.services.actuator.as_ref();
        let display = ctx.services.display;

        match args.action.as_str() {
            "screenshot" => {
                let shot = actuator.screenshot().await?;
                Ok(ToolOutput::Image {
                    data: shot.data,
                    media_type: shot.media_type,
                })
            }
            "mouse_move" => {
                let Some(target) = physical_target(&args, display) else {
                    return Ok(ToolOutput::text(
                        "No coordinate provided for a mouse move action",
                    ));
                };
                actuator.move_cursor(target).await?;
                actuator.highlight(target).await?;
                Ok(ToolOutput::text(format!(
                    "Sure, I moved the mouse to ({}, {})",
                    target.x, target.y
                )))
            }
            "left_click" => {
                position_if_given(ctx, &args).await?;
                actuator.click(MouseButton::Left).await?;
                Ok(ToolOutput::text("Sure, I clicked the left mouse button"))
            }
            "double_click" => {
                position_if_given(ctx, &args).await?;
                actuator.click(MouseButton::Left).await?;
                actuator.click(MouseButton::Left).await?;
                Ok(ToolOutput::text(
                    "Sure, I double clicked the left mouse button",
                ))
            }
            "right_click" => {
                actuator.click(MouseButton::Right).await?;
                Ok(ToolOutput::text("Sure, I clicked the right mouse button"))
            }
            "middle_click" => {
                actuator.click(MouseButton::Middle).await?;
                Ok(ToolOutput::text("Sure, I clicked the middle mouse button"))
            }
            "cursor_position" => {
                let position = display.to_virtual(actuator.cursor_position().await?);
                Ok(ToolOutput::text(format!(
                    "The cursor is at ({}, {})",
                    position.x, position.y
                )))
            }
            "left_click_drag" => {
                let Some(coordinate) = args.coordinate else {
                    return Ok(ToolOutput::text(
                        "No coordinate provided for a left click drag action",
                    ));
                };
                let target = display.to_physical(Point::new(coordinate[0], coordinate[1]));
                actuator.drag(target).await?;
                Ok(ToolOutput::text(format!(
                    "Sure, I dragged the mouse to ({}, {})",
                    coordinate[0], coordinate[1]
                )))
            }
            "type" => {
                let Some(text) = args.text.as_deref() else {
                    return Ok(ToolOutput::text("No text provided for a type action"));
                };
                for line in text.split('\n') {
                    actuator.type_text(line).await?;
                    actuator.press_keys(&["enter".to_string()]).await?;
                }
                Ok(ToolOutput::text(format!(
                    "Sure, I typed the text: \"{text}\""
                )))
            }
            "key" => {
                let Some(text) = args.text.as_deref() else {
                    return Ok(ToolOutput::text("No text provided for a key action"));
                };
                // Page keys are remapped to wheel scrolls; kept as-is from
                // the original behavior, directions included.
                if text == "Page_Down" {
                    actuator.scroll(PAGE_SCROLL_TICKS).await?;
                    return Ok(ToolOutput::text("Sure, I pressed the Page Down key"));
                }
                if text == "Page_Up" {
                    actuator.scroll(-PAGE_SCROLL_TICKS).await?;
                    return Ok(ToolOutput::text("Sure, I pressed the Page Up key"));
                }
                let keys = parse_key_chord(text);
                debug!("pressing keys (keys={})", keys.join("+"));
                actuator.press_keys(&keys).await?;
                Ok(ToolOutput::text(format!(
                    "Sure, I pressed the key/s \"{}\"",
                    keys.join("+")
                )))
            }
            _ => Ok(ToolOutput::text("Action not supported")),
        }
    }
}

/// Scale the optional coordinate up to physical pixels.
fn physical_target(args: &ComputerArgs, display: VirtualDisplay) -> Option<Point> {
    args.coordinate
        .map(|[x, y]| display.to_physical(Point::new(x, y)))
}

/// Move and highlight before a positioned click, when a coordinate is given.
async fn position_if_given(ctx: &ToolContext, args: &ComputerArgs) -> Result<(), ToolError> {
    let Some(target) = physical_target(args, ctx.services.display) else {
        return Ok(());
    };
    ctx.services.actuator.move_cursor(target).await?;
    ctx.services.actuator.highlight(target).await?;
    Ok(())
}

/// Parse an `a+b+c` chord into normalized key names.
fn parse_key_chord(text: &str) -> Vec<String> {
    text.split('+')
        .map(|part| {
            let key = part.trim().to_lowercase();
            match key.as_str() {
                "control" => "ctrl".to_string(),
                "return" => "enter".to_string(),
                _ => key,
            }
        })
        .filter(|key| !key.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{ComputerTool, parse_key_chord};
    use crate::test_support::context_with_doubles;
    use crate::tool::{Tool, ToolOutput};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn click_coordinates_are_scaled_up() {
        let (ctx, doubles) = context_with_doubles();
        let output = ComputerTool
            .call(
                &ctx,
                json!({ "action": "left_click", "coordinate": [100, 200] }),
            )
            .await
            .expect("call");

        assert_eq!(
            output,
            ToolOutput::text("Sure, I clicked the left mouse button")
        );
        let actions = doubles.actuator.actions.lock().clone();
        assert_eq!(
            actions,
            vec!["move(200, 400)", "highlight(200, 400)", "click(Left)"]
        );
    }

    #[tokio::test]
    async fn cursor_position_round_trips_virtual_coordinates() {
        let (ctx, _doubles) = context_with_doubles();
        ComputerTool
            .call(
                &ctx,
                json!({ "action": "mouse_move", "coordinate": [640, 412] }),
            )
            .await
            .expect("move");

        let output = ComputerTool
            .call(&ctx, json!({ "action": "cursor_position" }))
            .await
            .expect("position");
        assert_eq!(output, ToolOutput::text("The cursor is at (640, 412)"));
    }

    #[tokio::test]
    async fn type_splits_lines_and_presses_enter() {
        let (ctx, doubles) = context_with_doubles();
        ComputerTool
            .call(&ctx, json!({ "action": "type", "text": "alpha\nbeta" }))
            .await
            .expect("type");

        let actions = doubles.actuator.actions.lock().clone();
        assert_eq!(
            actions,
            vec![
                "type(alpha)",
                "keys(enter)",
                "type(beta)",
                "keys(enter)"
            ]
        );
    }

    #[tokio::test]
    async fn page_keys_become_scrolls() {
        let (ctx, doubles) = context_with_doubles();
        let down = ComputerTool
            .call(&ctx, json!({ "action": "key", "text": "Page_Down" }))
            .await
            .expect("down");
        let up = ComputerTool
            .call(&ctx, json!({ "action": "key", "text": "Page_Up" }))
            .await
            .expect("up");

        assert_eq!(down, ToolOutput::text("Sure, I pressed the Page Down key"));
        assert_eq!(up, ToolOutput::text("Sure, I pressed the Page Up key"));
        let actions = doubles.actuator.actions.lock().clone();
        assert_eq!(actions, vec!["scroll(10)", "scroll(-10)"]);
    }

    #[tokio::test]
    async fn unknown_action_is_a_text_result() {
        let (ctx, _doubles) = context_with_doubles();
        let output = ComputerTool
            .call(&ctx, json!({ "action": "teleport" }))
            .await
            .expect("call");
        assert_eq!(output, ToolOutput::text("Action not supported"));
    }

    #[tokio::test]
    async fn screenshot_returns_an_image() {
        let (ctx, _doubles) = context_with_doubles();
        let output = ComputerTool
            .call(&ctx, json!({ "action": "screenshot" }))
            .await
            .expect("call");
        assert_eq!(
            output,
            ToolOutput::Image {
                data: "aGVsbG8=".to_string(),
                media_type: "image/png".to_string()
            }
        );
    }

    #[test]
    fn key_chords_normalize_aliases() {
        assert_eq!(parse_key_chord("Ctrl+Shift+t"), vec!["ctrl", "shift", "t"]);
        assert_eq!(parse_key_chord("Alt+Return"), vec!["alt", "enter"]);
        assert_eq!(parse_key_chord("Control+c"), vec!["ctrl", "c"]);
    }
}
