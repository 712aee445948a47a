//! Built-in tools bundled with Deskpilot.

mod apps;
mod clipboard;
mod computer;
mod context;
mod sleep;
mod speak;
mod utils;

use crate::ToolRegistry;
use log::info;
use std::sync::Arc;

pub use apps::{AppsTool, OpenAppTool};
pub use clipboard::{GetClipboardTool, SetClipboardTool};
pub use computer::ComputerTool;
pub use context::{FetchContextTool, StoreContextTool};
pub use sleep::SleepTool;
pub use speak::SpeakTool;

/// Register all built-in tools with the provided registry.
pub fn register_builtin_tools(registry: &ToolRegistry) {
    registry.register(Arc::new(ComputerTool));
    registry.register(Arc::new(SpeakTool));
    registry.register(Arc::new(SleepTool));
    registry.register(Arc::new(GetClipboardTool));
    registry.register(Arc::new(SetClipboardTool));
    registry.register(Arc::new(AppsTool));
    registry.register(Arc::new(OpenAppTool));
    registry.register(Arc::new(FetchContextTool));
    registry.register(Arc::new(StoreContextTool));
    info!("registered built-in tools");
}

/// Build a registry pre-populated with built-in tools.
pub fn builtin_tool_registry() -> ToolRegistry {
    let registry = ToolRegistry::new();
    register_builtin_tools(&registry);
    registry
}
