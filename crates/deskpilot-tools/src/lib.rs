//! Tooling interfaces and built-in tools for Deskpilot.

pub mod actuator;
pub mod builtins;
pub mod context;
pub mod registry;
pub mod tool;

#[cfg(test)]
pub(crate) mod test_support;

/// Desktop collaborator traits and coordinate scaling.
pub use actuator::{
    Actuator, AppCatalog, DesktopError, DisplaySize, MouseButton, Point, Screenshot, SpeechEngine,
    VirtualDisplay,
};
/// Built-in tool registry and registration helper.
pub use builtins::{builtin_tool_registry, register_builtin_tools};
/// Tool context and shared services.
pub use context::{DesktopServices, ToolContext};
/// Tool registry type.
pub use registry::ToolRegistry;
/// Tool trait, output, and spec types.
pub use tool::{Tool, ToolOutput, ToolSpec};
