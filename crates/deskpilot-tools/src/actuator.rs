//! Desktop collaborator traits and coordinate scaling.

use async_trait::async_trait;
use deskpilot_protocol::ToolError;
use thiserror::Error;

/// A desktop collaborator call failed.
#[derive(Debug, Clone, Error)]
#[error("desktop error: {0}")]
pub struct DesktopError(pub String);

impl DesktopError {
    /// Build a desktop error from any displayable cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<DesktopError> for ToolError {
    fn from(err: DesktopError) -> Self {
        ToolError::ExecutionFailed(err.to_string())
    }
}

/// A physical screen coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Physical display dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySize {
    pub width: i64,
    pub height: i64,
}

/// Mouse button selector for click actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// A captured screenshot, already encoded for model consumption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screenshot {
    /// Base64-encoded image bytes.
    pub data: String,
    /// MIME type of the encoded bytes.
    pub media_type: String,
}

/// Pointer, keyboard, clipboard, and screen access.
///
/// Implementations talk to the OS; each call is stateless and independent.
#[async_trait]
pub trait Actuator: Send + Sync {
    /// Capture the screen downscaled to the virtual resolution.
    async fn screenshot(&self) -> Result<Screenshot, DesktopError>;
    /// Physical display dimensions.
    async fn display_size(&self) -> Result<DisplaySize, DesktopError>;
    /// Current pointer position in physical coordinates.
    async fn cursor_position(&self) -> Result<Point, DesktopError>;
    /// Move the pointer to a physical coordinate.
    async fn move_cursor(&self, point: Point) -> Result<(), DesktopError>;
    /// Click a mouse button at the current pointer position.
    async fn click(&self, button: MouseButton) -> Result<(), DesktopError>;
    /// Drag from the current pointer position to a physical coordinate.
    async fn drag(&self, to: Point) -> Result<(), DesktopError>;
    /// Scroll by wheel ticks; positive `dy` scrolls down.
    async fn scroll(&self, dy: i64) -> Result<(), DesktopError>;
    /// Type literal text.
    async fn type_text(&self, text: &str) -> Result<(), DesktopError>;
    /// Press a chord of named keys simultaneously.
    async fn press_keys(&self, keys: &[String]) -> Result<(), DesktopError>;
    /// Briefly highlight a small region around a physical coordinate.
    async fn highlight(&self, point: Point) -> Result<(), DesktopError>;
    /// Read the system clipboard.
    async fn clipboard_get(&self) -> Result<String, DesktopError>;
    /// Replace the system clipboard contents.
    async fn clipboard_set(&self, text: &str) -> Result<(), DesktopError>;
}

/// Synchronous text-to-speech output.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Speak the text, returning when playback completes.
    async fn say(&self, text: &str) -> Result<(), DesktopError>;
}

/// Installed-application enumeration and launching.
#[async_trait]
pub trait AppCatalog: Send + Sync {
    /// Names of the installed applications.
    async fn installed(&self) -> Result<Vec<String>, DesktopError>;
    /// Launch an application by its catalog name.
    async fn launch(&self, name: &str) -> Result<(), DesktopError>;
}

/// Maps between the model's scaled-down virtual resolution and physical
/// pixels.
///
/// Virtual coordinates multiply up exactly, so a virtual point survives a
/// round-trip unchanged; physical coordinates divide down with truncation.
#[derive(Debug, Clone, Copy)]
pub struct VirtualDisplay {
    factor: i64,
}

impl VirtualDisplay {
    /// Build a display map with the given scale factor (minimum 1).
    pub fn new(factor: i64) -> Self {
        Self {
            factor: factor.max(1),
        }
    }

    /// Configured scale factor.
    pub fn factor(&self) -> i64 {
        self.factor
    }

    /// Virtual (model) coordinate to physical pixels.
    pub fn to_physical(&self, point: Point) -> Point {
        Point::new(point.x * self.factor, point.y * self.factor)
    }

    /// Physical pixels to the virtual (model) coordinate space.
    pub fn to_virtual(&self, point: Point) -> Point {
        Point::new(point.x / self.factor, point.y / self.factor)
    }

    /// Physical display size to the virtual resolution presented to the model.
    pub fn virtual_size(&self, size: DisplaySize) -> DisplaySize {
        DisplaySize {
            width: size.width / self.factor,
            height: size.height / self.factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DisplaySize, Point, VirtualDisplay};
    use pretty_assertions::assert_eq;

    #[test]
    fn virtual_coordinates_round_trip_exactly() {
        let display = VirtualDisplay::new(2);
        for point in [Point::new(0, 0), Point::new(640, 412), Point::new(1, 999)] {
            assert_eq!(display.to_virtual(display.to_physical(point)), point);
        }
    }

    #[test]
    fn physical_coordinates_truncate_on_descale() {
        let display = VirtualDisplay::new(2);
        assert_eq!(display.to_virtual(Point::new(7, 9)), Point::new(3, 4));
    }

    #[test]
    fn factor_is_clamped_to_one() {
        let display = VirtualDisplay::new(0);
        assert_eq!(display.to_physical(Point::new(5, 5)), Point::new(5, 5));
    }

    #[test]
    fn virtual_size_halves_the_display() {
        let display = VirtualDisplay::new(2);
        let size = display.virtual_size(DisplaySize {
            width: 2560,
            height: 1664,
        });
        assert_eq!(
            size,
            DisplaySize {
                width: 1280,
                height: 832
            }
        );
    }
}
