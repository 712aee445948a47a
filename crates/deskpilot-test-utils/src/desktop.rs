//! Recording desktop collaborators.

use async_trait::async_trait;
use deskpilot_tools::{
    Actuator, AppCatalog, DesktopError, DisplaySize, MouseButton, Point, Screenshot, SpeechEngine,
};
use parking_lot::Mutex;

/// Records every desktop action as a one-line string.
#[derive(Default)]
pub struct RecordingActuator {
    /// Actions in invocation order.
    pub actions: Mutex<Vec<String>>,
    /// Clipboard contents.
    pub clipboard: Mutex<String>,
    /// Last cursor position set through `move_cursor`.
    pub cursor: Mutex<Point>,
}

#[async_trait]
impl Actuator for RecordingActuator {
    async fn screenshot(&self) -> Result<Screenshot, DesktopError> {
        self.actions.lock().push("screenshot".to_string());
        Ok(Screenshot {
            data: "aGVsbG8=".to_string(),
            media_type: "image/png".to_string(),
        })
    }

    async fn display_size(&self) -> Result<DisplaySize, DesktopError> {
        Ok(DisplaySize {
            width: 2560,
            height: 1600,
        })
    }

    async fn cursor_position(&self) -> Result<Point, DesktopError> {
        Ok(*self.cursor.lock())
    }

    async fn move_cursor(&self, point: Point) -> Result<(), DesktopError> {
        *self.cursor.lock() = point;
        self.actions
            .lock()
            .push(format!("move({}, {})", point.x, point.y));
        Ok(())
    }

    async fn click(&self, button: MouseButton) -> Result<(), DesktopError> {
        self.actions.lock().push(format!("click({button:?})"));
        Ok(())
    }

    async fn drag(&self, to: Point) -> Result<(), DesktopError> {
        self.actions.lock().push(format!("drag({}, {})", to.x, to.y));
        Ok(())
    }

    async fn scroll(&self, dy: i64) -> Result<(), DesktopError> {
        self.actions.lock().push(format!("scroll({dy})"));
        Ok(())
    }

    async fn type_text(&self, text: &str) -> Result<(), DesktopError> {
        self.actions.lock().push(format!("type({text})"));
        Ok(())
    }

    async fn press_keys(&self, keys: &[String]) -> Result<(), DesktopError> {
        self.actions.lock().push(format!("keys({})", keys.join("+")));
        Ok(())
    }

    async fn highlight(&self, point: Point) -> Result<(), DesktopError> {
        self.actions
            .lock()
            .push(format!("highlight({}, {})", point.x, point.y));
        Ok(())
    }

    async fn clipboard_get(&self) -> Result<String, DesktopError> {
        Ok(self.clipboard.lock().clone())
    }

    async fn clipboard_set(&self, text: &str) -> Result<(), DesktopError> {
        *self.clipboard.lock() = text.to_string();
        Ok(())
    }
}

/// Records spoken lines instead of producing audio.
#[derive(Default)]
pub struct RecordingSpeech {
    /// Lines in spoken order.
    pub spoken: Mutex<Vec<String>>,
}

#[async_trait]
impl SpeechEngine for RecordingSpeech {
    async fn say(&self, text: &str) -> Result<(), DesktopError> {
        self.spoken.lock().push(text.to_string());
        Ok(())
    }
}

/// Fixed installed-app list with launch recording.
pub struct StaticAppCatalog {
    apps: Vec<String>,
    /// Apps launched so far, canonical names.
    pub launched: Mutex<Vec<String>>,
}

impl StaticAppCatalog {
    /// Build a catalog over the given app names.
    pub fn new(apps: &[&str]) -> Self {
        Self {
            apps: apps.iter().map(|name| name.to_string()).collect(),
            launched: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AppCatalog for StaticAppCatalog {
    async fn installed(&self) -> Result<Vec<String>, DesktopError> {
        Ok(self.apps.clone())
    }

    async fn launch(&self, name: &str) -> Result<(), DesktopError> {
        self.launched.lock().push(name.to_string());
        Ok(())
    }
}
