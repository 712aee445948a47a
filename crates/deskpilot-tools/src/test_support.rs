//! In-crate doubles for tool unit tests.

use crate::actuator::{
    Actuator, AppCatalog, DesktopError, DisplaySize, MouseButton, Point, Screenshot, SpeechEngine,
    VirtualDisplay,
};
use crate::context::{DesktopServices, ToolContext};
use async_trait::async_trait;
use deskpilot_memory::{Embedder, EmbeddingError, MemoryEntry, MemoryError, MemoryTable, VectorStore};
use parking_lot::Mutex;
use std::sync::Arc;
use uuid::Uuid;

pub const TEST_DIM: usize = 4;

/// Records every desktop action as a one-line string.
#[derive(Default)]
pub struct RecordingActuator {
    pub actions: Mutex<Vec<String>>,
    pub clipboard: Mutex<String>,
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

/// Records spoken lines.
#[derive(Default)]
pub struct RecordingSpeech {
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
pub struct StaticApps {
    pub apps: Vec<String>,
    pub launched: Mutex<Vec<String>>,
}

impl StaticApps {
    pub fn new(apps: &[&str]) -> Self {
        Self {
            apps: apps.iter().map(|name| name.to_string()).collect(),
            launched: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AppCatalog for StaticApps {
    async fn installed(&self) -> Result<Vec<String>, DesktopError> {
        Ok(self.apps.clone())
    }

    async fn launch(&self, name: &str) -> Result<(), DesktopError> {
        self.launched.lock().push(name.to_string());
        Ok(())
    }
}

/// Deterministic embedder: one vector component per byte-sum bucket.
pub struct StubEmbedder;

#[async_trait]
impl Embedder for StubEmbedder {
    fn dim(&self) -> usize {
        TEST_DIM
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vector = vec![0.0f32; TEST_DIM];
        for (index, byte) in text.bytes().enumerate() {
            vector[index % TEST_DIM] += byte as f32 / 255.0;
        }
        Ok(vector)
    }
}

/// Embedder that always fails, for degraded-path tests.
pub struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    fn dim(&self) -> usize {
        TEST_DIM
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Err(EmbeddingError::new("backend offline"))
    }
}

/// Exact in-memory vector store with L2 nearest lookup.
#[derive(Default)]
pub struct InMemoryStore {
    pub flows: Mutex<Vec<MemoryEntry>>,
    pub context: Mutex<Vec<MemoryEntry>>,
    pub prompts: Mutex<Vec<MemoryEntry>>,
}

impl InMemoryStore {
    fn table(&self, table: MemoryTable) -> &Mutex<Vec<MemoryEntry>> {
        match table {
            MemoryTable::Flows => &self.flows,
            MemoryTable::Context => &self.context,
            MemoryTable::Prompts => &self.prompts,
        }
    }
}

#[async_trait]
impl VectorStore for InMemoryStore {
    async fn write(&self, table: MemoryTable, entry: MemoryEntry) -> Result<(), MemoryError> {
        if entry.embedding.len() != TEST_DIM {
            return Err(MemoryError::DimensionMismatch {
                expected: TEST_DIM,
                got: entry.embedding.len(),
            });
        }
        self.table(table).lock().push(entry);
        Ok(())
    }

    async fn nearest_context(&self, query: &[f32]) -> Result<Option<MemoryEntry>, MemoryError> {
        let rows = self.context.lock();
        let mut best: Option<(f32, &MemoryEntry)> = None;
        for row in rows.iter() {
            let distance: f32 = row
                .embedding
                .iter()
                .zip(query)
                .map(|(a, b)| (a - b) * (a - b))
                .sum();
            if best.as_ref().is_none_or(|(d, _)| distance < *d) {
                best = Some((distance, row));
            }
        }
        Ok(best.map(|(_, row)| row.clone()))
    }

    async fn count(&self, table: MemoryTable) -> Result<usize, MemoryError> {
        Ok(self.table(table).lock().len())
    }

    fn dim(&self) -> usize {
        TEST_DIM
    }
}

/// Handles onto the doubles behind a context.
pub struct Doubles {
    pub actuator: Arc<RecordingActuator>,
    pub speech: Arc<RecordingSpeech>,
    pub apps: Arc<StaticApps>,
    pub memory: Arc<InMemoryStore>,
}

/// Build a context over recording doubles with scale factor 2.
pub fn context() -> ToolContext {
    context_with_doubles().0
}

/// Build a context and keep the doubles for inspection.
pub fn context_with_doubles() -> (ToolContext, Doubles) {
    let doubles = Doubles {
        actuator: Arc::new(RecordingActuator::default()),
        speech: Arc::new(RecordingSpeech::default()),
        apps: Arc::new(StaticApps::new(&["Brave Browser", "Slack"])),
        memory: Arc::new(InMemoryStore::default()),
    };
    let services = Arc::new(DesktopServices {
        actuator: doubles.actuator.clone(),
        speech: doubles.speech.clone(),
        apps: doubles.apps.clone(),
        memory: doubles.memory.clone(),
        embedder: Arc::new(StubEmbedder),
        event_sink: None,
        display: VirtualDisplay::new(2),
    });
    (ToolContext::new(Uuid::new_v4(), services), doubles)
}
