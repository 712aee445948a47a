//! Tool execution context and shared desktop services.

use crate::actuator::{Actuator, AppCatalog, SpeechEngine, VirtualDisplay};
use deskpilot_memory::{Embedder, VectorStore};
use deskpilot_protocol::{EventSink, SessionEvent};
use std::sync::Arc;
use uuid::Uuid;

/// Shared service dependencies for a run (constructed once, shared via Arc).
pub struct DesktopServices {
    /// Pointer, keyboard, clipboard, and screen access.
    pub actuator: Arc<dyn Actuator>,
    /// Text-to-speech output.
    pub speech: Arc<dyn SpeechEngine>,
    /// Installed-application catalog.
    pub apps: Arc<dyn AppCatalog>,
    /// Embedding-indexed memory store.
    pub memory: Arc<dyn VectorStore>,
    /// Embedding backend for memory tools.
    pub embedder: Arc<dyn Embedder>,
    /// Optional sink for session events.
    pub event_sink: Option<Arc<dyn EventSink>>,
    /// Virtual/physical coordinate map.
    pub display: VirtualDisplay,
}

/// Shared context passed to tools during execution.
///
/// Per-invocation identity fields are stored directly; shared services live
/// behind an `Arc` so cloning per tool call is a reference-count bump.
#[derive(Clone)]
pub struct ToolContext {
    /// Session id associated with the tool call.
    pub session_id: Uuid,
    /// Tool name for the current invocation.
    pub tool_name: Option<String>,
    /// Shared desktop services (cheap Arc clone).
    pub services: Arc<DesktopServices>,
}

impl ToolContext {
    /// Build a context for a new session over the given services.
    pub fn new(session_id: Uuid, services: Arc<DesktopServices>) -> Self {
        Self {
            session_id,
            tool_name: None,
            services,
        }
    }

    /// Emit a session event if a sink is attached.
    pub fn emit(&self, event: SessionEvent) {
        if let Some(sink) = &self.services.event_sink {
            sink.emit(event);
        }
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext")
            .field("session_id", &self.session_id)
            .field("tool_name", &self.tool_name)
            .finish()
    }
}
