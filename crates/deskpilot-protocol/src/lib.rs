//! Wire protocol types for the Deskpilot session boundary.

mod tool;

pub use tool::ToolError;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Origin tag for events produced by the core.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventSource {
    /// The agent core ("main" process in the host shell's terms).
    Main,
}

/// Origin tag for inbound triggers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TriggerSource {
    /// The UI renderer.
    Renderer,
}

/// Action discriminant for session events.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SessionAction {
    /// Microphone capture started.
    Recording,
    /// Microphone capture finished.
    RecordingDone,
    /// Narration text for the UI (model text or tool summaries).
    Transcription,
}

/// Role attached to narration payloads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Text shown as the model speaking to the user.
    User,
    /// Internal narration such as tool-activity summaries.
    System,
}

/// Data payload carried by `transcription` events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptionPayload {
    /// Unique id for the narration fragment.
    pub id: Uuid,
    /// Timestamp when the fragment was produced.
    pub date: DateTime<Utc>,
    /// Payload kind; always `text` for this core.
    #[serde(rename = "type")]
    pub kind: PayloadKind,
    /// Role the fragment should be rendered as.
    pub role: Role,
    /// The narration text itself.
    pub data: String,
}

/// Kind discriminant for transcription payloads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    /// Plain text payload.
    Text,
}

/// Event emitted by the core toward the UI/host shell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionEvent {
    /// Always `main` for events produced by this core.
    pub source: EventSource,
    /// Action discriminant.
    pub action: SessionAction,
    /// Action-specific data, if any.
    pub data: Option<Value>,
}

impl SessionEvent {
    /// Build a `recording` event.
    pub fn recording() -> Self {
        Self {
            source: EventSource::Main,
            action: SessionAction::Recording,
            data: None,
        }
    }

    /// Build a `recording-done` event.
    pub fn recording_done() -> Self {
        Self {
            source: EventSource::Main,
            action: SessionAction::RecordingDone,
            data: None,
        }
    }

    /// Build a `transcription` event carrying narration text.
    pub fn transcription(role: Role, text: impl Into<String>) -> Self {
        let payload = TranscriptionPayload {
            id: Uuid::new_v4(),
            date: Utc::now(),
            kind: PayloadKind::Text,
            role,
            data: text.into(),
        };
        Self {
            source: EventSource::Main,
            action: SessionAction::Transcription,
            data: serde_json::to_value(payload).ok(),
        }
    }
}

/// Inbound trigger received from the UI/host shell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trigger {
    /// Always `renderer` for triggers accepted by the core.
    pub source: TriggerSource,
    /// Trigger discriminant.
    pub event: TriggerEvent,
    /// Trigger payload; task text for `start-text`.
    #[serde(default)]
    pub data: Option<String>,
}

/// Trigger discriminant for inbound requests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerEvent {
    /// Begin a one-shot microphone capture.
    Start,
    /// Bypass audio and feed literal task text to the orchestrator.
    StartText,
}

/// Sink interface for events produced by the core.
pub trait EventSink: Send + Sync {
    /// Emit an event to the downstream session boundary.
    fn emit(&self, event: SessionEvent);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn session_actions_use_kebab_case_tags() {
        let event = SessionEvent::recording_done();
        let encoded = serde_json::to_value(&event).expect("serialize");
        assert_eq!(
            encoded,
            json!({ "source": "main", "action": "recording-done", "data": null })
        );
    }

    #[test]
    fn transcription_event_carries_typed_payload() {
        let event = SessionEvent::transcription(Role::System, "[Computer action: screenshot]");
        let data = event.data.expect("payload");
        assert_eq!(data["type"], json!("text"));
        assert_eq!(data["role"], json!("system"));
        assert_eq!(data["data"], json!("[Computer action: screenshot]"));
    }

    #[test]
    fn trigger_round_trips_through_json() {
        let raw = json!({ "source": "renderer", "event": "start-text", "data": "open notes" });
        let trigger: Trigger = serde_json::from_value(raw.clone()).expect("deserialize");
        assert_eq!(trigger.event, TriggerEvent::StartText);
        assert_eq!(trigger.data.as_deref(), Some("open notes"));
        let encoded = serde_json::to_value(&trigger).expect("serialize");
        assert_eq!(encoded, raw);
    }

    #[test]
    fn start_trigger_tolerates_missing_data() {
        let raw = json!({ "source": "renderer", "event": "start" });
        let trigger: Trigger = serde_json::from_value(raw).expect("deserialize");
        assert_eq!(trigger.event, TriggerEvent::Start);
        assert_eq!(trigger.data, None);
    }
}
