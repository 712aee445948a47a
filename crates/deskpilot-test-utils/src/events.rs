//! Event-collecting sink.

use deskpilot_protocol::{EventSink, SessionAction, SessionEvent};
use parking_lot::Mutex;

/// Collects every emitted session event for inspection.
#[derive(Default)]
pub struct CollectingSink {
    /// Events in emission order.
    pub events: Mutex<Vec<SessionEvent>>,
}

impl CollectingSink {
    /// Actions of the collected events, in order.
    pub fn actions(&self) -> Vec<SessionAction> {
        self.events.lock().iter().map(|event| event.action).collect()
    }

    /// Data strings of the collected transcription events, in order.
    pub fn transcription_texts(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter(|event| event.action == SessionAction::Transcription)
            .filter_map(|event| {
                event
                    .data
                    .as_ref()
                    .and_then(|data| data.get("data"))
                    .and_then(|text| text.as_str())
                    .map(str::to_string)
            })
            .collect()
    }
}

impl EventSink for CollectingSink {
    fn emit(&self, event: SessionEvent) {
        self.events.lock().push(event);
    }
}
