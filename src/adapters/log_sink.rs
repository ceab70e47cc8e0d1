//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing every outbound hub event to the
//! logger as `topic | payload`, with the payload in its wire JSON form.
//! A future MQTT or broker adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::HubEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`HubEvent`] to the console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &HubEvent) {
        match serde_json::to_string(event) {
            Ok(payload) => info!("{} | {}", event.topic(), payload),
            Err(err) => warn!("{} | payload failed to serialize: {}", event.topic(), err),
        }
    }
}
