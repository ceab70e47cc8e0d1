//! Outbound hub events.
//!
//! The [`HubService`](super::service::HubService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — log to serial, publish over MQTT,
//! hand them to a broker, etc.
//!
//! The enum serializes untagged: the wire payload is the inner package or
//! info reply itself, while the topic comes from [`HubEvent::topic`].

use serde::Serialize;

use crate::metadata::InfoPayload;
use crate::poller::DataPackage;

/// Structured events emitted by the hub core.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HubEvent {
    /// One polling tick's changed channels.
    SensorData(DataPackage),

    /// The metadata reply for a get-info request.
    SensorInfo(InfoPayload),
}

impl HubEvent {
    /// The outbound topic this event is published on.
    pub fn topic(&self) -> &'static str {
        match self {
            Self::SensorData(_) => "sensor-data",
            Self::SensorInfo(_) => "sensor-info",
        }
    }
}
