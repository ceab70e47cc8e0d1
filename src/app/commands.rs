//! Inbound commands to the hub service.
//!
//! These represent actions requested by the outside world (pub/sub broker,
//! serial console, test harness) that the
//! [`HubService`](super::service::HubService) interprets and acts upon.
//! Each variant maps onto exactly one inbound topic; the topic set is
//! closed, so nothing outside this enum can be requested remotely.

use crate::device::Device;
use crate::dispatch::WriteRequest;

/// Commands that external adapters can send into the hub core.
#[derive(Debug)]
pub enum HubCommand {
    /// Register an externally constructed device.
    RegisterDevice(Device),

    /// Start a polling session, optionally at an explicit frequency.
    StartPolling { freq_hz: Option<f32> },

    /// Stop the current polling session.
    StopPolling,

    /// Collect and publish device metadata.
    GetInfo,

    /// Route a write request to an actuator channel.
    Write(WriteRequest),
}

impl HubCommand {
    /// The inbound topic this command arrives on.
    pub fn topic(&self) -> &'static str {
        match self {
            Self::RegisterDevice(_) => "new-device",
            Self::StartPolling { .. } => "sensor-start-polling",
            Self::StopPolling => "sensor-stop-polling",
            Self::GetInfo => "sensor-get-info",
            Self::Write(_) => "sensor-write",
        }
    }
}
