//! Device driver contract and the simulation drivers shipped with the hub.
//!
//! A driver module is an external collaborator: the loader port hands the
//! factory a boxed [`DeviceDriver`], the driver reports its own
//! [`DeviceDescriptor`], and from then on the hub only talks to it through
//! synchronous, bounded `read`/`apply` calls.

pub mod sim;

use crate::bus::BusFamily;
use crate::device::{ChannelCommand, DeviceKind};

// ---------------------------------------------------------------------------
// Descriptor
// ---------------------------------------------------------------------------

/// Static description a driver reports about the device it controls.
///
/// Channel count is `channel_names.len()` — there is no separate count field
/// to drift out of sync.
#[derive(Debug, Clone)]
pub struct DeviceDescriptor {
    /// Product name (`"meteo"`, `"relay"`, …).
    pub name: String,
    pub kind: DeviceKind,
    /// Ordered channel names; defines the channel count.
    pub channel_names: Vec<String>,
    /// Lower bound of the measurable / drivable range.
    pub min_range: f32,
    /// Upper bound of the measurable / drivable range.
    pub max_range: f32,
    /// Input signal types. Sensors report one entry; actuators one per channel.
    pub in_signals: Vec<String>,
    /// Output signal type (sensors only).
    pub out_signal: Option<String>,
    /// Bus families the device can sit on.
    pub bus_types: Vec<BusFamily>,
    /// Free-form manufacturing metadata (batch, calibration, …).
    pub manufacturing: serde_json::Value,
}

impl DeviceDescriptor {
    pub fn quantity_channels(&self) -> usize {
        self.channel_names.len()
    }
}

// ---------------------------------------------------------------------------
// Driver trait
// ---------------------------------------------------------------------------

/// One loaded driver instance, bound to one device.
///
/// Sensor drivers implement `read`, actuator drivers implement `apply`; the
/// unused half falls back to the `Unsupported` default.
pub trait DeviceDriver {
    /// The descriptor is fixed for the lifetime of the driver.
    fn descriptor(&self) -> &DeviceDescriptor;

    /// Read the current value of a sensor channel.
    fn read(&mut self, _channel: usize) -> Result<f32, DriverError> {
        Err(DriverError::Unsupported)
    }

    /// Apply an allow-listed command to an actuator channel.
    fn apply(&mut self, _channel: usize, _cmd: &ChannelCommand) -> Result<(), DriverError> {
        Err(DriverError::Unsupported)
    }
}

// ---------------------------------------------------------------------------
// Driver errors
// ---------------------------------------------------------------------------

/// Failures a driver can report from `read`/`apply`.
///
/// These never enter the hub's setup-error taxonomy: a failed read is logged
/// and contained within its tick, a failed apply is logged and does not fail
/// the dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// The device did not answer (yet) — warm-up, bus contention.
    NotReady,
    /// The requested channel does not exist on this device.
    ChannelOutOfRange,
    /// The driver has no implementation for this call.
    Unsupported,
    /// The underlying bus transaction failed.
    Bus,
}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotReady => write!(f, "device not ready"),
            Self::ChannelOutOfRange => write!(f, "channel out of range"),
            Self::Unsupported => write!(f, "operation not supported"),
            Self::Bus => write!(f, "bus transaction failed"),
        }
    }
}
