//! Device model.
//!
//! A [`Device`] couples one loaded driver with the state the hub tracks for
//! it: claimed pins, an optional bus association, the last value of every
//! channel, and the kind-specific bookkeeping (`is_ch_used`/`is_available`
//! for sensors, `is_ch_on`/`offsets` for actuators). Channels are addressed
//! from outside by a composite ID, `<device id>-<channel index>`.

use serde::Serialize;

use crate::bus::BusHandle;
use crate::drivers::{DeviceDescriptor, DeviceDriver, DriverError};
use crate::pins::PinId;

/// Composite channel identifier, `<device id>-<channel index>`.
///
/// Device IDs are unbounded, so the composite is an owned `String` — a
/// fixed-capacity key would truncate long IDs and alias their channels.
pub type ChannelId = String;

/// Build the composite ID for one channel of `device_id`.
pub fn channel_id(device_id: &str, channel: usize) -> ChannelId {
    format!("{device_id}-{channel}")
}

// ---------------------------------------------------------------------------
// Kinds and commands
// ---------------------------------------------------------------------------

/// The two device kinds the hub distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Sensor,
    Actuator,
}

impl core::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Sensor => write!(f, "sensor"),
            Self::Actuator => write!(f, "actuator"),
        }
    }
}

/// The complete allow-list of actuator channel commands.
///
/// Every capability reachable from the wire is a variant here; a name that
/// does not map to one of these is rejected at dispatch time, so no other
/// device behavior can be invoked remotely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChannelCommand {
    On,
    Off,
    SetValue(f32),
    SetOffset(f32),
}

/// State that exists only for one device kind.
#[derive(Debug, Clone, PartialEq)]
pub enum KindState {
    Sensor {
        /// Channel takes part in polling sessions. All channels start used.
        is_ch_used: Vec<bool>,
        /// Last read of this channel succeeded.
        is_available: Vec<bool>,
    },
    Actuator {
        is_ch_on: Vec<bool>,
        offsets: Vec<f32>,
    },
}

impl KindState {
    fn for_kind(kind: DeviceKind, channels: usize) -> Self {
        match kind {
            DeviceKind::Sensor => Self::Sensor {
                is_ch_used: vec![true; channels],
                is_available: vec![true; channels],
            },
            DeviceKind::Actuator => Self::Actuator {
                is_ch_on: vec![false; channels],
                offsets: vec![0.0; channels],
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Device
// ---------------------------------------------------------------------------

/// One registered device: driver, claimed resources, and channel state.
pub struct Device {
    id: String,
    pins: Vec<PinId>,
    bus: Option<BusHandle>,
    /// Last observed (sensor) or last commanded (actuator) value per channel.
    values: Vec<f32>,
    state: KindState,
    driver: Box<dyn DeviceDriver>,
}

impl Device {
    /// Assemble a device around a loaded driver.
    ///
    /// Channel count and kind come from the driver's descriptor; the
    /// kind-specific state starts at its defaults (sensor channels used and
    /// available, actuator channels off with zero offset).
    pub fn new(
        id: impl Into<String>,
        pins: Vec<PinId>,
        bus: Option<BusHandle>,
        driver: Box<dyn DeviceDriver>,
    ) -> Self {
        let kind = driver.descriptor().kind;
        let channels = driver.descriptor().quantity_channels();
        Self {
            id: id.into(),
            pins,
            bus,
            values: vec![0.0; channels],
            state: KindState::for_kind(kind, channels),
            driver,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> DeviceKind {
        self.driver.descriptor().kind
    }

    pub fn descriptor(&self) -> &DeviceDescriptor {
        self.driver.descriptor()
    }

    pub fn pins(&self) -> &[PinId] {
        &self.pins
    }

    pub fn bus(&self) -> Option<BusHandle> {
        self.bus
    }

    pub fn quantity_channels(&self) -> usize {
        self.values.len()
    }

    pub fn state(&self) -> &KindState {
        &self.state
    }

    /// Composite IDs of all channels, in index order.
    pub fn channel_ids(&self) -> Vec<ChannelId> {
        (0..self.values.len())
            .map(|ch| channel_id(&self.id, ch))
            .collect()
    }

    /// Last stored value of `channel`, if the index is in range.
    pub fn value(&self, channel: usize) -> Option<f32> {
        self.values.get(channel).copied()
    }

    /// Read `channel` through the driver and refresh the stored value.
    ///
    /// On success the value is stored and the channel is marked available;
    /// on failure the channel is marked unavailable and the stored value is
    /// left untouched. The caller decides how to react to the error.
    pub fn read_channel(&mut self, channel: usize) -> Result<f32, DriverError> {
        if channel >= self.values.len() {
            return Err(DriverError::ChannelOutOfRange);
        }
        match self.driver.read(channel) {
            Ok(value) => {
                self.values[channel] = value;
                if let KindState::Sensor { is_available, .. } = &mut self.state {
                    is_available[channel] = true;
                }
                Ok(value)
            }
            Err(err) => {
                if let KindState::Sensor { is_available, .. } = &mut self.state {
                    is_available[channel] = false;
                }
                Err(err)
            }
        }
    }

    /// Apply an allow-listed command to `channel`.
    ///
    /// The registry-visible state is updated first, then the command is
    /// forwarded to the driver; a driver error therefore never loses the
    /// commanded state.
    pub fn apply(&mut self, channel: usize, cmd: &ChannelCommand) -> Result<(), DriverError> {
        if channel >= self.values.len() {
            return Err(DriverError::ChannelOutOfRange);
        }
        if let KindState::Actuator { is_ch_on, offsets } = &mut self.state {
            match cmd {
                ChannelCommand::On => is_ch_on[channel] = true,
                ChannelCommand::Off => is_ch_on[channel] = false,
                ChannelCommand::SetValue(value) => self.values[channel] = *value,
                ChannelCommand::SetOffset(offset) => offsets[channel] = *offset,
            }
        }
        self.driver.apply(channel, cmd)
    }
}

impl core::fmt::Debug for Device {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Device")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("pins", &self.pins)
            .field("bus", &self.bus)
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
