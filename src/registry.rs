//! Device registry.
//!
//! One ordered collection of devices, keyed by unique ID, owning the two
//! invariants everything else leans on: no two devices share an ID, and no
//! two devices share a claimed pin. Registration order is observable — the
//! poller, the metadata collector, and the views below all walk devices in
//! the order they were added.

use log::debug;

use crate::device::{Device, DeviceKind};
use crate::pins::PinId;

/// The hub's single device registry.
///
/// Constructed once at startup and passed by reference to the poller, the
/// dispatcher, and the metadata collector.
#[derive(Default)]
pub struct Registry {
    devices: Vec<Device>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a device.
    ///
    /// A device with an empty ID, or with an ID already present, is silently
    /// ignored — the first registration wins and no error is surfaced.
    pub fn add(&mut self, device: Device) {
        if device.id().is_empty() {
            debug!("registry: ignoring device with empty id");
            return;
        }
        if !self.is_id_unique(device.id()) {
            debug!("registry: ignoring duplicate device id '{}'", device.id());
            return;
        }
        self.devices.push(device);
    }

    pub fn get(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|dev| dev.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Device> {
        self.devices.iter_mut().find(|dev| dev.id() == id)
    }

    /// True iff no registered device holds `id`.
    pub fn is_id_unique(&self, id: &str) -> bool {
        self.get(id).is_none()
    }

    /// True iff none of `pins` is claimed by any registered device.
    pub fn are_pins_available(&self, pins: &[PinId]) -> bool {
        pins.iter()
            .all(|pin| self.devices.iter().all(|dev| !dev.pins().contains(pin)))
    }

    /// Resolve a composite channel ID into the owning device and channel.
    ///
    /// The split is on the *last* dash, so device IDs may themselves contain
    /// dashes. Returns `None` for an unknown device, a non-numeric suffix,
    /// or a channel index out of range.
    pub fn get_device_channel(&self, composite: &str) -> Option<(&Device, usize)> {
        let (device_id, channel) = split_composite(composite)?;
        let device = self.get(device_id)?;
        (channel < device.quantity_channels()).then_some((device, channel))
    }

    /// Mutable variant of [`Registry::get_device_channel`], for dispatch.
    pub fn get_device_channel_mut(&mut self, composite: &str) -> Option<(&mut Device, usize)> {
        let (device_id, channel) = split_composite(composite)?;
        let device = self.get_mut(device_id)?;
        (channel < device.quantity_channels()).then_some((device, channel))
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// All devices, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter()
    }

    /// Sensor devices, in registration order.
    pub fn sensors(&self) -> impl Iterator<Item = &Device> {
        self.devices
            .iter()
            .filter(|dev| dev.kind() == DeviceKind::Sensor)
    }

    /// Mutable sensor view, used by the polling tick.
    pub fn sensors_mut(&mut self) -> impl Iterator<Item = &mut Device> {
        self.devices
            .iter_mut()
            .filter(|dev| dev.kind() == DeviceKind::Sensor)
    }

    /// Actuator devices, in registration order.
    pub fn actuators(&self) -> impl Iterator<Item = &Device> {
        self.devices
            .iter()
            .filter(|dev| dev.kind() == DeviceKind::Actuator)
    }
}

fn split_composite(composite: &str) -> Option<(&str, usize)> {
    let (device_id, suffix) = composite.rsplit_once('-')?;
    let channel = suffix.parse::<usize>().ok()?;
    Some((device_id, channel))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
