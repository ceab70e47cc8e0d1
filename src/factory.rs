//! Device factory.
//!
//! `create_device` is the only way a device enters the registry. It walks a
//! fixed sequence of fail-fast gates — config lookup, driver load, ID
//! uniqueness, bus resolution, pin resolution, pin availability — and only
//! when every gate has passed does it construct the device and register it.
//! A failure at any gate leaves the registry and the claimed-pin set exactly
//! as they were.

use log::info;

use crate::app::ports::{ConfigSource, DriverLoader, PinResolver};
use crate::bus::{BusHandle, BusRegistry};
use crate::config::CreateOptions;
use crate::device::{ChannelId, Device};
use crate::error::{ConfigError, Error, Result, ValidationError};
use crate::registry::Registry;

/// Create and register the device `id` from its configuration.
///
/// On success the device is in the registry and the composite IDs of its
/// channels are returned, in index order.
pub fn create_device(
    registry: &mut Registry,
    buses: &BusRegistry,
    id: &str,
    opts: &CreateOptions,
    config: &impl ConfigSource,
    pins: &impl PinResolver,
    loader: &impl DriverLoader,
) -> Result<Vec<ChannelId>> {
    let device_cfg = config
        .device_config(id)
        .ok_or(Error::Config(ConfigError::DeviceNotFound))?;

    let driver = loader.load(&device_cfg.driver, opts.module_variant)?;

    if !registry.is_id_unique(id) {
        return Err(Error::Validation(ValidationError::DuplicateId));
    }

    let bus: Option<BusHandle> = match &device_cfg.bus {
        Some(name) => Some(
            buses
                .find(name)
                .ok_or(Error::Config(ConfigError::BusNotFound))?
                .handle,
        ),
        None => None,
    };

    let resolved = device_cfg
        .pins
        .iter()
        .map(|descriptor| pins.resolve(descriptor))
        .collect::<core::result::Result<Vec<_>, _>>()?;

    if !registry.are_pins_available(&resolved) {
        return Err(Error::Validation(ValidationError::PinsUnavailable));
    }

    let device = Device::new(id, resolved, bus, driver);
    let channels = device.channel_ids();
    info!(
        "factory: registered '{}' ({}, {} channels)",
        id,
        device.kind(),
        channels.len()
    );
    registry.add(device);
    Ok(channels)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
