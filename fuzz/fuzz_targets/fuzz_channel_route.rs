//! Fuzz target: composite channel routing and write dispatch.
//!
//! Feeds arbitrary strings as the composite target and capability of a
//! write request, asserting that resolution and dispatch never panic and
//! that anything which does resolve points at a real channel.
//!
//! cargo fuzz run fuzz_channel_route

#![no_main]

use libfuzzer_sys::fuzz_target;
use sensorhub::device::Device;
use sensorhub::dispatch::{self, WriteRequest};
use sensorhub::drivers::sim::{SimActuator, SimSensor};
use sensorhub::registry::Registry;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let (target, capability) = match text.split_once('\n') {
        Some((t, c)) => (t, c),
        None => (text.as_ref(), "On"),
    };

    let mut registry = Registry::new();
    registry.add(Device::new(
        "meteo-1",
        vec![],
        None,
        Box::new(SimSensor::meteo()),
    ));
    registry.add(Device::new(
        "relay-1",
        vec![],
        None,
        Box::new(SimActuator::relay()),
    ));

    if let Some((device, channel)) = registry.get_device_channel(target) {
        assert!(channel < device.quantity_channels());
    }

    let request = WriteRequest::with_args(target, capability, &[0.5]);
    let _ = dispatch::execute(&mut registry, &request);
});
