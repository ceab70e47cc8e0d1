//! Metadata collector.
//!
//! Builds the introspection reply: one flat record per registered device,
//! with a field set fixed per device kind, wrapped in an info-kind payload.
//! Record fields are copied from the live device, so usage, availability,
//! on/off, and offset state are current as of the call.

use serde::Serialize;

use crate::bus::BusFamily;
use crate::device::{Device, DeviceKind, KindState};
use crate::registry::Registry;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Descriptive record for one sensor device.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SensorRecord {
    pub name: String,
    #[serde(rename = "Type")]
    pub kind: DeviceKind,
    pub quantity_channel: usize,
    pub channel_names: Vec<String>,
    pub min_range: f32,
    pub max_range: f32,
    pub type_in_signal: Option<String>,
    pub type_out_signal: Option<String>,
    pub bus_types: Vec<BusFamily>,
    pub manufacturing_data: serde_json::Value,
    pub is_ch_used: Vec<bool>,
    pub is_available: Vec<bool>,
}

/// Descriptive record for one actuator device.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActuatorRecord {
    pub name: String,
    #[serde(rename = "Type")]
    pub kind: DeviceKind,
    pub quantity_channel: usize,
    pub channel_names: Vec<String>,
    pub min_range: f32,
    pub max_range: f32,
    pub type_in_signals: Vec<String>,
    pub bus_types: Vec<BusFamily>,
    pub manufacturing_data: serde_json::Value,
    pub is_ch_on: Vec<bool>,
    pub offsets: Vec<f32>,
}

/// One device's record, shaped by its kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DeviceRecord {
    Sensor(SensorRecord),
    Actuator(ActuatorRecord),
}

/// The full introspection reply: `{"kind": "Info", "records": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoPayload {
    kind: &'static str,
    pub records: Vec<DeviceRecord>,
}

impl InfoPayload {
    pub fn new(records: Vec<DeviceRecord>) -> Self {
        Self {
            kind: "Info",
            records,
        }
    }
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// Collect one record per registered device, in registration order.
pub fn collect(registry: &Registry) -> InfoPayload {
    InfoPayload::new(registry.iter().map(device_record).collect())
}

fn device_record(device: &Device) -> DeviceRecord {
    let desc = device.descriptor();
    match device.state() {
        KindState::Sensor {
            is_ch_used,
            is_available,
        } => DeviceRecord::Sensor(SensorRecord {
            name: desc.name.clone(),
            kind: DeviceKind::Sensor,
            quantity_channel: desc.quantity_channels(),
            channel_names: desc.channel_names.clone(),
            min_range: desc.min_range,
            max_range: desc.max_range,
            type_in_signal: desc.in_signals.first().cloned(),
            type_out_signal: desc.out_signal.clone(),
            bus_types: desc.bus_types.clone(),
            manufacturing_data: desc.manufacturing.clone(),
            is_ch_used: is_ch_used.clone(),
            is_available: is_available.clone(),
        }),
        KindState::Actuator { is_ch_on, offsets } => DeviceRecord::Actuator(ActuatorRecord {
            name: desc.name.clone(),
            kind: DeviceKind::Actuator,
            quantity_channel: desc.quantity_channels(),
            channel_names: desc.channel_names.clone(),
            min_range: desc.min_range,
            max_range: desc.max_range,
            type_in_signals: desc.in_signals.clone(),
            bus_types: desc.bus_types.clone(),
            manufacturing_data: desc.manufacturing.clone(),
            is_ch_on: is_ch_on.clone(),
            offsets: offsets.clone(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
