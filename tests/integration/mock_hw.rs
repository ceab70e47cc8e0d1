//! Mock drivers and port adapters for integration tests.
//!
//! Records everything the service touches so tests can assert on the full
//! interaction history without real hardware attached.

use sensorhub::app::events::HubEvent;
use sensorhub::app::ports::{EventSink, PollTimer};
use sensorhub::bus::BusFamily;
use sensorhub::device::DeviceKind;
use sensorhub::drivers::{DeviceDescriptor, DeviceDriver, DriverError};

// ── Scripted sensor driver ────────────────────────────────────

/// Sensor replaying a fixed per-channel value script, holding the last
/// value once the script runs out.  A `None` entry fails that read.
pub struct StepSensor {
    descriptor: DeviceDescriptor,
    scripts: Vec<Vec<Option<f32>>>,
    cursor: Vec<usize>,
}

#[allow(dead_code)]
impl StepSensor {
    pub fn new(scripts: Vec<Vec<Option<f32>>>) -> Self {
        let channels = scripts.len();
        Self {
            descriptor: DeviceDescriptor {
                name: "step-sensor".into(),
                kind: DeviceKind::Sensor,
                channel_names: (0..channels).map(|i| format!("ch{i}")).collect(),
                min_range: 0.0,
                max_range: 1000.0,
                in_signals: vec!["analog".into()],
                out_signal: Some("digital".into()),
                bus_types: vec![BusFamily::I2c],
                manufacturing: serde_json::Value::Null,
            },
            scripts,
            cursor: vec![0; channels],
        }
    }

    /// Two-channel sensor holding constant values.
    pub fn steady(a: f32, b: f32) -> Self {
        Self::new(vec![vec![Some(a)], vec![Some(b)]])
    }
}

impl DeviceDriver for StepSensor {
    fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    fn read(&mut self, channel: usize) -> Result<f32, DriverError> {
        let script = self
            .scripts
            .get(channel)
            .ok_or(DriverError::ChannelOutOfRange)?;
        let idx = self.cursor[channel].min(script.len() - 1);
        self.cursor[channel] += 1;
        script[idx].ok_or(DriverError::NotReady)
    }
}

// ── Poll timer spy ────────────────────────────────────────────

#[derive(Default)]
pub struct MockTimer {
    pub armed: Option<u32>,
    pub arm_calls: usize,
    pub disarm_calls: usize,
}

#[allow(dead_code)]
impl MockTimer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PollTimer for MockTimer {
    fn arm(&mut self, period_ms: u32) {
        self.armed = Some(period_ms);
        self.arm_calls += 1;
    }

    fn disarm(&mut self) {
        self.armed = None;
        self.disarm_calls += 1;
    }
}

// ── Event sink spy ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<HubEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn topics(&self) -> Vec<&'static str> {
        self.events.iter().map(HubEvent::topic).collect()
    }

    pub fn last_json(&self) -> serde_json::Value {
        let event = self.events.last().expect("no events recorded");
        serde_json::to_value(event).expect("event must serialize")
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &HubEvent) {
        self.events.push(event.clone());
    }
}
