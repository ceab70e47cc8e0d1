//! Simulation drivers.
//!
//! Host builds and the demo binary have no real peripherals, so the catalog
//! here stands in for a driver-module store: `meteo` is a two-channel
//! environmental sensor with a deterministic waveform, `relay` a two-channel
//! switch that records what it is told. The waveforms are fixed so demo runs
//! and tests are reproducible.

use log::debug;

use crate::app::ports::DriverLoader;
use crate::bus::BusFamily;
use crate::device::{ChannelCommand, DeviceKind};
use crate::drivers::{DeviceDescriptor, DeviceDriver, DriverError};
use crate::error::ModuleLoadError;

// ---------------------------------------------------------------------------
// Simulated sensor
// ---------------------------------------------------------------------------

/// Two-channel environmental sensor (temperature, humidity).
///
/// Temperature creeps in 0.1-degree steps, staying well inside the polling
/// tolerance after the first report; humidity toggles by eight points every
/// other sweep, so it keeps producing reports. Each channel advances its own
/// step counter on every read.
pub struct SimSensor {
    descriptor: DeviceDescriptor,
    temperature_base: f32,
    humidity_base: f32,
    steps: Vec<u32>,
}

impl SimSensor {
    /// Standard profile: 21 °C / 55 %RH baseline.
    pub fn meteo() -> Self {
        Self::with_baseline(21.0, 55.0)
    }

    /// Coastal profile: cooler and markedly more humid.
    pub fn coastal() -> Self {
        Self::with_baseline(17.0, 78.0)
    }

    fn with_baseline(temperature_base: f32, humidity_base: f32) -> Self {
        let descriptor = DeviceDescriptor {
            name: "meteo".into(),
            kind: DeviceKind::Sensor,
            channel_names: vec!["temperature".into(), "humidity".into()],
            min_range: -40.0,
            max_range: 100.0,
            in_signals: vec!["analog".into()],
            out_signal: Some("digital".into()),
            bus_types: vec![BusFamily::I2c],
            manufacturing: serde_json::json!({
                "vendor": "SimWorks",
                "part": "MET-2/sim",
            }),
        };
        let channels = descriptor.quantity_channels();
        Self {
            descriptor,
            temperature_base,
            humidity_base,
            steps: vec![0; channels],
        }
    }

    fn sample(&self, channel: usize, step: u32) -> f32 {
        match channel {
            0 => self.temperature_base + 0.1 * (step % 5) as f32,
            _ => self.humidity_base + if (step / 2) % 2 == 0 { 0.0 } else { 8.0 },
        }
    }
}

impl DeviceDriver for SimSensor {
    fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    fn read(&mut self, channel: usize) -> Result<f32, DriverError> {
        let step = match self.steps.get_mut(channel) {
            Some(step) => step,
            None => return Err(DriverError::ChannelOutOfRange),
        };
        let current = *step;
        *step += 1;
        Ok(self.sample(channel, current))
    }
}

// ---------------------------------------------------------------------------
// Simulated actuator
// ---------------------------------------------------------------------------

/// Two-channel relay board that logs and records every command.
pub struct SimActuator {
    descriptor: DeviceDescriptor,
    applied: Vec<(usize, ChannelCommand)>,
}

impl SimActuator {
    pub fn relay() -> Self {
        Self {
            descriptor: DeviceDescriptor {
                name: "relay".into(),
                kind: DeviceKind::Actuator,
                channel_names: vec!["relay_a".into(), "relay_b".into()],
                min_range: 0.0,
                max_range: 1.0,
                in_signals: vec!["digital".into(), "digital".into()],
                out_signal: None,
                bus_types: vec![],
                manufacturing: serde_json::json!({
                    "vendor": "SimWorks",
                    "part": "RLY-2/sim",
                }),
            },
            applied: Vec::new(),
        }
    }

    /// Everything this driver has been told, in order.
    pub fn applied(&self) -> &[(usize, ChannelCommand)] {
        &self.applied
    }
}

impl DeviceDriver for SimActuator {
    fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    fn apply(&mut self, channel: usize, cmd: &ChannelCommand) -> Result<(), DriverError> {
        if channel >= self.descriptor.quantity_channels() {
            return Err(DriverError::ChannelOutOfRange);
        }
        debug!("relay channel {} <- {:?}", channel, cmd);
        self.applied.push((channel, *cmd));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Driver-module store backed by the simulation drivers above.
///
/// `meteo` accepts variant 0 (standard) and 1 (coastal); `relay` only the
/// default variant.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimCatalog;

impl DriverLoader for SimCatalog {
    fn load(
        &self,
        driver: &str,
        variant: Option<u8>,
    ) -> Result<Box<dyn DeviceDriver>, ModuleLoadError> {
        match driver {
            "meteo" => match variant {
                None | Some(0) => Ok(Box::new(SimSensor::meteo())),
                Some(1) => Ok(Box::new(SimSensor::coastal())),
                Some(_) => Err(ModuleLoadError::UnsupportedVariant),
            },
            "relay" => match variant {
                None | Some(0) => Ok(Box::new(SimActuator::relay())),
                Some(_) => Err(ModuleLoadError::UnsupportedVariant),
            },
            _ => Err(ModuleLoadError::UnknownDriver),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
