//! Simulated bus driver adapter.
//!
//! Stands in for the platform's bus layer on host builds: every `add_bus`
//! call is logged, recorded, and answered with the next sequential handle.
//! No transaction ever touches hardware.

use log::info;

use crate::app::ports::BusProvisioner;
use crate::bus::{BusFamily, BusHandle};
use crate::pins::PinId;

/// One bus as the simulated driver brought it up.
#[derive(Debug, Clone)]
pub struct SimBus {
    pub family: BusFamily,
    pub pins: Vec<(String, PinId)>,
    pub bitrate: Option<u32>,
}

/// Bus driver that provisions into a table instead of silicon.
#[derive(Debug, Default)]
pub struct SimBusDriver {
    provisioned: Vec<SimBus>,
}

impl SimBusDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every bus brought up so far, in provisioning order.
    pub fn provisioned(&self) -> &[SimBus] {
        &self.provisioned
    }
}

impl BusProvisioner for SimBusDriver {
    fn add_bus(
        &mut self,
        family: BusFamily,
        pins: &[(&str, PinId)],
        bitrate: Option<u32>,
    ) -> BusHandle {
        let handle = BusHandle(self.provisioned.len() as u8);
        info!(
            "sim bus: {} #{} up, {} pin(s), bitrate {:?}",
            family,
            handle.0,
            pins.len(),
            bitrate
        );
        self.provisioned.push(SimBus {
            family,
            pins: pins
                .iter()
                .map(|(role, pin)| ((*role).to_string(), *pin))
                .collect(),
            bitrate,
        });
        handle
    }
}
