//! Hub service — the hexagonal core.
//!
//! [`HubService`] owns the device registry, the polling state machine, and
//! the provisioned-bus table.  It exposes a clean, transport-agnostic API.
//! All I/O flows through port traits injected at call sites, making the
//! entire service testable with mock adapters.
//!
//! ```text
//!  ConfigSource ──▶ ┌────────────────────────┐ ──▶ EventSink
//!  DriverLoader ──▶ │       HubService        │
//!     PollTimer ◀── │ Registry · Poller · Bus │
//!                   └────────────────────────┘
//! ```

use log::{info, warn};

use crate::bus::{self, BusRegistry};
use crate::config::CreateOptions;
use crate::device::ChannelId;
use crate::dispatch::{self, DispatchFailure, WriteRequest};
use crate::error::Result;
use crate::factory;
use crate::metadata;
use crate::poller::{Poller, StartOutcome};
use crate::registry::Registry;

use super::commands::HubCommand;
use super::events::HubEvent;
use super::ports::{BusProvisioner, ConfigSource, DriverLoader, EventSink, PinResolver, PollTimer};

// ───────────────────────────────────────────────────────────────
// HubService
// ───────────────────────────────────────────────────────────────

/// The hub service orchestrates registry, polling, and dispatch.
pub struct HubService {
    registry: Registry,
    poller: Poller,
    buses: BusRegistry,
    bus_init_done: bool,
}

impl HubService {
    /// Construct an empty service: no devices, no buses, polling stopped.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            poller: Poller::new(),
            buses: BusRegistry::new(),
            bus_init_done: false,
        }
    }

    // ── Startup ───────────────────────────────────────────────

    /// Provision every configured bus, in declaration order.
    ///
    /// Runs once per process; a repeated call is logged and ignored so a
    /// careless host cannot double-provision the hardware.
    pub fn init_buses(
        &mut self,
        config: &impl ConfigSource,
        pins: &impl PinResolver,
        driver: &mut impl BusProvisioner,
    ) -> Result<()> {
        if self.bus_init_done {
            warn!("bus initialization already done, ignoring repeated call");
            return Ok(());
        }
        let decls = config.buses_config();
        self.buses = bus::init_buses(&decls, pins, driver)?;
        self.bus_init_done = true;
        info!("provisioned {} bus(es)", self.buses.len());
        Ok(())
    }

    /// Create and register the device `id` from configuration.
    ///
    /// See [`factory::create_device`] for the gate sequence; on success the
    /// composite IDs of the new device's channels are returned.
    pub fn create_device(
        &mut self,
        id: &str,
        opts: &CreateOptions,
        config: &impl ConfigSource,
        pins: &impl PinResolver,
        loader: &impl DriverLoader,
    ) -> Result<Vec<ChannelId>> {
        factory::create_device(
            &mut self.registry,
            &self.buses,
            id,
            opts,
            config,
            pins,
            loader,
        )
    }

    // ── Polling session ───────────────────────────────────────

    /// Start a polling session and arm the host timer on transition.
    ///
    /// An `AlreadyRunning` outcome leaves the timer untouched.
    pub fn start_polling(
        &mut self,
        freq_hz: Option<f32>,
        timer: &mut impl PollTimer,
    ) -> Result<StartOutcome> {
        let outcome = self.poller.start(freq_hz)?;
        if let StartOutcome::Started { period_ms } = outcome {
            timer.arm(period_ms);
        }
        Ok(outcome)
    }

    /// Stop the polling session; disarms the timer iff one was running.
    pub fn stop_polling(&mut self, timer: &mut impl PollTimer) -> bool {
        let was_running = self.poller.stop();
        if was_running {
            timer.disarm();
        }
        was_running
    }

    /// Execute one polling tick and publish the package if non-empty.
    pub fn poll_tick(&mut self, sink: &mut impl EventSink) {
        let package = self.poller.run_tick(&mut self.registry);
        if !package.is_empty() {
            sink.emit(&HubEvent::SensorData(package));
        }
    }

    // ── Dispatch and introspection ────────────────────────────

    /// Route a write request to its actuator channel.
    pub fn execute_write(
        &mut self,
        request: &WriteRequest,
    ) -> core::result::Result<(), DispatchFailure> {
        dispatch::execute(&mut self.registry, request)
    }

    /// Collect device metadata and publish it as one info event.
    pub fn publish_info(&self, sink: &mut impl EventSink) {
        sink.emit(&HubEvent::SensorInfo(metadata::collect(&self.registry)));
    }

    // ── Command handling ──────────────────────────────────────

    /// Process one inbound command from the transport.
    ///
    /// Failures end here: the inbound topics carry no reply channel, so a
    /// bad start frequency or a refused write is logged and dropped.
    pub fn handle_command(
        &mut self,
        cmd: HubCommand,
        timer: &mut impl PollTimer,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            HubCommand::RegisterDevice(device) => {
                info!("registering externally built device '{}'", device.id());
                self.registry.add(device);
            }
            HubCommand::StartPolling { freq_hz } => match self.start_polling(freq_hz, timer) {
                Ok(StartOutcome::Started { period_ms }) => {
                    info!("polling session started, period {} ms", period_ms);
                }
                Ok(StartOutcome::AlreadyRunning) => {
                    info!("polling already running, start ignored");
                }
                Err(err) => warn!("start-polling rejected: {}", err),
            },
            HubCommand::StopPolling => {
                if !self.stop_polling(timer) {
                    info!("polling was not running, stop ignored");
                }
            }
            HubCommand::GetInfo => self.publish_info(sink),
            HubCommand::Write(request) => {
                if let Err(failure) = self.execute_write(&request) {
                    warn!(
                        "write to '{}' ({}) refused: {}",
                        request.target, request.capability, failure
                    );
                }
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn buses(&self) -> &BusRegistry {
        &self.buses
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_running()
    }

    /// Tick period of the active polling session, if any.
    pub fn poll_period_ms(&self) -> Option<u32> {
        self.poller.period_ms()
    }
}

impl Default for HubService {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
