//! SensorHub — Host Demo Entry Point
//!
//! Wires the hexagonal core to the simulation adapters and runs the same
//! event loop a deployment would drive from timer and transport callbacks.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  StaticConfig    BoardPinMap    SimBusDriver    SimCatalog     │
//! │  (ConfigSource)  (PinResolver)  (BusProvisioner) (DriverLoader)│
//! │  SimPollTimer    LogEventSink                                  │
//! │  (PollTimer)     (EventSink)                                   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              HubService (pure logic)                   │    │
//! │  │  Registry · Poller · Dispatch · Metadata               │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::collections::VecDeque;

use anyhow::Result;
use log::info;

use sensorhub::adapters::board_pins::BoardPinMap;
use sensorhub::adapters::log_sink::LogEventSink;
use sensorhub::adapters::sim_bus::SimBusDriver;
use sensorhub::adapters::sim_timer::SimPollTimer;
use sensorhub::adapters::static_config::StaticConfig;
use sensorhub::app::commands::HubCommand;
use sensorhub::app::service::HubService;
use sensorhub::config::CreateOptions;
use sensorhub::dispatch::WriteRequest;
use sensorhub::drivers::sim::SimCatalog;
use sensorhub::events::{self, push_event, Event};

fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn main() -> Result<()> {
    // ── 1. Logging bootstrap ──────────────────────────────────
    setup_tracing();

    info!("╔══════════════════════════════════════╗");
    info!("║  SensorHub v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Construct adapters ─────────────────────────────────
    let config = StaticConfig::demo();
    let pins = BoardPinMap;
    let mut bus_driver = SimBusDriver::new();
    let catalog = SimCatalog;
    let mut timer = SimPollTimer::new();
    let mut sink = LogEventSink::new();

    // ── 3. Construct hub service + provision buses ────────────
    let mut hub = HubService::new();
    hub.init_buses(&config, &pins, &mut bus_driver)?;

    // ── 4. Register configured devices ────────────────────────
    let opts = CreateOptions::default();
    for id in ["meteo-1", "relay-1"] {
        let channels = hub.create_device(id, &opts, &config, &pins, &catalog)?;
        info!("device '{}' ready with {} channel(s)", id, channels.len());
    }

    // ── 5. Scripted command feed ──────────────────────────────
    // Stands in for the inbound transport: each entry is delivered
    // through one CommandReady event, one per loop lap.
    let mut inbox: VecDeque<HubCommand> = VecDeque::from([
        HubCommand::GetInfo,
        HubCommand::StartPolling { freq_hz: Some(2.0) },
        HubCommand::Write(WriteRequest::new("relay-1-0", "On")),
        HubCommand::Write(WriteRequest::with_args("relay-1-1", "SetValue", &[0.75])),
        HubCommand::Write(WriteRequest::new("relay-1-0", "Off")),
        HubCommand::GetInfo,
        HubCommand::StopPolling,
    ]);

    info!("System ready. Entering event loop.");

    // ── 6. Event loop ─────────────────────────────────────────
    let mut idle_laps = 0u32;

    loop {
        // Simulate the poll timer via sleep; on a target build a hardware
        // timer pushes PollTick at the armed period instead.
        let lap_ms = hub.poll_period_ms().unwrap_or(100);
        std::thread::sleep(std::time::Duration::from_millis(u64::from(lap_ms)));

        if hub.is_polling() {
            push_event(Event::PollTick);
        }
        if inbox.is_empty() {
            idle_laps += 1;
            if idle_laps > 3 {
                push_event(Event::Shutdown);
            }
        } else {
            push_event(Event::CommandReady);
        }

        // Process all pending events.
        let mut shutdown = false;

        events::drain_events(|event| match event {
            Event::PollTick => hub.poll_tick(&mut sink),

            Event::CommandReady => {
                if let Some(cmd) = inbox.pop_front() {
                    hub.handle_command(cmd, &mut timer, &mut sink);
                }
            }

            Event::Shutdown => shutdown = true,
        });

        if shutdown {
            break;
        }
    }

    info!(
        "Event loop done, {} device(s) registered.",
        hub.registry().len()
    );
    Ok(())
}
