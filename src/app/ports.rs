//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ HubService (domain)
//! ```
//!
//! Driven adapters (config store, pin map, bus driver, driver catalog,
//! timers, event sinks) implement these traits. The
//! [`HubService`](super::service::HubService) consumes them via generics,
//! so the domain core never touches a transport or a peripheral directly.
//!
//! ## Call discipline
//!
//! Every port call is synchronous and must be bounded: the service runs in
//! one cooperative loop, and a port that blocks stalls polling and dispatch
//! alike. Ports must not call back into the service.

use crate::bus::{BusFamily, BusHandle};
use crate::config::{BusDecl, DeviceConfig};
use crate::drivers::DeviceDriver;
use crate::error::{ModuleLoadError, PinResolutionError};
use crate::pins::PinId;

// ───────────────────────────────────────────────────────────────
// Config source (driven adapter: config store → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the hub's configuration.
pub trait ConfigSource {
    /// Bus declarations, in their configured order.
    fn buses_config(&self) -> Vec<BusDecl>;

    /// Configuration of the device `id`, if one is configured.
    fn device_config(&self, id: &str) -> Option<DeviceConfig>;
}

// ───────────────────────────────────────────────────────────────
// Pin resolver (driven adapter: board description → domain)
// ───────────────────────────────────────────────────────────────

/// Maps string pin descriptors (`"D4"`, `"A0"`, aliases) onto pin handles.
pub trait PinResolver {
    /// Resolve `descriptor`, failing if it does not denote a real pin.
    fn resolve(&self, descriptor: &str) -> Result<PinId, PinResolutionError>;
}

// ───────────────────────────────────────────────────────────────
// Bus driver (driven adapter: domain → bus hardware)
// ───────────────────────────────────────────────────────────────

/// Constructs and registers physical buses during bus initialization.
pub trait BusProvisioner {
    /// Bring up one bus and hand back its internal identity.
    ///
    /// `pins` carries `(role, pin)` pairs in declaration order; `bitrate`
    /// is present when the declaration configured one.
    fn add_bus(
        &mut self,
        family: BusFamily,
        pins: &[(&str, PinId)],
        bitrate: Option<u32>,
    ) -> BusHandle;
}

// ───────────────────────────────────────────────────────────────
// Driver catalog (driven adapter: module store → domain)
// ───────────────────────────────────────────────────────────────

/// Loads device driver modules by name.
pub trait DriverLoader {
    /// Load the driver `driver`, optionally selecting a module variant.
    fn load(
        &self,
        driver: &str,
        variant: Option<u8>,
    ) -> Result<Box<dyn DeviceDriver>, ModuleLoadError>;
}

// ───────────────────────────────────────────────────────────────
// Poll timer (driven adapter: domain → host timer)
// ───────────────────────────────────────────────────────────────

/// The periodic timer that drives polling ticks.
///
/// The service arms it when a polling session starts and disarms it when
/// the session stops; the timer owns the wait between ticks and must fire
/// at most one tick at a time.
pub trait PollTimer {
    /// Start firing ticks every `period_ms` milliseconds.
    fn arm(&mut self, period_ms: u32);

    /// Stop firing ticks.
    fn disarm(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → transport)
// ───────────────────────────────────────────────────────────────

/// The domain emits outbound [`HubEvent`](super::events::HubEvent)s
/// through this port. Adapters decide where they go (serial log, MQTT,
/// a pub/sub broker, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::HubEvent);
}
