//! Bus provisioning — the one-time startup step that turns the ordered bus
//! declarations into live buses.
//!
//! Each declaration's pin options are resolved through the pin resolver port
//! (everything except the numeric `bitrate` is a pin descriptor), the family
//! is picked by the bus-name prefix, and the external bus driver constructs
//! and registers the bus, handing back its internal identity. The resulting
//! table is what device creation resolves bus references against.

use log::{debug, warn};
use serde::Serialize;

use crate::app::ports::{BusProvisioner, PinResolver};
use crate::config::BusDecl;
use crate::error::Result;
use crate::pins::PinId;

// ---------------------------------------------------------------------------
// Bus identities
// ---------------------------------------------------------------------------

/// Bus family, selected by the declared name's prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BusFamily {
    #[serde(rename = "I2C")]
    I2c,
    #[serde(rename = "SPI")]
    Spi,
    #[serde(rename = "UART")]
    Uart,
}

impl BusFamily {
    /// Derive the family from a bus name (`I2C1`, `SPI1`, `UART2`, …).
    pub fn from_name(name: &str) -> Option<Self> {
        if name.starts_with("I2C") {
            Some(Self::I2c)
        } else if name.starts_with("SPI") {
            Some(Self::Spi)
        } else if name.starts_with("UART") {
            Some(Self::Uart)
        } else {
            None
        }
    }
}

impl core::fmt::Display for BusFamily {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::I2c => write!(f, "I2C"),
            Self::Spi => write!(f, "SPI"),
            Self::Uart => write!(f, "UART"),
        }
    }
}

/// Opaque internal identity of a provisioned bus, assigned by the bus driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusHandle(pub u8);

/// One successfully provisioned bus.
#[derive(Debug, Clone)]
pub struct ProvisionedBus {
    pub name: String,
    pub family: BusFamily,
    pub handle: BusHandle,
}

// ---------------------------------------------------------------------------
// Provisioned-bus table
// ---------------------------------------------------------------------------

/// Table of provisioned buses, in declaration order.
#[derive(Debug, Default)]
pub struct BusRegistry {
    buses: Vec<ProvisionedBus>,
}

impl BusRegistry {
    pub fn new() -> Self {
        Self { buses: Vec::new() }
    }

    /// Record a provisioned bus.
    pub fn push(&mut self, bus: ProvisionedBus) {
        self.buses.push(bus);
    }

    /// Look a bus up by its declared name.
    pub fn find(&self, name: &str) -> Option<&ProvisionedBus> {
        self.buses.iter().find(|b| b.name == name)
    }

    pub fn len(&self) -> usize {
        self.buses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProvisionedBus> {
        self.buses.iter()
    }
}

// ---------------------------------------------------------------------------
// Initialization
// ---------------------------------------------------------------------------

/// Provision every declared bus, in declaration order.
///
/// A declaration whose name matches no family prefix is logged and skipped;
/// a pin descriptor that fails to resolve aborts the whole initialization.
pub fn init_buses(
    decls: &[BusDecl],
    pins: &impl PinResolver,
    driver: &mut impl BusProvisioner,
) -> Result<BusRegistry> {
    let mut registry = BusRegistry::new();

    for decl in decls {
        let Some(family) = BusFamily::from_name(&decl.name) else {
            warn!("bus '{}': unknown family prefix, skipping", decl.name);
            continue;
        };

        let mut resolved: Vec<(&str, PinId)> = Vec::with_capacity(decl.pins.len());
        for binding in &decl.pins {
            let pin = pins.resolve(&binding.descriptor)?;
            resolved.push((binding.role.as_str(), pin));
        }

        let handle = driver.add_bus(family, &resolved, decl.bitrate);
        debug!(
            "bus '{}' provisioned as {} handle {:?}",
            decl.name, family, handle
        );
        registry.buses.push(ProvisionedBus {
            name: decl.name.clone(),
            family,
            handle,
        });
    }

    Ok(registry)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
