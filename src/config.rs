//! Hub configuration model.
//!
//! The shapes handed out by the configuration source: an **ordered** list of
//! bus declarations (later device entries reference buses by name, so
//! declaration order is load-bearing) and per-device creation entries keyed
//! by device ID. All of it round-trips through JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One named pin option of a bus declaration, e.g. `sda → "D4"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinBinding {
    /// Role of the pin on the bus (`sda`, `scl`, `tx`, …).
    pub role: String,
    /// Board pin descriptor, resolved at provisioning time.
    pub descriptor: String,
}

/// One bus to provision at startup.
///
/// The bus family is not stored — it is derived from the name prefix
/// (`I2C…`, `SPI…`, `UART…`) at provisioning time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusDecl {
    /// Bus name, also the key device configs use to reference it.
    pub name: String,
    /// Line bitrate in Hz; `None` leaves the bus driver's default.
    #[serde(default)]
    pub bitrate: Option<u32>,
    /// Pin options in declaration order.
    #[serde(default)]
    pub pins: Vec<PinBinding>,
}

/// Creation entry for one device, fetched by ID through the config source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Name of the driver module to load.
    pub driver: String,
    /// Name of the provisioned bus the device sits on, if any.
    #[serde(default)]
    pub bus: Option<String>,
    /// Pin descriptors the device claims exclusively.
    #[serde(default)]
    pub pins: Vec<String>,
}

/// Whole-hub configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    /// Buses to provision, in declaration order.
    #[serde(default)]
    pub buses: Vec<BusDecl>,
    /// Device creation entries, keyed by device ID.
    #[serde(default)]
    pub devices: BTreeMap<String, DeviceConfig>,
}

/// Caller-side options for device creation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateOptions {
    /// Driver module variant selector, for drivers shipping several builds.
    pub module_variant: Option<u8>,
}

impl BusDecl {
    fn pin(role: &str, descriptor: &str) -> PinBinding {
        PinBinding {
            role: role.into(),
            descriptor: descriptor.into(),
        }
    }
}

impl Default for HubConfig {
    /// Demo topology: one I²C bus carrying a two-channel environment sensor,
    /// one UART bus, and a bus-less two-channel relay board.
    fn default() -> Self {
        let mut devices = BTreeMap::new();
        devices.insert(
            "meteo-1".into(),
            DeviceConfig {
                driver: "meteo".into(),
                bus: Some("I2C1".into()),
                pins: vec!["D2".into()],
            },
        );
        devices.insert(
            "relay-1".into(),
            DeviceConfig {
                driver: "relay".into(),
                bus: None,
                pins: vec!["D7".into(), "D8".into()],
            },
        );

        Self {
            buses: vec![
                BusDecl {
                    name: "I2C1".into(),
                    bitrate: Some(400_000),
                    pins: vec![BusDecl::pin("sda", "D4"), BusDecl::pin("scl", "D5")],
                },
                BusDecl {
                    name: "UART2".into(),
                    bitrate: Some(115_200),
                    pins: vec![BusDecl::pin("tx", "D0"), BusDecl::pin("rx", "D1")],
                },
            ],
            devices,
        }
    }
}
