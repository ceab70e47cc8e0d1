//! Static configuration adapter.
//!
//! Serves a [`HubConfig`] held in memory — either the built-in demo
//! topology or one parsed from a JSON document. A future adapter backed by
//! a file watcher or a provisioning channel would implement the same trait.

use crate::app::ports::ConfigSource;
use crate::config::{BusDecl, DeviceConfig, HubConfig};

/// Adapter serving a fixed configuration snapshot.
pub struct StaticConfig {
    config: HubConfig,
}

impl StaticConfig {
    pub fn new(config: HubConfig) -> Self {
        Self { config }
    }

    /// The built-in demo topology.
    pub fn demo() -> Self {
        Self::new(HubConfig::default())
    }

    /// Parse a configuration from a JSON document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }
}

impl ConfigSource for StaticConfig {
    fn buses_config(&self) -> Vec<BusDecl> {
        self.config.buses.clone()
    }

    fn device_config(&self, id: &str) -> Option<DeviceConfig> {
        self.config.devices.get(id).cloned()
    }
}
