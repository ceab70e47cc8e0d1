//! Sensor hub library.
//!
//! Device registry, polling scheduler, command dispatcher, and metadata
//! collector for a small embedded sensor/actuator hub, with a hexagonal
//! app layer so transports and peripherals stay behind port traits.

#![deny(unused_must_use)]

pub mod app;
pub mod bus;
pub mod config;
pub mod device;
pub mod dispatch;
pub mod events;
pub mod factory;
pub mod metadata;
pub mod pins;
pub mod poller;
pub mod registry;

mod error;

pub mod adapters;
pub mod drivers;

pub use error::{ConfigError, Error, ModuleLoadError, PinResolutionError, Result, ValidationError};
