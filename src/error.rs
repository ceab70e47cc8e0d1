//! Unified error types for the sensor hub.
//!
//! A single `Error` enum that every setup-time failure funnels into, keeping
//! the caller's error handling uniform: factory gates and bus provisioning
//! propagate with `?`, the service layer logs and carries on. All variants
//! are `Copy` so they can be passed around without allocation.
//!
//! Dispatch failures are deliberately *not* part of this taxonomy — they are
//! a non-fatal outcome value (`dispatch::DispatchFailure`), never an error.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level hub error
// ---------------------------------------------------------------------------

/// Every fallible setup operation in the hub funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An identifier or argument failed a registry invariant.
    Validation(ValidationError),
    /// Device or bus configuration is missing.
    Config(ConfigError),
    /// A driver module could not be loaded.
    ModuleLoad(ModuleLoadError),
    /// A pin descriptor did not resolve to a real pin.
    PinResolution(PinResolutionError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "validation: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::ModuleLoad(e) => write!(f, "module load: {e}"),
            Self::PinResolution(e) => write!(f, "pin resolution: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The device ID is already registered.
    DuplicateId,
    /// At least one requested pin is claimed by another device.
    PinsUnavailable,
    /// Polling frequency is not a positive finite number.
    InvalidFrequency,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId => write!(f, "device ID already in use"),
            Self::PinsUnavailable => write!(f, "pins already claimed"),
            Self::InvalidFrequency => write!(f, "frequency must be positive"),
        }
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No device configuration exists under the requested ID.
    DeviceNotFound,
    /// The configuration references a bus that was never provisioned.
    BusNotFound,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceNotFound => write!(f, "device configuration not found"),
            Self::BusNotFound => write!(f, "referenced bus not provisioned"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Module load errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleLoadError {
    /// No driver module is known under the configured name.
    UnknownDriver,
    /// The driver exists but does not support the requested variant.
    UnsupportedVariant,
}

impl fmt::Display for ModuleLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDriver => write!(f, "unknown driver module"),
            Self::UnsupportedVariant => write!(f, "driver variant not supported"),
        }
    }
}

impl From<ModuleLoadError> for Error {
    fn from(e: ModuleLoadError) -> Self {
        Self::ModuleLoad(e)
    }
}

// ---------------------------------------------------------------------------
// Pin resolution errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinResolutionError {
    /// The descriptor does not name a pin on this board.
    UnknownDescriptor,
}

impl fmt::Display for PinResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownDescriptor => write!(f, "descriptor does not name a real pin"),
        }
    }
}

impl From<PinResolutionError> for Error {
    fn from(e: PinResolutionError) -> Self {
        Self::PinResolution(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Hub-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
