//! Board pin-map adapter.
//!
//! Resolves string descriptors against the built-in board pin map in
//! [`crate::pins`]. The map is compiled in; a different board revision
//! would ship its own resolver behind the same port.

use crate::app::ports::PinResolver;
use crate::error::PinResolutionError;
use crate::pins::PinId;

/// Resolver over the built-in digital/analog/alias pin map.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardPinMap;

impl PinResolver for BoardPinMap {
    fn resolve(&self, descriptor: &str) -> Result<PinId, PinResolutionError> {
        crate::pins::lookup(descriptor).ok_or(PinResolutionError::UnknownDescriptor)
    }
}
