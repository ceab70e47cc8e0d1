//! Command dispatcher.
//!
//! Routes a wire-level write request — composite channel ID, capability
//! name, positional arguments — to the addressed actuator channel. The
//! capability name is resolved against the fixed [`ChannelCommand`]
//! allow-list; nothing outside that list is reachable, whatever name the
//! request carries. Failures are ordinary values, not errors: the caller
//! learns whether the dispatch happened, never what the driver returned.

use log::warn;

use crate::device::{ChannelCommand, DeviceKind};
use crate::registry::Registry;

/// Why a write request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchFailure {
    /// The composite ID does not resolve to a registered channel.
    UnknownChannel,
    /// The capability is not in the allow-list for the addressed device,
    /// or its required argument is missing.
    UnknownCapability,
}

impl core::fmt::Display for DispatchFailure {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownChannel => write!(f, "unknown channel"),
            Self::UnknownCapability => write!(f, "unknown capability"),
        }
    }
}

/// One write request as it arrives from the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteRequest {
    /// Composite channel ID, `<device id>-<channel index>`.
    pub target: String,
    /// Capability name (`On`, `Off`, `SetValue`, `SetOffset`).
    pub capability: String,
    /// Positional arguments; capabilities take at most one.
    pub args: heapless::Vec<f32, 4>,
}

impl WriteRequest {
    pub fn new(target: impl Into<String>, capability: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            capability: capability.into(),
            args: heapless::Vec::new(),
        }
    }

    /// Like [`WriteRequest::new`] with arguments; anything beyond the
    /// argument capacity is dropped.
    pub fn with_args(
        target: impl Into<String>,
        capability: impl Into<String>,
        args: &[f32],
    ) -> Self {
        let mut request = Self::new(target, capability);
        for arg in args.iter().take(request.args.capacity()) {
            let _ = request.args.push(*arg);
        }
        request
    }
}

/// Map a capability name and its arguments onto the allow-list.
///
/// Surplus arguments are ignored; a missing required argument makes the
/// capability unknown.
fn parse_command(capability: &str, args: &[f32]) -> Option<ChannelCommand> {
    match capability {
        "On" => Some(ChannelCommand::On),
        "Off" => Some(ChannelCommand::Off),
        "SetValue" => args.first().map(|v| ChannelCommand::SetValue(*v)),
        "SetOffset" => args.first().map(|v| ChannelCommand::SetOffset(*v)),
        _ => None,
    }
}

/// Execute a write request against the registry.
///
/// Success means the command was dispatched; a driver-side error is logged
/// and deliberately not surfaced. The registry is untouched on failure.
pub fn execute(
    registry: &mut Registry,
    request: &WriteRequest,
) -> core::result::Result<(), DispatchFailure> {
    let (device, channel) = registry
        .get_device_channel_mut(&request.target)
        .ok_or(DispatchFailure::UnknownChannel)?;

    if device.kind() != DeviceKind::Actuator {
        return Err(DispatchFailure::UnknownCapability);
    }
    let cmd =
        parse_command(&request.capability, &request.args).ok_or(DispatchFailure::UnknownCapability)?;

    if let Err(err) = device.apply(channel, &cmd) {
        warn!(
            "dispatch: '{}' {}: driver error: {}",
            request.target, request.capability, err
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
