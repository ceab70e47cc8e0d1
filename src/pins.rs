//! Pin identities and the named pin space of the hub board.
//!
//! Single source of truth — bus provisioning and device creation resolve
//! string descriptors against this module rather than hard-coding numbers.
//! Descriptors follow the board silkscreen: `D0`–`D15` for the digital
//! header, `A0`–`A7` for the analog header, plus a few named aliases.

use core::fmt;

/// Opaque handle for one physical pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PinId(pub u8);

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gpio{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Pin space
// ---------------------------------------------------------------------------

/// Digital header pins `D0`–`D15`, mapped to GPIO 0–15.
pub const DIGITAL_PIN_COUNT: u8 = 16;
/// Analog header pins `A0`–`A7`, mapped to GPIO 16–23.
pub const ANALOG_PIN_COUNT: u8 = 8;
/// GPIO number of the first analog pin.
pub const ANALOG_PIN_BASE: u8 = DIGITAL_PIN_COUNT;

/// Board-level aliases printed next to the header.
const ALIASES: &[(&str, u8)] = &[
    ("LED1", 13), // on-board status LED, shared with D13
    ("BTN1", 14), // user button, shared with D14
];

/// Resolve a silkscreen descriptor to its pin, or `None` if the descriptor
/// does not name a pin on this board.
pub fn lookup(descriptor: &str) -> Option<PinId> {
    if let Some((_, gpio)) = ALIASES.iter().find(|(name, _)| *name == descriptor) {
        return Some(PinId(*gpio));
    }

    let (port, index) = descriptor.split_at_checked(1)?;
    let index: u8 = index.parse().ok()?;
    match port {
        "D" if index < DIGITAL_PIN_COUNT => Some(PinId(index)),
        "A" if index < ANALOG_PIN_COUNT => Some(PinId(ANALOG_PIN_BASE + index)),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
