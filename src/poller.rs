//! Polling scheduler.
//!
//! A two-state machine (Stopped ⇄ Running) that owns the per-session value
//! cache. Each tick walks every sensor channel in registration order, reads
//! it, and reports the channels whose new value is *changed* under the
//! tolerance rule: equal means exactly equal, or within 5% of the previously
//! cached value. The cache always takes the newly observed value, reported
//! or not, so the comparison is self-correcting across ticks. The cache
//! lives exactly as long as one Running session — `stop` discards it, and
//! the first tick after a restart reports every channel once.
//!
//! The tick itself is synchronous; the periodic timer that drives it belongs
//! to the host and is armed with the period that `start` hands back.

use std::collections::HashMap;

use log::{info, warn};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::device::{channel_id, ChannelId};
use crate::error::{Error, Result, ValidationError};
use crate::registry::Registry;

/// Polling frequency used when `start` is called without one.
pub const DEFAULT_POLL_HZ: f32 = 4.0;

/// Relative tolerance of the change comparison.
pub const CHANGE_TOLERANCE: f32 = 0.05;

// ---------------------------------------------------------------------------
// Tick output
// ---------------------------------------------------------------------------

/// One tick's outgoing package: the changed channels, in visit order.
///
/// Serializes as a flat `composite id → value` map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataPackage {
    entries: Vec<(ChannelId, f32)>,
}

impl DataPackage {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[(ChannelId, f32)] {
        &self.entries
    }

    /// Value reported for `composite`, if it is part of this package.
    pub fn get(&self, composite: &str) -> Option<f32> {
        self.entries
            .iter()
            .find(|(id, _)| id.as_str() == composite)
            .map(|(_, value)| *value)
    }

    fn push(&mut self, id: ChannelId, value: f32) {
        self.entries.push((id, value));
    }
}

impl Serialize for DataPackage {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, value) in &self.entries {
            map.serialize_entry(id.as_str(), value)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Change comparison
// ---------------------------------------------------------------------------

/// The tolerance comparison deciding whether a reading is reported.
///
/// A reading is changed when there is no cached value yet, or when it is
/// neither exactly equal to nor within `CHANGE_TOLERANCE` of the cached
/// value. The tolerance band scales with the *cached* value: a channel whose
/// prior value was 0 reports any nonzero reading, and a negative cached
/// value gives a negative band, so only exact equality counts as unchanged.
pub fn value_changed(cached: Option<f32>, new: f32) -> bool {
    match cached {
        None => true,
        Some(old) => !(new == old || (new - old).abs() <= old * CHANGE_TOLERANCE),
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

enum PollState {
    Stopped,
    Running {
        period_ms: u32,
        cache: HashMap<ChannelId, f32>,
    },
}

/// Outcome of a `start` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Transitioned to Running; the host should arm its timer at this period.
    Started { period_ms: u32 },
    /// Already Running; the existing timer and cache stay untouched.
    AlreadyRunning,
}

/// The polling state machine.
pub struct Poller {
    state: PollState,
}

impl Poller {
    pub fn new() -> Self {
        Self {
            state: PollState::Stopped,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, PollState::Running { .. })
    }

    /// Tick period of the current session, if one is running.
    pub fn period_ms(&self) -> Option<u32> {
        match &self.state {
            PollState::Running { period_ms, .. } => Some(*period_ms),
            PollState::Stopped => None,
        }
    }

    /// Start a polling session at `freq_hz` (default 4 Hz).
    ///
    /// The frequency is validated first: zero, negative, or non-finite is an
    /// error whether or not a session is running. A valid call while already
    /// Running changes nothing and reports [`StartOutcome::AlreadyRunning`].
    pub fn start(&mut self, freq_hz: Option<f32>) -> Result<StartOutcome> {
        let freq = freq_hz.unwrap_or(DEFAULT_POLL_HZ);
        if !freq.is_finite() || freq <= 0.0 {
            return Err(Error::Validation(ValidationError::InvalidFrequency));
        }
        if self.is_running() {
            return Ok(StartOutcome::AlreadyRunning);
        }

        let period_ms = (1000.0 / freq).round() as u32;
        self.state = PollState::Running {
            period_ms,
            cache: HashMap::new(),
        };
        info!("polling started at {} Hz (period {} ms)", freq, period_ms);
        Ok(StartOutcome::Started { period_ms })
    }

    /// Stop the current session and discard its cache.
    ///
    /// Returns whether a session was actually running, so the host knows
    /// whether to disarm its timer.
    pub fn stop(&mut self) -> bool {
        match core::mem::replace(&mut self.state, PollState::Stopped) {
            PollState::Running { .. } => {
                info!("polling stopped");
                true
            }
            PollState::Stopped => false,
        }
    }

    /// Execute one tick: read every sensor channel and collect the changes.
    ///
    /// A channel whose read fails is logged, marked unavailable, and skipped
    /// for this tick; the remaining channels and devices are still visited.
    /// Returns an empty package when Stopped.
    pub fn run_tick(&mut self, registry: &mut Registry) -> DataPackage {
        let mut package = DataPackage::default();
        let PollState::Running { cache, .. } = &mut self.state else {
            return package;
        };

        for device in registry.sensors_mut() {
            for channel in 0..device.quantity_channels() {
                let value = match device.read_channel(channel) {
                    Ok(value) => value,
                    Err(err) => {
                        warn!(
                            "poll: '{}' channel {} read failed: {}",
                            device.id(),
                            channel,
                            err
                        );
                        continue;
                    }
                };
                let composite = channel_id(device.id(), channel);
                let changed = value_changed(cache.get(&composite).copied(), value);
                cache.insert(composite.clone(), value);
                if changed {
                    package.push(composite, value);
                }
            }
        }
        package
    }
}

impl Default for Poller {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
