//! Host-loop poll timer adapter.
//!
//! On a real target the poll timer is a hardware periodic timer whose
//! callback pushes [`Event::PollTick`](crate::events::Event::PollTick).
//! On the host the demo loop plays that role itself: `arm` only records
//! the period, and the loop sleeps it off between ticks.

use log::info;

use crate::app::ports::PollTimer;

/// Timer whose schedule is executed by the host loop.
#[derive(Debug, Default)]
pub struct SimPollTimer {
    period_ms: Option<u32>,
}

impl SimPollTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Period the service armed, if polling is active.
    pub fn period_ms(&self) -> Option<u32> {
        self.period_ms
    }
}

impl PollTimer for SimPollTimer {
    fn arm(&mut self, period_ms: u32) {
        info!("poll timer armed at {} ms", period_ms);
        self.period_ms = Some(period_ms);
    }

    fn disarm(&mut self) {
        info!("poll timer disarmed");
        self.period_ms = None;
    }
}
