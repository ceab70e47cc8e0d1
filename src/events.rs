//! Host event queue.
//!
//! Events are produced by:
//! - The periodic poll timer (tick callbacks)
//! - The inbound transport (a hub command was queued)
//! - The host itself (shutdown request)
//!
//! Events are consumed by the service loop, which processes them one at a
//! time; the library stays single-threaded and every mutation of the
//! registry happens from that loop.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Poll timer   │────▶│              │     │              │
//! │ Transport    │────▶│  Event Queue │────▶│ Service Loop │
//! │ Host signal  │────▶│  (lock-free) │     │  (consumer)  │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```

use core::sync::atomic::{AtomicU8, Ordering};

/// Maximum number of pending events.
/// Power of 2 for efficient ring buffer modulo.
const EVENT_QUEUE_CAP: usize = 32;

/// Host event types, ordered by rough priority.
/// Lower discriminant = more urgent when multiple events are pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Event {
    // ── Control ──────────────────────────────────────────
    /// Host asked the service loop to wind down.
    Shutdown = 0,

    // ── Inbound traffic ──────────────────────────────────
    /// A hub command is waiting on the transport.
    CommandReady = 10,

    // ── Timers ───────────────────────────────────────────
    /// The periodic poll timer fired.
    PollTick = 20,
}

// ── Lock-free SPSC ring buffer ────────────────────────────────
//
// Timer and transport callbacks write (produce), the service loop
// reads (consume). Uses atomic head/tail indices. The buffer is
// kept in a static so callbacks can reach it without a handle.

static EVENT_HEAD: AtomicU8 = AtomicU8::new(0);
static EVENT_TAIL: AtomicU8 = AtomicU8::new(0);
// SAFETY: EVENT_BUFFER is accessed only through push_event (one writer
// context) and pop_event (the service loop, one reader context). The
// atomic head/tail indices enforce the SPSC discipline; no concurrent
// mutable access to the same slot is possible.
static mut EVENT_BUFFER: [u8; EVENT_QUEUE_CAP] = [0; EVENT_QUEUE_CAP];

/// Push an event into the queue.
/// Safe to call from a timer callback (lock-free).
/// Returns `false` if the queue is full (event dropped).
pub fn push_event(event: Event) -> bool {
    let head = EVENT_HEAD.load(Ordering::Relaxed);
    let tail = EVENT_TAIL.load(Ordering::Acquire);
    let next_head = (head + 1) % EVENT_QUEUE_CAP as u8;

    if next_head == tail {
        return false; // Queue full — drop event.
    }

    // SAFETY: single producer; the slot at `head` is not readable by the
    // consumer until the Release store below publishes it.
    unsafe {
        EVENT_BUFFER[head as usize] = event as u8;
    }

    EVENT_HEAD.store(next_head, Ordering::Release);
    true
}

/// Pop the next event from the queue.
/// Called from the service loop (single consumer).
/// Returns `None` if the queue is empty.
pub fn pop_event() -> Option<Event> {
    let tail = EVENT_TAIL.load(Ordering::Relaxed);
    let head = EVENT_HEAD.load(Ordering::Acquire);

    if tail == head {
        return None; // Empty.
    }

    let raw = unsafe { EVENT_BUFFER[tail as usize] };
    EVENT_TAIL.store((tail + 1) % EVENT_QUEUE_CAP as u8, Ordering::Release);

    event_from_u8(raw)
}

/// Drain all pending events into a callback, in FIFO order.
pub fn drain_events(mut handler: impl FnMut(Event)) {
    while let Some(event) = pop_event() {
        handler(event);
    }
}

/// Check if the event queue is empty.
pub fn queue_is_empty() -> bool {
    let tail = EVENT_TAIL.load(Ordering::Relaxed);
    let head = EVENT_HEAD.load(Ordering::Acquire);
    tail == head
}

/// Number of pending events.
pub fn queue_len() -> usize {
    let head = EVENT_HEAD.load(Ordering::Relaxed) as usize;
    let tail = EVENT_TAIL.load(Ordering::Relaxed) as usize;
    (head + EVENT_QUEUE_CAP - tail) % EVENT_QUEUE_CAP
}

// ── Internal ──────────────────────────────────────────────────

fn event_from_u8(raw: u8) -> Option<Event> {
    match raw {
        0 => Some(Event::Shutdown),
        10 => Some(Event::CommandReady),
        20 => Some(Event::PollTick),
        _ => None,
    }
}
