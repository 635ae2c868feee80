//! Debounced autosave scheduling.
//!
//! Every mutation (re)arms a single deadline `debounce` after "now"; a burst
//! of edits therefore coalesces into one write of the final state. Time is
//! passed in explicitly, so the scheduler itself never sleeps or spawns.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

pub const DEFAULT_AUTOSAVE_DEBOUNCE: Duration = Duration::from_millis(2000);

/// Monotonic time source, measured from an arbitrary origin
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall-clock time via `Instant`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock for tests and hosts without `Instant` (wasm)
///
/// Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, at: Duration) {
        self.now.set(at);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[derive(Debug, Clone)]
pub struct AutosaveScheduler {
    debounce: Duration,
    deadline: Option<Duration>,
}

impl AutosaveScheduler {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            deadline: None,
        }
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Arm (or re-arm) the pending write
    pub fn schedule(&mut self, now: Duration) {
        self.deadline = Some(now + self.debounce);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    pub fn is_due(&self, now: Duration) -> bool {
        matches!(self.deadline, Some(deadline) if now >= deadline)
    }

    /// Disarm and return true when the deadline has passed
    pub fn take_due(&mut self, now: Duration) -> bool {
        if self.is_due(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }
}

impl Default for AutosaveScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_AUTOSAVE_DEBOUNCE)
    }
}
