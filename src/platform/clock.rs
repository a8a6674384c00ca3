// src/platform/clock.rs
//! Time sources for the frame loop.
//!
//! `SystemClock` sleeps the thread for real. `ManualClock` jumps straight to
//! the requested instant, which makes multi-second runs instant and
//! deterministic in tests.

use std::thread;
use std::time::{Duration, Instant};

/// Monotonic time measured from the clock's own origin.
pub trait Clock {
    /// Time elapsed since the origin.
    fn now(&self) -> Duration;

    /// Block until `now() >= deadline`. Returns immediately if already past.
    fn sleep_until(&mut self, deadline: Duration);
}

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

    fn sleep_until(&mut self, deadline: Duration) {
        let now = self.now();
        if deadline > now {
            thread::sleep(deadline - now);
        }
    }
}

/// Virtual clock advanced only by `sleep_until` and `advance`.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward, e.g. to simulate a slow compute call.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep_until(&mut self, deadline: Duration) {
        if deadline > self.now {
            self.now = deadline;
        }
    }
}
