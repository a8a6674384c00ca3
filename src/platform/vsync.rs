// src/platform/vsync.rs
//! Cooperative frame loop driving refresh signals and one-shot timers.
//!
//! Everything runs on the calling thread. The loop sleeps until the next due
//! event, then fires it:
//! - a one-shot timer registered with `TimerQueue::set_timeout`, or
//! - a refresh signal, if one has been requested via `FrameScheduler`.
//!
//! Refresh signals fall on a fixed grid (`origin + k * frame_interval`), like
//! a display's vblank. At most one refresh request is pending at a time; the
//! frame callback must ask again if it wants another one. When a timer and a
//! refresh are due at the same instant the timer fires first.
//!
//! The loop returns once nothing is pending: no requested refresh, no timer.

use anyhow::{bail, Result};
use log::{debug, info, trace};
use std::time::Duration;

use crate::platform::clock::Clock;

/// Port through which the animation asks for its next wake-up.
pub trait FrameScheduler {
    /// Request one refresh signal. A second request while one is pending is a no-op.
    fn request_frame(&mut self);
}

/// Port for one-shot timers.
pub trait TimerQueue {
    /// Run `callback` once, `after` from now.
    fn set_timeout(&mut self, after: Duration, callback: Box<dyn FnOnce()>);
}

struct Timer {
    deadline: Duration,
    seq: u64,
    callback: Box<dyn FnOnce()>,
}

pub struct FrameLoop<C: Clock> {
    clock: C,
    origin: Duration,
    frame_interval: Duration,
    frame_requested: bool,
    next_refresh: Duration,
    last_refresh: Option<Duration>,
    refreshes: u64,
    timers: Vec<Timer>,
    next_seq: u64,
}

impl<C: Clock> FrameLoop<C> {
    /// Creates a loop whose refresh grid starts at the clock's current time.
    pub fn new(clock: C, frame_interval: Duration) -> Self {
        let origin = clock.now();
        Self {
            clock,
            origin,
            frame_interval: frame_interval.max(Duration::from_nanos(1)),
            frame_requested: false,
            next_refresh: origin,
            last_refresh: None,
            refreshes: 0,
            timers: Vec::new(),
            next_seq: 0,
        }
    }

    /// Creates a loop refreshing `target_fps` times per second.
    pub fn from_target_fps(clock: C, target_fps: u32) -> Result<Self> {
        if target_fps == 0 {
            bail!("target_fps must be greater than zero");
        }
        Ok(Self::new(
            clock,
            Duration::from_nanos(1_000_000_000 / target_fps as u64),
        ))
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Refresh signals delivered so far.
    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }

    pub fn has_pending_frame(&self) -> bool {
        self.frame_requested
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Runs until no refresh request and no timer remain.
    ///
    /// `on_frame` is called once per delivered refresh signal. An error from
    /// it ends the loop immediately and is returned; pending timers are dropped
    /// unfired.
    pub fn run<F>(&mut self, mut on_frame: F) -> Result<()>
    where
        F: FnMut(&mut dyn FrameScheduler) -> Result<()>,
    {
        info!(
            "FrameLoop: Started ({:?} per refresh)",
            self.frame_interval
        );
        let result = loop {
            let timer_due = self.earliest_timer();
            let refresh_due = self.frame_requested.then_some(self.next_refresh);

            match (timer_due, refresh_due) {
                (None, None) => break Ok(()),
                (Some((index, deadline)), None) => self.fire_timer(index, deadline),
                (Some((index, deadline)), Some(refresh)) if deadline <= refresh => {
                    self.fire_timer(index, deadline)
                }
                (_, Some(refresh)) => {
                    self.clock.sleep_until(refresh);
                    self.frame_requested = false;
                    self.last_refresh = Some(refresh);
                    self.refreshes += 1;
                    trace!("FrameLoop: refresh {} at {:?}", self.refreshes, refresh);
                    if let Err(e) = on_frame(self) {
                        break Err(e);
                    }
                }
            }
        };

        if result.is_err() {
            self.timers.clear();
            self.frame_requested = false;
        }
        debug!(
            "FrameLoop: exiting after {} refreshes at {:?}",
            self.refreshes,
            self.clock.now()
        );
        result
    }

    fn earliest_timer(&self) -> Option<(usize, Duration)> {
        self.timers
            .iter()
            .enumerate()
            .min_by_key(|(_, timer)| (timer.deadline, timer.seq))
            .map(|(index, timer)| (index, timer.deadline))
    }

    fn fire_timer(&mut self, index: usize, deadline: Duration) {
        self.clock.sleep_until(deadline);
        let timer = self.timers.swap_remove(index);
        trace!("FrameLoop: timer {} fired at {:?}", timer.seq, deadline);
        (timer.callback)();
    }

    /// First grid point at or after now, strictly after the last delivered refresh.
    fn next_grid_point(&self) -> Duration {
        let interval_ns = self.frame_interval.as_nanos();
        let elapsed_ns = self.clock.now().saturating_sub(self.origin).as_nanos();
        let k = elapsed_ns.div_ceil(interval_ns);
        let mut candidate = self.origin + Duration::from_nanos((k * interval_ns) as u64);
        if let Some(last) = self.last_refresh {
            if candidate <= last {
                candidate = last + self.frame_interval;
            }
        }
        candidate
    }
}

impl<C: Clock> FrameScheduler for FrameLoop<C> {
    fn request_frame(&mut self) {
        if self.frame_requested {
            trace!("FrameLoop: refresh already pending");
            return;
        }
        self.frame_requested = true;
        self.next_refresh = self.next_grid_point();
        if let Some(last) = self.last_refresh {
            let skipped = (self.next_refresh - last).as_nanos() / self.frame_interval.as_nanos();
            if skipped > 1 {
                debug!("FrameLoop: missed {} refreshes", skipped - 1);
            }
        }
    }
}

impl<C: Clock> TimerQueue for FrameLoop<C> {
    fn set_timeout(&mut self, after: Duration, callback: Box<dyn FnOnce()>) {
        let deadline = self.clock.now() + after;
        let seq = self.next_seq;
        self.next_seq += 1;
        debug!("FrameLoop: timer {} set for {:?}", seq, deadline);
        self.timers.push(Timer {
            deadline,
            seq,
            callback,
        });
    }
}
