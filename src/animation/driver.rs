// src/animation/driver.rs
//! AnimationDriver - one compute invocation and one view advance per refresh.
//!
//! ## States
//! - `Running` (initial): each tick checks the cancellation flag, invokes the
//!   compute module with the current view, advances the view, and requests
//!   the next refresh.
//! - `Stopped` (terminal): reached when the flag is observed set at the top of
//!   a tick or when the compute call fails. Further ticks do nothing.
//!
//! Cancellation is only checked at tick boundaries; a compute call already in
//! progress runs to completion.

use anyhow::Result;
use log::{debug, error, info};

use crate::animation::watchdog::CancellationFlag;
use crate::compute::{ComputeHost, FractalCompute};
use crate::platform::FrameScheduler;
use crate::view::{ViewSnapshot, ViewWindow, ZoomDeltas};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Running,
    Stopped,
}

/// Why the driver left `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Cancelled,
    ComputeFailed,
}

pub struct AnimationDriver<F: FractalCompute> {
    compute: F,
    view: ViewWindow,
    cancel: CancellationFlag,
    state: DriverState,
    stop_reason: Option<StopReason>,
    ticks: u64,
    frames_computed: u64,
}

impl<F: FractalCompute> AnimationDriver<F> {
    pub fn new(compute: F, deltas: ZoomDeltas, cancel: CancellationFlag) -> Self {
        Self {
            compute,
            view: ViewWindow::new(deltas),
            cancel,
            state: DriverState::Running,
            stop_reason: None,
            ticks: 0,
            frames_computed: 0,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// Refresh signals handled, including the one that observed cancellation.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Successful `create_frame` invocations.
    pub fn frames_computed(&self) -> u64 {
        self.frames_computed
    }

    pub fn view(&self) -> ViewSnapshot {
        self.view.snapshot()
    }

    pub fn cancellation_flag(&self) -> &CancellationFlag {
        &self.cancel
    }

    pub fn compute(&self) -> &F {
        &self.compute
    }

    /// Ask for the first refresh. Does nothing once stopped.
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.state == DriverState::Running {
            debug!("AnimationDriver: requesting first refresh");
            scheduler.request_frame();
        }
    }

    /// Handle one refresh signal.
    ///
    /// A compute failure moves the driver to `Stopped` and is returned to the
    /// caller; the view window is not advanced and no refresh is requested.
    pub fn tick(
        &mut self,
        host: &mut dyn ComputeHost,
        scheduler: &mut dyn FrameScheduler,
    ) -> Result<DriverState> {
        if self.state == DriverState::Stopped {
            return Ok(DriverState::Stopped);
        }
        self.ticks += 1;

        if self.cancel.is_cancelled() {
            info!(
                "AnimationDriver: cancellation observed on tick {}, stopping",
                self.ticks
            );
            self.stop(StopReason::Cancelled);
            return Ok(DriverState::Stopped);
        }

        let view = self.view.snapshot();
        debug!("AnimationDriver: tick {} view {:?}", self.ticks, view);
        if let Err(e) = self.compute.create_frame(view, host) {
            error!("AnimationDriver: compute failed on tick {}: {:#}", self.ticks, e);
            self.stop(StopReason::ComputeFailed);
            return Err(e.context(format!("compute failed on tick {}", self.ticks)));
        }
        self.frames_computed += 1;

        self.view.tick();
        scheduler.request_frame();
        Ok(DriverState::Running)
    }

    fn stop(&mut self, reason: StopReason) {
        self.state = DriverState::Stopped;
        self.stop_reason = Some(reason);
    }
}
