// src/animation/session.rs
//! ZoomSession - wires the accumulator, driver, watchdog and frame loop together.

use anyhow::{anyhow, Context, Result};
use log::info;
use std::time::Duration;

use crate::animation::driver::{AnimationDriver, StopReason};
use crate::animation::watchdog::{CancellationFlag, Watchdog};
use crate::config::Config;
use crate::compute::FractalCompute;
use crate::display::Presenter;
use crate::platform::{Clock, FrameLoop};
use crate::raster::RasterStreamAccumulator;
use crate::view::ViewSnapshot;

/// Outcome of a completed session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    /// Refresh signals handled by the driver.
    pub ticks: u64,
    /// Successful compute invocations.
    pub frames_computed: u64,
    /// Frames handed to the presenter.
    pub frames_presented: u64,
    pub final_view: ViewSnapshot,
    pub stop_reason: Option<StopReason>,
    /// Clock time from start to the last event.
    pub elapsed: Duration,
}

pub struct ZoomSession<F: FractalCompute, P: Presenter, C: Clock> {
    driver: AnimationDriver<F>,
    accumulator: RasterStreamAccumulator<P>,
    frame_loop: FrameLoop<C>,
    watchdog: Option<Watchdog>,
    watchdog_after: Duration,
}

impl<F: FractalCompute, P: Presenter, C: Clock> ZoomSession<F, P, C> {
    /// Builds a session refreshing at `config.animation.target_fps`.
    pub fn new(config: &Config, compute: F, presenter: P, clock: C) -> Result<Self> {
        let frame_loop = FrameLoop::from_target_fps(clock, config.animation.target_fps)
            .context("Failed to create frame loop")?;
        Self::with_frame_loop(config, compute, presenter, frame_loop)
    }

    /// Builds a session on an existing frame loop (and its refresh interval).
    pub fn with_frame_loop(
        config: &Config,
        compute: F,
        presenter: P,
        frame_loop: FrameLoop<C>,
    ) -> Result<Self> {
        let accumulator = RasterStreamAccumulator::new(
            config.surface.width as usize,
            config.surface.height as usize,
            presenter,
        )
        .context("Failed to create raster accumulator")?;

        let flag = CancellationFlag::new();
        let driver = AnimationDriver::new(compute, config.animation.zoom, flag.clone());

        Ok(Self {
            driver,
            accumulator,
            frame_loop,
            watchdog: Some(Watchdog::new(flag)),
            watchdog_after: Duration::from_millis(config.animation.watchdog_ms),
        })
    }

    /// Arms the watchdog, starts the driver and runs the frame loop to completion.
    ///
    /// A compute failure ends the run and is returned as the error. A session
    /// runs once.
    pub fn run(&mut self) -> Result<SessionReport> {
        let watchdog = self
            .watchdog
            .take()
            .ok_or_else(|| anyhow!("session has already run"))?;
        let started = self.frame_loop.now();

        watchdog.arm(&mut self.frame_loop, self.watchdog_after);
        self.driver.start(&mut self.frame_loop);

        let driver = &mut self.driver;
        let accumulator = &mut self.accumulator;
        self.frame_loop
            .run(|scheduler| driver.tick(&mut *accumulator, scheduler).map(|_| ()))?;

        let report = SessionReport {
            ticks: self.driver.ticks(),
            frames_computed: self.driver.frames_computed(),
            frames_presented: self.accumulator.frames_presented(),
            final_view: self.driver.view(),
            stop_reason: self.driver.stop_reason(),
            elapsed: self.frame_loop.now().saturating_sub(started),
        };
        info!(
            "ZoomSession: finished after {} ticks, {} frames presented ({:?})",
            report.ticks, report.frames_presented, report.stop_reason
        );
        Ok(report)
    }

    pub fn driver(&self) -> &AnimationDriver<F> {
        &self.driver
    }

    pub fn accumulator(&self) -> &RasterStreamAccumulator<P> {
        &self.accumulator
    }

    pub fn presenter(&self) -> &P {
        self.accumulator.presenter()
    }

    pub fn frame_loop(&self) -> &FrameLoop<C> {
        &self.frame_loop
    }

    pub fn into_presenter(self) -> P {
        self.accumulator.into_presenter()
    }
}
