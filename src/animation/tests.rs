// src/animation/tests.rs

use super::*;
use crate::compute::{ComputeHost, FractalCompute};
use crate::config::Config;
use crate::display::MockPresenter;
use crate::platform::{FrameLoop, FrameScheduler, ManualClock, TimerQueue};
use crate::raster::RasterStreamAccumulator;
use crate::view::{ViewSnapshot, ZoomDeltas};
use anyhow::{anyhow, Result};
use std::time::Duration;
use test_log::test;

/// Fills the whole surface with one run per scanline; can fail on a chosen call.
#[derive(Default)]
struct ScriptedCompute {
    calls: u64,
    views: Vec<ViewSnapshot>,
    fail_on_call: Option<u64>,
}

impl FractalCompute for ScriptedCompute {
    fn create_frame(&mut self, view: ViewSnapshot, host: &mut dyn ComputeHost) -> Result<()> {
        self.calls += 1;
        self.views.push(view);
        if self.fail_on_call == Some(self.calls) {
            return Err(anyhow!("scripted failure"));
        }
        let color = (self.calls % 256) as i32;
        for _ in 0..host.surface_height() {
            host.accept_run(color, host.surface_width() as i32)?;
        }
        Ok(())
    }
}

#[derive(Default)]
struct CountingScheduler {
    requests: u32,
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&mut self) {
        self.requests += 1;
    }
}

fn small_config() -> Config {
    let mut config = Config::default();
    config.surface.width = 4;
    config.surface.height = 2;
    config
}

fn host() -> RasterStreamAccumulator<MockPresenter> {
    RasterStreamAccumulator::new(4, 2, MockPresenter::new()).unwrap()
}

#[test]
fn running_tick_computes_advances_and_reschedules() {
    let flag = CancellationFlag::new();
    let mut driver = AnimationDriver::new(ScriptedCompute::default(), ZoomDeltas::default(), flag);
    let mut host = host();
    let mut scheduler = CountingScheduler::default();

    driver.start(&mut scheduler);
    assert_eq!(scheduler.requests, 1);

    let state = driver.tick(&mut host, &mut scheduler).unwrap();
    assert_eq!(state, DriverState::Running);
    assert_eq!(scheduler.requests, 2);
    assert_eq!(driver.frames_computed(), 1);
    assert_eq!(host.presenter().frame_count(), 1);

    // The compute call saw the window before it advanced.
    assert_eq!(driver.compute().views[0], ViewSnapshot::default());
    assert!((driver.view().xmin_offset - 0.01).abs() < 1e-12);
    assert!((driver.view().xmax_offset + 0.015).abs() < 1e-12);
}

#[test]
fn cancellation_is_terminal() {
    let flag = CancellationFlag::new();
    let mut driver =
        AnimationDriver::new(ScriptedCompute::default(), ZoomDeltas::default(), flag.clone());
    let mut host = host();
    let mut scheduler = CountingScheduler::default();

    driver.tick(&mut host, &mut scheduler).unwrap();
    assert!(!driver.cancellation_flag().is_cancelled());
    flag.cancel();
    assert!(driver.cancellation_flag().is_cancelled());
    let view_at_cancel = driver.view();

    for _ in 0..50 {
        let state = driver.tick(&mut host, &mut scheduler).unwrap();
        assert_eq!(state, DriverState::Stopped);
    }

    assert_eq!(driver.compute().calls, 1);
    assert_eq!(scheduler.requests, 1);
    assert_eq!(driver.view(), view_at_cancel);
    assert_eq!(driver.stop_reason(), Some(StopReason::Cancelled));

    driver.start(&mut scheduler);
    assert_eq!(scheduler.requests, 1);
}

#[test]
fn compute_failure_stops_without_advancing() {
    let compute = ScriptedCompute {
        fail_on_call: Some(2),
        ..Default::default()
    };
    let mut driver = AnimationDriver::new(compute, ZoomDeltas::default(), CancellationFlag::new());
    let mut host = host();
    let mut scheduler = CountingScheduler::default();

    driver.tick(&mut host, &mut scheduler).unwrap();
    let view_before = driver.view();

    let err = driver.tick(&mut host, &mut scheduler).unwrap_err();
    assert!(format!("{:#}", err).contains("scripted failure"));
    assert_eq!(driver.state(), DriverState::Stopped);
    assert_eq!(driver.stop_reason(), Some(StopReason::ComputeFailed));
    assert_eq!(driver.view(), view_before);
    assert_eq!(scheduler.requests, 1);

    assert_eq!(driver.tick(&mut host, &mut scheduler).unwrap(), DriverState::Stopped);
    assert_eq!(driver.compute().calls, 2);
}

#[test]
fn watchdog_stops_a_sixty_hertz_loop_after_625_frames() {
    let mut frame_loop = FrameLoop::new(ManualClock::new(), Duration::from_millis(16));
    let flag = CancellationFlag::new();
    Watchdog::new(flag.clone()).arm(&mut frame_loop, Duration::from_millis(10_000));

    let mut driver =
        AnimationDriver::new(ScriptedCompute::default(), ZoomDeltas::default(), flag.clone());
    let mut host = host();
    driver.start(&mut frame_loop);

    let mut flag_by_tick = Vec::new();
    frame_loop
        .run(|scheduler| {
            flag_by_tick.push(flag.is_cancelled());
            driver.tick(&mut host, scheduler).map(|_| ())
        })
        .unwrap();

    // Ticks at 0, 16, ..., 9984 compute; the tick at 10000 sees the flag.
    assert_eq!(driver.ticks(), 626);
    assert_eq!(driver.compute().calls, 625);
    assert_eq!(host.presenter().frame_count(), 625);
    assert!(flag_by_tick[..625].iter().all(|cancelled| !cancelled));
    assert!(flag_by_tick[625]);
    assert_eq!(frame_loop.now(), Duration::from_millis(10_000));
}

#[test]
fn watchdog_flag_false_before_deadline_true_after() {
    let mut frame_loop = FrameLoop::new(ManualClock::new(), Duration::from_millis(7));
    let flag = CancellationFlag::new();
    let deadline = Duration::from_millis(100);
    Watchdog::new(flag.clone()).arm(&mut frame_loop, deadline);
    frame_loop.request_frame();

    // Flag as seen by each tick; ticks keep coming after the deadline.
    let mut observations = Vec::new();
    let reader = flag.clone();
    let mut remaining = 30;
    frame_loop
        .run(|scheduler| {
            observations.push(reader.is_cancelled());
            remaining -= 1;
            if remaining > 0 {
                scheduler.request_frame();
            }
            Ok(())
        })
        .unwrap();

    assert_eq!(observations.len(), 30);
    for (k, cancelled) in observations.iter().enumerate() {
        let tick_time = Duration::from_millis(7 * k as u64);
        assert_eq!(*cancelled, tick_time >= deadline, "tick at {:?}", tick_time);
    }
}

#[test]
fn session_reports_watchdog_stop() {
    let mut config = small_config();
    config.animation.watchdog_ms = 160;
    let frame_loop = FrameLoop::new(ManualClock::new(), Duration::from_millis(16));
    let mut session = ZoomSession::with_frame_loop(
        &config,
        ScriptedCompute::default(),
        MockPresenter::new(),
        frame_loop,
    )
    .unwrap();

    let report = session.run().unwrap();
    assert_eq!(report.ticks, 11);
    assert_eq!(report.frames_computed, 10);
    assert_eq!(report.frames_presented, 10);
    assert_eq!(report.stop_reason, Some(StopReason::Cancelled));
    assert_eq!(report.elapsed, Duration::from_millis(160));
    assert_eq!(session.presenter().frames()[9], vec![10; 8]);

    assert!(session.run().is_err());
}

#[test]
fn session_surfaces_compute_failure() {
    let compute = ScriptedCompute {
        fail_on_call: Some(3),
        ..Default::default()
    };
    let frame_loop = FrameLoop::new(ManualClock::new(), Duration::from_millis(16));
    let mut session =
        ZoomSession::with_frame_loop(&small_config(), compute, MockPresenter::new(), frame_loop)
            .unwrap();

    let err = session.run().unwrap_err();
    assert!(format!("{:#}", err).contains("compute failed on tick 3"));
    assert_eq!(session.driver().state(), DriverState::Stopped);
    assert_eq!(session.presenter().frame_count(), 2);
    assert_eq!(session.frame_loop().pending_timers(), 0);
}

#[test]
fn timer_queue_is_usable_through_the_trait_object() {
    let mut frame_loop = FrameLoop::new(ManualClock::new(), Duration::from_millis(16));
    let timers: &mut dyn TimerQueue = &mut frame_loop;
    let flag = CancellationFlag::new();
    Watchdog::new(flag.clone()).arm(timers, Duration::ZERO);
    frame_loop.run(|_| Ok(())).unwrap();
    assert!(flag.is_cancelled());
}
