// src/platform/mod.rs
//! Platform services: time sources and the cooperative refresh loop.

pub mod clock;
pub mod vsync;

pub use clock::{Clock, ManualClock, SystemClock};
pub use vsync::{FrameLoop, FrameScheduler, TimerQueue};
