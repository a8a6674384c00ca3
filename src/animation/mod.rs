// src/animation/mod.rs
//! Animation control: the tick state machine, the shutdown watchdog, and the
//! session wiring them to a frame loop.

pub mod driver;
pub mod session;
pub mod watchdog;

#[cfg(test)]
mod tests;

pub use driver::{AnimationDriver, DriverState, StopReason};
pub use session::{SessionReport, ZoomSession};
pub use watchdog::{CancellationFlag, Watchdog};
