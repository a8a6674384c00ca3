// src/lib.rs

//! Library crate for `fractal-zoom`.
//!
//! A compute module streams "next N pixels are color C" runs; the raster
//! accumulator assembles them into frames; the animation driver re-invokes the
//! compute module once per refresh with a slowly shifting view window until
//! the watchdog stops it.

/// Animation driver, watchdog and session wiring.
pub mod animation;
/// Compute-module boundary and the reference Mandelbrot module.
pub mod compute;
/// Configuration management.
pub mod config;
/// Frame presentation.
pub mod display;
/// Clocks and the cooperative refresh loop.
pub mod platform;
/// Pixel-run accumulation into frame buffers.
pub mod raster;
/// The zooming view window.
pub mod view;
