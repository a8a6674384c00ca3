// src/compute/mod.rs
//! Boundary with the fractal compute module.
//!
//! The core calls `FractalCompute::create_frame` once per tick. During that
//! call the compute module talks back through `ComputeHost`: it may query the
//! surface size at any time, and it emits the frame as an ordered sequence of
//! pixel runs. The call is fully synchronous; every run is applied before
//! `create_frame` returns.

pub mod mandelbrot;

use anyhow::Result;

use crate::raster::RasterError;
use crate::view::ViewSnapshot;

pub use mandelbrot::{ComplexBounds, MandelbrotCompute};

/// Capabilities the core exposes to a compute module.
pub trait ComputeHost {
    /// Surface width in texels.
    fn surface_width(&self) -> u32;

    /// Surface height in texels.
    fn surface_height(&self) -> u32;

    /// "The next `count` texels have color `color`."
    ///
    /// `color` must be in 0..=255 and `count` non-negative; anything else is a
    /// protocol violation and leaves the buffer untouched.
    fn accept_run(&mut self, color: i32, count: i32) -> Result<(), RasterError>;

    /// Diagnostic message from the compute module. No effect on state.
    fn log(&mut self, message: &str);
}

/// A compute module producing one frame's worth of pixel runs per call.
pub trait FractalCompute {
    /// Emit pixel runs for the region selected by `view`.
    ///
    /// A well-behaved module covers exactly `width * height` texels per call.
    /// Fewer leaves the frame open for the next call.
    fn create_frame(&mut self, view: ViewSnapshot, host: &mut dyn ComputeHost) -> Result<()>;
}

impl<F: FractalCompute + ?Sized> FractalCompute for Box<F> {
    fn create_frame(&mut self, view: ViewSnapshot, host: &mut dyn ComputeHost) -> Result<()> {
        (**self).create_frame(view, host)
    }
}
