// src/raster/accumulator.rs
//! RasterStreamAccumulator - assembles pixel runs into complete frames.
//!
//! The accumulator owns the frame buffer and two cursors:
//! - `pixel_count`: column within the current scanline (`0..=width`)
//! - `raster_count`: current scanline (`0..=height`)
//!
//! Runs are written in arrival order. After every slice the accumulator
//! resolves a full scanline before accepting another texel, and hands a full
//! frame to its presenter before starting the next one. A single run may
//! cross any number of scanline and frame boundaries.
//!
//! Cursors persist across compute invocations, so a compute call that stops
//! mid-frame simply leaves the frame open until the next call finishes it.

use log::{debug, info, trace};

use crate::compute::ComputeHost;
use crate::display::Presenter;
use crate::raster::error::RasterError;
use crate::raster::frame::{FrameBuffer, Texel};
use crate::raster::run::{PixelRun, TexelSpan};

/// Turns a stream of pixel runs into presented frames.
pub struct RasterStreamAccumulator<P: Presenter> {
    frame: FrameBuffer,
    pixel_count: usize,
    raster_count: usize,
    frames_presented: u64,
    presenter: P,
}

impl<P: Presenter> RasterStreamAccumulator<P> {
    /// Creates an accumulator for a `width x height` surface.
    ///
    /// Fails with `EmptySurface` or `OversizedSurface` if the buffer cannot exist.
    pub fn new(width: usize, height: usize, presenter: P) -> Result<Self, RasterError> {
        let frame = FrameBuffer::new(width, height)?;
        debug!("RasterStreamAccumulator: {}x{} surface", width, height);
        Ok(Self {
            frame,
            pixel_count: 0,
            raster_count: 0,
            frames_presented: 0,
            presenter,
        })
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Column cursor within the current scanline.
    pub fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    /// Current scanline.
    pub fn raster_count(&self) -> usize {
        self.raster_count
    }

    /// Number of frames handed to the presenter so far.
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// The frame being filled. Only complete between hand-offs if the
    /// cursors are both at zero.
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// Writes `run.count` texels of `run.value` starting at the cursor.
    ///
    /// Returns the number of frames completed (and presented) by this run.
    /// A count of zero is a no-op.
    pub fn write_run(&mut self, run: PixelRun) -> Result<u64, RasterError> {
        if run.is_empty() {
            return Ok(0);
        }
        let width = self.frame.width();
        let texel = Texel::from_value(run.value);
        let mut remaining = run.count;
        let mut completed = 0;

        trace!(
            "write_run value={} count={} at ({}, {})",
            run.value,
            run.count,
            self.pixel_count,
            self.raster_count
        );

        while remaining > 0 {
            let take = remaining.min(width - self.pixel_count);
            let span = TexelSpan::on_scanline(width, self.raster_count, self.pixel_count, take);
            self.frame.fill_span(span, texel);
            self.pixel_count += take;
            remaining -= take;

            if self.pixel_count == width && self.complete_scanline()? {
                completed += 1;
            }
        }

        Ok(completed)
    }

    /// Rolls the cursor to the next scanline. Returns true if that finished a frame.
    fn complete_scanline(&mut self) -> Result<bool, RasterError> {
        self.pixel_count = 0;
        self.raster_count += 1;
        if self.raster_count < self.frame.height() {
            return Ok(false);
        }

        let result = self.presenter.present_frame(&self.frame);
        self.raster_count = 0;
        result.map_err(RasterError::Presentation)?;

        self.frames_presented += 1;
        debug!(
            "RasterStreamAccumulator: frame {} presented",
            self.frames_presented
        );
        Ok(true)
    }
}

// FrameBuffer::new keeps both dimensions within u32.
impl<P: Presenter> ComputeHost for RasterStreamAccumulator<P> {
    fn surface_width(&self) -> u32 {
        self.frame.width() as u32
    }

    fn surface_height(&self) -> u32 {
        self.frame.height() as u32
    }

    fn accept_run(&mut self, color: i32, count: i32) -> Result<(), RasterError> {
        let run = PixelRun::from_raw(color, count)?;
        self.write_run(run).map(|_| ())
    }

    fn log(&mut self, message: &str) {
        info!("compute: {}", message);
    }
}
