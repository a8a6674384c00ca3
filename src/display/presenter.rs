// src/display/presenter.rs
//! Presenter trait - the hand-off point for completed frames.
//!
//! ## Ownership
//! The accumulator reuses one frame buffer in place. A presenter receives a
//! borrow that is only valid for the duration of `present_frame`; anything it
//! wants to keep (a copy, a checksum) must be taken before returning.

use anyhow::Result;

use crate::raster::FrameBuffer;

/// Receives completed frames and puts them on a surface.
pub trait Presenter {
    /// Display a complete frame.
    ///
    /// Called synchronously each time the last scanline of a frame is filled.
    /// An error stops the animation; the previously presented frame stays up.
    fn present_frame(&mut self, frame: &FrameBuffer) -> Result<()>;
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn present_frame(&mut self, frame: &FrameBuffer) -> Result<()> {
        (**self).present_frame(frame)
    }
}
