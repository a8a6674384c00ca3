// src/display/drivers/headless.rs
//! Headless presenter implementation.
//!
//! Stands in for a real surface: it validates each frame against the surface
//! size, records statistics, and optionally keeps a copy of the last frame.

use crate::display::presenter::Presenter;
use crate::raster::FrameBuffer;
use anyhow::{bail, Result};
use log::{debug, info, trace};

/// Running statistics of presented frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresentStats {
    pub frames_presented: u64,
    pub last_checksum: Option<u64>,
}

pub struct HeadlessPresenter {
    width_px: usize,
    height_px: usize,
    stats: PresentStats,
    capture_last_frame: bool,
    last_frame: Option<Box<[u8]>>,
}

impl HeadlessPresenter {
    pub fn new(width_px: usize, height_px: usize) -> Self {
        info!(
            "HeadlessPresenter::new() surface {}x{}",
            width_px, height_px
        );
        Self {
            width_px,
            height_px,
            stats: PresentStats::default(),
            capture_last_frame: false,
            last_frame: None,
        }
    }

    /// Keep a copy of the most recent frame's bytes.
    pub fn with_frame_capture(mut self) -> Self {
        self.capture_last_frame = true;
        self
    }

    pub fn stats(&self) -> PresentStats {
        self.stats
    }

    /// RGBA bytes of the last presented frame, if capture is enabled.
    pub fn last_frame(&self) -> Option<&[u8]> {
        self.last_frame.as_deref()
    }
}

impl Presenter for HeadlessPresenter {
    fn present_frame(&mut self, frame: &FrameBuffer) -> Result<()> {
        if frame.width() != self.width_px || frame.height() != self.height_px {
            bail!(
                "frame is {}x{} but surface is {}x{}",
                frame.width(),
                frame.height(),
                self.width_px,
                self.height_px
            );
        }

        let checksum = frame.checksum();
        trace!("HeadlessPresenter: Present checksum={:016x}", checksum);

        if self.capture_last_frame {
            match self.last_frame.as_mut() {
                Some(copy) => copy.copy_from_slice(frame.as_bytes()),
                None => self.last_frame = Some(frame.as_bytes().into()),
            }
        }

        self.stats.frames_presented += 1;
        self.stats.last_checksum = Some(checksum);
        debug!(
            "HeadlessPresenter: frame {} presented",
            self.stats.frames_presented
        );
        Ok(())
    }
}
