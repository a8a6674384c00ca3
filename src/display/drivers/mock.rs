// src/display/drivers/mock.rs

use crate::display::presenter::Presenter;
use crate::raster::FrameBuffer;
use anyhow::{anyhow, Result};

/// Records the red channel of every presented frame. Can be told to fail.
#[derive(Debug, Default)]
pub struct MockPresenter {
    frames: Vec<Vec<u8>>,
    fail_on_present: bool,
}

impl MockPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A presenter whose every `present_frame` call fails.
    pub fn failing() -> Self {
        Self {
            frames: Vec::new(),
            fail_on_present: true,
        }
    }

    /// Red channel of each presented frame, in order.
    pub fn frames(&self) -> &[Vec<u8>] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl Presenter for MockPresenter {
    fn present_frame(&mut self, frame: &FrameBuffer) -> Result<()> {
        if self.fail_on_present {
            return Err(anyhow!("mock surface lost"));
        }
        self.frames.push(frame.red_channel());
        Ok(())
    }
}
