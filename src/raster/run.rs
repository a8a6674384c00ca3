// src/raster/run.rs
//! Pixel runs and how they map onto buffer offsets.
//!
//! A run is the unit the compute module speaks in: "the next `count` texels
//! have value `value`". This module only validates runs and computes where a
//! slice of one lands in the buffer; cursor bookkeeping lives in the
//! accumulator.

use std::ops::Range;

use crate::raster::error::RasterError;
use crate::raster::frame::BYTES_PER_TEXEL;

/// A validated pixel run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRun {
    pub value: u8,
    pub count: usize,
}

impl PixelRun {
    pub const fn new(value: u8, count: usize) -> Self {
        PixelRun { value, count }
    }

    /// Validates the raw integers a compute module hands across the boundary.
    ///
    /// The color must fit in 0..=255 and the count must be non-negative.
    pub fn from_raw(color: i32, count: i32) -> Result<Self, RasterError> {
        let value = u8::try_from(color).map_err(|_| RasterError::ColorOutOfRange { color })?;
        let count = usize::try_from(count).map_err(|_| RasterError::NegativeCount { count })?;
        Ok(PixelRun { value, count })
    }

    /// A zero-count run writes nothing.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// A contiguous stretch of texels inside a single scanline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TexelSpan {
    /// Linear index of the first texel.
    pub start: usize,
    /// Number of texels.
    pub len: usize,
}

impl TexelSpan {
    /// Span of `len` texels starting at (`column`, `row`) in a surface `width` wide.
    pub fn on_scanline(width: usize, row: usize, column: usize, len: usize) -> Self {
        TexelSpan {
            start: texel_index(width, row, column),
            len,
        }
    }

    /// Byte range of the span inside an RGBA buffer.
    pub fn byte_range(&self) -> Range<usize> {
        self.start * BYTES_PER_TEXEL..(self.start + self.len) * BYTES_PER_TEXEL
    }
}

/// Linear texel index of (`column`, `row`).
pub fn texel_index(width: usize, row: usize, column: usize) -> usize {
    row * width + column
}
