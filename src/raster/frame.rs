// src/raster/frame.rs
//! Frame storage: a fixed-size RGBA texel buffer reused in place across frames.

use crate::raster::error::RasterError;
use crate::raster::run::TexelSpan;

/// Number of bytes per texel (R, G, B, A).
pub const BYTES_PER_TEXEL: usize = 4;

/// A single RGBA texel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Texel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Texel {
    /// The texel written for a run value: red carries the value, green and blue
    /// stay at zero, alpha is fully opaque.
    pub const fn from_value(value: u8) -> Self {
        Texel {
            r: value,
            g: 0,
            b: 0,
            a: 255,
        }
    }
}

/// Fixed-length RGBA buffer of `width * height` texels, row-major.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    data: Box<[u8]>,
}

impl FrameBuffer {
    /// Allocates a zeroed buffer.
    ///
    /// Both dimensions must be non-zero and fit in a `u32`, and the byte size
    /// must fit in a `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::EmptySurface { width, height });
        }
        let oversized = RasterError::OversizedSurface { width, height };
        if u32::try_from(width).is_err() || u32::try_from(height).is_err() {
            return Err(oversized);
        }
        let len = width
            .checked_mul(height)
            .and_then(|texels| texels.checked_mul(BYTES_PER_TEXEL))
            .ok_or(oversized)?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len].into_boxed_slice(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total texel count (`width * height`).
    pub fn texel_count(&self) -> usize {
        self.width * self.height
    }

    /// Raw RGBA bytes, suitable for blitting.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Texel at linear index, or `None` if out of range.
    pub fn texel(&self, index: usize) -> Option<Texel> {
        let start = index.checked_mul(BYTES_PER_TEXEL)?;
        let bytes = self.data.get(start..start + BYTES_PER_TEXEL)?;
        Some(Texel {
            r: bytes[0],
            g: bytes[1],
            b: bytes[2],
            a: bytes[3],
        })
    }

    /// Texel at (column, row), or `None` outside the surface.
    pub fn texel_at(&self, column: usize, row: usize) -> Option<Texel> {
        if column >= self.width || row >= self.height {
            return None;
        }
        self.texel(row * self.width + column)
    }

    /// Red channel of every texel, in buffer order.
    pub fn red_channel(&self) -> Vec<u8> {
        self.data
            .chunks_exact(BYTES_PER_TEXEL)
            .map(|texel| texel[0])
            .collect()
    }

    /// FNV-1a hash of the raw bytes. Used to tell presented frames apart in logs.
    pub fn checksum(&self) -> u64 {
        const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
        const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;
        self.data.iter().fold(FNV_OFFSET, |hash, &byte| {
            (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
        })
    }

    /// Overwrites every texel covered by `span` with `texel`.
    ///
    /// The span must lie inside the buffer; the accumulator's cursors guarantee it.
    pub(crate) fn fill_span(&mut self, span: TexelSpan, texel: Texel) {
        let pattern = [texel.r, texel.g, texel.b, texel.a];
        for chunk in self.data[span.byte_range()].chunks_exact_mut(BYTES_PER_TEXEL) {
            chunk.copy_from_slice(&pattern);
        }
    }
}
