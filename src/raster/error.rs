// src/raster/error.rs
//! Errors raised while accumulating pixel runs into frames.

use std::fmt;

/// Failure modes of the raster stream.
///
/// `NegativeCount` and `ColorOutOfRange` are protocol violations: the compute
/// module broke the run contract and the buffer was left untouched.
/// `Presentation` wraps a presenter failure during a frame hand-off.
#[derive(Debug)]
pub enum RasterError {
    NegativeCount { count: i32 },
    ColorOutOfRange { color: i32 },
    EmptySurface { width: usize, height: usize },
    OversizedSurface { width: usize, height: usize },
    Presentation(anyhow::Error),
}

impl RasterError {
    /// True for contract breaches by the compute module.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            RasterError::NegativeCount { .. } | RasterError::ColorOutOfRange { .. }
        )
    }
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterError::NegativeCount { count } => {
                write!(f, "protocol violation: negative pixel run count {}", count)
            }
            RasterError::ColorOutOfRange { color } => {
                write!(f, "protocol violation: color value {} outside 0..=255", color)
            }
            RasterError::EmptySurface { width, height } => {
                write!(f, "surface must be non-empty, got {}x{}", width, height)
            }
            RasterError::OversizedSurface { width, height } => {
                write!(f, "surface {}x{} is too large to allocate", width, height)
            }
            RasterError::Presentation(e) => write!(f, "frame presentation failed: {}", e),
        }
    }
}

impl std::error::Error for RasterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RasterError::Presentation(e) => Some(&**e),
            _ => None,
        }
    }
}
