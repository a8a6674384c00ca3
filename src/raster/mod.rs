// src/raster/mod.rs
//! Raster streaming: pixel runs in, complete frames out.
//!
//! - `run`: the pixel-run contract and its mapping to buffer offsets
//! - `frame`: the RGBA frame buffer
//! - `accumulator`: cursor bookkeeping and frame hand-off

pub mod accumulator;
pub mod error;
pub mod frame;
pub mod run;


pub use accumulator::RasterStreamAccumulator;
pub use error::RasterError;
pub use frame::{FrameBuffer, Texel, BYTES_PER_TEXEL};
pub use run::{texel_index, PixelRun, TexelSpan};
