// src/compute/mandelbrot.rs
//! Reference compute module: escape-time Mandelbrot emitted as pixel runs.
//!
//! The visible region is a base box in the complex plane shifted by the four
//! view offsets. Each scanline is run-length encoded, so flat regions (the
//! set's interior, the far exterior) cost one run instead of one call per
//! texel. A run never crosses a scanline.
//!
//! The shade of a point is its escape count scaled into 0..=255; points that
//! never escape are 0.

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::compute::{ComputeHost, FractalCompute};
use crate::view::ViewSnapshot;

/// A box in the complex plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexBounds {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Default for ComplexBounds {
    fn default() -> Self {
        ComplexBounds {
            xmin: -2.5,
            xmax: 1.0,
            ymin: -1.0,
            ymax: 1.0,
        }
    }
}

impl ComplexBounds {
    /// The base box shifted by the view offsets.
    pub fn shifted(&self, view: &ViewSnapshot) -> Self {
        ComplexBounds {
            xmin: self.xmin + view.xmin_offset,
            xmax: self.xmax + view.xmax_offset,
            ymin: self.ymin + view.ymin_offset,
            ymax: self.ymax + view.ymax_offset,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MandelbrotCompute {
    max_iterations: u32,
    bounds: ComplexBounds,
    announced: bool,
}

impl MandelbrotCompute {
    pub fn new(max_iterations: u32, bounds: ComplexBounds) -> Self {
        Self {
            max_iterations: max_iterations.max(1),
            bounds,
            announced: false,
        }
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Iterations of z = z^2 + c before |z| exceeds 2, capped at `max_iterations`.
    pub fn escape_time(&self, cx: f64, cy: f64) -> u32 {
        let (mut zx, mut zy) = (0.0f64, 0.0f64);
        let mut iterations = 0;
        while iterations < self.max_iterations && zx * zx + zy * zy <= 4.0 {
            let next_x = zx * zx - zy * zy + cx;
            zy = 2.0 * zx * zy + cy;
            zx = next_x;
            iterations += 1;
        }
        iterations
    }

    /// Maps an escape count onto a color value.
    pub fn shade(&self, iterations: u32) -> u8 {
        if iterations >= self.max_iterations {
            return 0;
        }
        (iterations as u64 * 255 / self.max_iterations as u64) as u8
    }
}

impl FractalCompute for MandelbrotCompute {
    fn create_frame(&mut self, view: ViewSnapshot, host: &mut dyn ComputeHost) -> Result<()> {
        let width = host.surface_width();
        let height = host.surface_height();
        if !self.announced {
            host.log(&format!(
                "mandelbrot {}x{} max_iterations={}",
                width, height, self.max_iterations
            ));
            self.announced = true;
        }

        let region = self.bounds.shifted(&view);
        let dx = (region.xmax - region.xmin) / width as f64;
        let dy = (region.ymax - region.ymin) / height as f64;
        debug!("MandelbrotCompute: region {:?}", region);

        for row in 0..height {
            let cy = region.ymin + row as f64 * dy;
            let mut current: Option<(u8, i32)> = None;

            for column in 0..width {
                let cx = region.xmin + column as f64 * dx;
                let value = self.shade(self.escape_time(cx, cy));
                current = match current {
                    Some((run_value, count)) if run_value == value => Some((run_value, count + 1)),
                    Some((run_value, count)) => {
                        host.accept_run(run_value as i32, count)
                            .with_context(|| format!("run rejected on row {}", row))?;
                        Some((value, 1))
                    }
                    None => Some((value, 1)),
                };
            }

            if let Some((run_value, count)) = current {
                host.accept_run(run_value as i32, count)
                    .with_context(|| format!("run rejected on row {}", row))?;
            }
        }
        Ok(())
    }
}
