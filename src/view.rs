// src/view.rs
//! The zooming view window.
//!
//! Four offsets applied to the compute module's base bounding box, each moved
//! by its own fixed delta once per tick. No bounds are enforced: the offsets
//! drift for as long as the animation runs.

use serde::{Deserialize, Serialize};

/// Per-tick change of each offset.
///
/// The defaults zoom in by pulling xmin/ymin up and xmax/ymax down. They are
/// tuning constants, not derived values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomDeltas {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Default for ZoomDeltas {
    fn default() -> Self {
        ZoomDeltas {
            xmin: 0.01,
            xmax: -0.015,
            ymin: 0.013,
            ymax: -0.005,
        }
    }
}

impl ZoomDeltas {
    pub fn is_finite(&self) -> bool {
        [self.xmin, self.xmax, self.ymin, self.ymax]
            .iter()
            .all(|delta| delta.is_finite())
    }
}

/// The four offsets handed to `create_frame`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewSnapshot {
    pub xmin_offset: f64,
    pub xmax_offset: f64,
    pub ymin_offset: f64,
    pub ymax_offset: f64,
}

#[derive(Debug, Clone)]
pub struct ViewWindow {
    offsets: ViewSnapshot,
    deltas: ZoomDeltas,
    ticks: u64,
}

impl ViewWindow {
    /// A window with all offsets at zero.
    pub fn new(deltas: ZoomDeltas) -> Self {
        Self {
            offsets: ViewSnapshot::default(),
            deltas,
            ticks: 0,
        }
    }

    /// Advance every offset by its delta.
    pub fn tick(&mut self) {
        self.offsets.xmin_offset += self.deltas.xmin;
        self.offsets.xmax_offset += self.deltas.xmax;
        self.offsets.ymin_offset += self.deltas.ymin;
        self.offsets.ymax_offset += self.deltas.ymax;
        self.ticks += 1;
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.offsets
    }

    pub fn deltas(&self) -> ZoomDeltas {
        self.deltas
    }

    /// Number of `tick()` calls so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
