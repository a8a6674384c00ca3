// src/config.rs

//! Defines the configuration structures for `fractal-zoom`.
//!
//! The structs deserialize from JSON. Every level carries `#[serde(default)]`,
//! so a config file only needs the keys it wants to change:
//!
//! ```json
//! { "surface": { "width": 320, "height": 200 }, "animation": { "watchdog_ms": 5000 } }
//! ```
//!
//! The file path is taken from the `FRACTAL_ZOOM_CONFIG` environment variable.
//! Without it, the defaults below are used.

use anyhow::{bail, Context, Result};
use log::{info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::compute::ComplexBounds;
use crate::raster::BYTES_PER_TEXEL;
use crate::view::ZoomDeltas;

/// Environment variable naming the JSON config file.
pub const CONFIG_PATH_ENV: &str = "FRACTAL_ZOOM_CONFIG";

/// Process-wide configuration, loaded on first access.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::load_or_default);

// --- Top-Level Configuration Structure ---

/// The complete configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Pixel surface dimensions.
    pub surface: SurfaceConfig,
    /// Pacing, shutdown and zoom settings.
    pub animation: AnimationConfig,
    /// Settings for the built-in Mandelbrot compute module.
    pub fractal: FractalConfig,
}

// --- Surface Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        SurfaceConfig {
            width: 800,
            height: 600,
        }
    }
}

// --- Animation Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Refresh signals per second.
    pub target_fps: u32,
    /// Watchdog deadline in milliseconds. The animation stops at the first tick
    /// at or after this point.
    pub watchdog_ms: u64,
    /// Per-tick change of each view-window offset.
    pub zoom: ZoomDeltas,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            target_fps: 60,
            watchdog_ms: 10_000,
            zoom: ZoomDeltas::default(),
        }
    }
}

// --- Fractal Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FractalConfig {
    /// Escape-time iteration cap.
    pub max_iterations: u32,
    /// Base region of the complex plane before view offsets are applied.
    pub bounds: ComplexBounds,
}

impl Default for FractalConfig {
    fn default() -> Self {
        FractalConfig {
            max_iterations: 255,
            bounds: ComplexBounds::default(),
        }
    }
}

impl Config {
    /// Parses a JSON document. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse configuration JSON")
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Loads from `FRACTAL_ZOOM_CONFIG` if set, otherwise defaults.
    ///
    /// A file that cannot be read or parsed is logged and replaced by defaults.
    pub fn load_or_default() -> Self {
        let Some(path) = std::env::var_os(CONFIG_PATH_ENV) else {
            info!("{} not set, using default configuration", CONFIG_PATH_ENV);
            return Config::default();
        };
        match Self::load(Path::new(&path)) {
            Ok(config) => {
                info!("Configuration loaded from {:?}", path);
                config
            }
            Err(e) => {
                warn!("{:#}. Falling back to default configuration.", e);
                Config::default()
            }
        }
    }

    /// Rejects settings the core cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.surface.width == 0 || self.surface.height == 0 {
            bail!(
                "surface must be non-empty, got {}x{}",
                self.surface.width,
                self.surface.height
            );
        }
        let frame_bytes = (self.surface.width as usize)
            .checked_mul(self.surface.height as usize)
            .and_then(|texels| texels.checked_mul(BYTES_PER_TEXEL));
        if frame_bytes.is_none() {
            bail!(
                "surface {}x{} is too large to allocate",
                self.surface.width,
                self.surface.height
            );
        }
        if self.animation.target_fps == 0 {
            bail!("animation.target_fps must be greater than zero");
        }
        if !self.animation.zoom.is_finite() {
            bail!("animation.zoom deltas must be finite: {:?}", self.animation.zoom);
        }
        if self.fractal.max_iterations == 0 {
            bail!("fractal.max_iterations must be greater than zero");
        }
        let b = &self.fractal.bounds;
        if ![b.xmin, b.xmax, b.ymin, b.ymax].iter().all(|v| v.is_finite()) {
            bail!("fractal.bounds must be finite: {:?}", b);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn defaults_match_reference_behavior() {
        let config = Config::default();
        assert_eq!(config.surface.width, 800);
        assert_eq!(config.animation.target_fps, 60);
        assert_eq!(config.animation.watchdog_ms, 10_000);
        assert_eq!(config.animation.zoom.xmin, 0.01);
        assert_eq!(config.animation.zoom.xmax, -0.015);
        assert_eq!(config.animation.zoom.ymin, 0.013);
        assert_eq!(config.animation.zoom.ymax, -0.005);
        config.validate().unwrap();
    }

    #[test_log::test]
    fn partial_json_keeps_other_defaults() {
        let config = Config::from_json_str(
            r#"{ "surface": { "width": 320 }, "animation": { "zoom": { "xmax": -0.5 } } }"#,
        )
        .unwrap();
        assert_eq!(config.surface.width, 320);
        assert_eq!(config.surface.height, 600);
        assert_eq!(config.animation.zoom.xmax, -0.5);
        assert_eq!(config.animation.zoom.xmin, 0.01);
        assert_eq!(config.fractal, FractalConfig::default());
    }

    #[test_log::test]
    fn malformed_json_is_an_error() {
        assert!(Config::from_json_str("{ surface: ").is_err());
        assert!(Config::from_json_str(r#"{ "surface": { "width": -3 } }"#).is_err());
    }

    #[test_log::test]
    fn validate_rejects_unusable_settings() {
        let mut config = Config::default();
        config.surface.height = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.surface.width = u32::MAX;
        config.surface.height = u32::MAX;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("too large"));

        let mut config = Config::default();
        config.animation.target_fps = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.animation.zoom.ymin = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.fractal.max_iterations = 0;
        assert!(config.validate().is_err());
    }

    #[test_log::test]
    fn load_reads_file_and_reports_missing_path() {
        let path = std::env::temp_dir().join(format!("fractal-zoom-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "animation": { "watchdog_ms": 250 } }"#).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.animation.watchdog_ms, 250);
        std::fs::remove_file(&path).unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read config file"));
    }

    #[test_log::test]
    fn round_trips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(Config::from_json_str(&json).unwrap(), config);
    }
}
