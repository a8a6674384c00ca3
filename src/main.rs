// src/main.rs

//! Entry point for `fractal-zoom`.

use fractal_zoom::animation::ZoomSession;
use fractal_zoom::compute::MandelbrotCompute;
use fractal_zoom::config::CONFIG;
use fractal_zoom::display::HeadlessPresenter;
use fractal_zoom::platform::SystemClock;

// Logging
use anyhow::Context;
use log::{error, info};

/// Main entry point for the `fractal-zoom` application.
fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting fractal-zoom...");

    // --- Configuration ---
    let config = &*CONFIG;
    config.validate().context("Invalid configuration")?;
    info!(
        "Surface {}x{}, {} FPS, watchdog {} ms, zoom {:?}",
        config.surface.width,
        config.surface.height,
        config.animation.target_fps,
        config.animation.watchdog_ms,
        config.animation.zoom
    );

    // --- Collaborators ---
    let compute = MandelbrotCompute::new(config.fractal.max_iterations, config.fractal.bounds);
    let presenter =
        HeadlessPresenter::new(config.surface.width as usize, config.surface.height as usize);

    let mut session = ZoomSession::new(config, compute, presenter, SystemClock::new())
        .context("Failed to set up zoom session")?;

    // --- Main Loop ---
    info!("Starting animation...");
    let report = match session.run() {
        Ok(report) => report,
        Err(e) => {
            error!(
                "Animation stopped on error: {:#}. Root cause: {:?}",
                e,
                e.root_cause()
            );
            return Err(e);
        }
    };

    let stats = session.presenter().stats();
    info!(
        "Animation finished: {} ticks, {} frames computed, {} presented in {:?}, stop reason {:?}",
        report.ticks,
        report.frames_computed,
        stats.frames_presented,
        report.elapsed,
        report.stop_reason
    );
    info!("Final view window: {:?}", report.final_view);
    if let Some(checksum) = stats.last_checksum {
        info!("Last frame checksum: {:016x}", checksum);
    }
    info!("fractal-zoom exited successfully.");

    Ok(())
}
