//! # Loam Engine
//!
//! Headless host for a Loam world.
//!
//! Loads `loam.toml`, generates the world, prints a preview around the spawn
//! point, then runs a fixed number of ticks that move a viewer across the
//! world and apply scripted edits.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

mod config;
mod preview;
mod session;

use anyhow::{Context, Result};
use loam_world::WorldGenerator;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::EngineConfig;

/// Main entry point.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("loam=info".parse()?))
        .init();

    info!("Loam starting...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let config_path = EngineConfig::config_path();
    let mut config = EngineConfig::load_from(&config_path);
    if !config_path.exists() {
        if let Err(e) = config.save_to(&config_path) {
            warn!("Failed to write default config: {e}");
        }
    }
    config.sanitize();

    let generator =
        WorldGenerator::new(config.world.clone()).context("invalid world configuration")?;
    let mut world = generator.generate().context("world generation failed")?;

    let report = world.report();
    let spawn = world.spawn_point();
    info!(
        "World summary: seed={}, spawn=({:.1}, {:.1}), {} tiles ({} ore, {} carved), {} trees, {} ground cover, {} chunks",
        world.seed(),
        spawn.x,
        spawn.y,
        world.tiles().len(),
        report.ores,
        report.carved,
        report.trees,
        report.ground_cover,
        world.chunks().len()
    );

    if config.session.preview {
        let text = preview::render_around_spawn(
            &world,
            config.session.preview_radius,
            config.session.preview_rows,
        );
        println!("{text}");
    }

    let summary = session::run(&mut world, &config);
    info!(
        "Session finished: {} ticks, {} visibility changes, {} edits applied, {} rejected, {} tiles",
        summary.ticks,
        summary.visibility_changes,
        summary.edits_applied,
        summary.edits_rejected,
        world.tiles().len()
    );

    info!("Loam shutdown complete");
    Ok(())
}
