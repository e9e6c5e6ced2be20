//! Headless driver entry point for the Universe 25 simulation.
//!
//! Loads `universe-config.yaml` (or a path given as the first argument),
//! builds the world, and runs it to the tick budget or extinction,
//! logging phase transitions and periodic population summaries.
//!
//! The binary exercises the same library surface an embedding UI would:
//! construct a `Population`, call `step()` in a loop, and read the
//! statistics history and snapshots.

mod config;
mod error;
mod runner;

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use universe_habitat::Population;

use crate::config::SimulationConfig;
use crate::error::EngineError;
use crate::runner::Runner;

/// Default configuration file, looked up relative to the working
/// directory.
const DEFAULT_CONFIG_PATH: &str = "universe-config.yaml";

/// Application entry point.
///
/// Initializes logging, loads configuration, seeds the world, then runs
/// the tick loop to completion.
///
/// # Errors
///
/// Returns an error if the configuration is unreadable or invalid;
/// the run loop itself cannot fail.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("universe-engine starting");

    // Load configuration; a missing default file runs the canonical
    // experiment parameters.
    let path = std::env::args().nth(1).map_or_else(
        || PathBuf::from(DEFAULT_CONFIG_PATH),
        PathBuf::from,
    );
    let config = load_config(&path)?;
    info!(
        seed = config.population.seed,
        initial_population = config.population.initial_population,
        capacity = config.habitat.capacity,
        max_ticks = config.run.max_ticks,
        speed = config.run.speed,
        "configuration loaded"
    );

    // Seed the world
    let population = Population::new(
        &config.habitat,
        config.population,
        config.phases,
        config.agents,
    )
    .map_err(EngineError::from)?;
    info!(alive = population.alive(), "founding colony seeded");

    // Run to the tick budget or extinction
    let mut runner = Runner::new(population, config.run)?;
    let reason = runner.run();

    let world = runner.population();
    let phase = world.phase();
    info!(
        stop = ?reason,
        tick = world.tick(),
        alive = world.alive(),
        phase = %phase.phase,
        phase_since = phase.tick,
        "run complete"
    );
    Ok(())
}

/// Load the configuration file, falling back to defaults when the
/// default path does not exist. An explicitly named file must exist.
fn load_config(path: &Path) -> Result<SimulationConfig, EngineError> {
    if path.exists() {
        return SimulationConfig::from_file(path).map_err(EngineError::from);
    }
    if path.as_os_str() == DEFAULT_CONFIG_PATH {
        warn!(path = %path.display(), "config file not found, using defaults");
        return Ok(SimulationConfig::default());
    }
    SimulationConfig::from_file(path).map_err(EngineError::from)
}
