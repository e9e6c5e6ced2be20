//! Configuration loading for the simulation driver.
//!
//! The canonical configuration lives in `universe-config.yaml` at the
//! project root. This module defines the top-level struct that mirrors
//! the YAML layout by aggregating the per-crate config types, plus the
//! driver-only run settings, and provides a loader that reads and parses
//! the file. Structural validation happens here (the file must parse);
//! semantic validation happens in `Population::new`.

use std::path::Path;

use serde::Deserialize;
use universe_agents::AgentConfig;
use universe_habitat::{HabitatConfig, PhaseConfig, PopulationConfig};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `universe-config.yaml`. Every section has
/// defaults matching the original experiment parameters, so an empty
/// file (or no file at all) runs the canonical setup.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Habitat geometry and capacity.
    pub habitat: HabitatConfig,

    /// Seeding and population-level stochastic parameters.
    pub population: PopulationConfig,

    /// Phase classifier thresholds.
    pub phases: PhaseConfig,

    /// Agent physiology and behavior tunables.
    pub agents: AgentConfig,

    /// Driver run settings.
    pub run: RunConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yml::from_str(&contents)?)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Driver-only run settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Stop after this many ticks (default: 5000).
    pub max_ticks: u64,

    /// Ticks advanced per frame; the speed multiplier (default: 1).
    pub speed: u32,

    /// Wall-clock delay between frames in milliseconds; 0 runs flat out
    /// (default: 0).
    pub frame_interval_ms: u64,

    /// Log a population summary every this many ticks (default: 100).
    pub log_every: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_ticks: 5_000,
            speed: 1,
            frame_interval_ms: 0,
            log_every: 100,
        }
    }
}
