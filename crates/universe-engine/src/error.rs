//! Error types for the simulation driver.

use crate::config::ConfigError;

/// Errors that can stop the driver before the run loop starts.
///
/// Once the loop is running nothing fails: `Population::step` is
/// infallible and extinction is an outcome, not an error.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The configuration file could not be loaded or parsed.
    #[error("configuration error: {source}")]
    Config {
        /// The underlying loader error.
        #[from]
        source: ConfigError,
    },

    /// The world rejected its tunables at construction.
    #[error("world construction error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: universe_habitat::WorldError,
    },

    /// A driver run setting is invalid.
    #[error("invalid run setting: {field}: {reason}")]
    InvalidRunConfig {
        /// The run setting at fault.
        field: &'static str,
        /// Explanation of the rejection.
        reason: String,
    },
}
