//! Error types for the universe-habitat crate.
//!
//! The error surface is deliberately narrow. Configuration problems are
//! fatal and detected at construction, before the first tick. Agent
//! lookups can miss (an inspected agent may never have existed) and
//! recover locally with [`WorldError::AgentNotFound`]. `step()` itself
//! never fails: extinction, stagnation, and trait saturation are valid
//! simulation outcomes represented as data, not faults.

use universe_types::AgentId;

/// Errors that can occur constructing or querying the population.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A habitat or population tunable is invalid.
    #[error("invalid configuration: {field}: {reason}")]
    InvalidConfig {
        /// The configuration field at fault.
        field: &'static str,
        /// Explanation of the rejection.
        reason: String,
    },

    /// An agent-level tunable is invalid.
    #[error("invalid agent configuration: {source}")]
    AgentConfig {
        /// The underlying agent configuration error.
        #[from]
        source: universe_agents::AgentConfigError,
    },

    /// Lookup of an agent id that was never allocated.
    #[error("agent not found: {0}")]
    AgentNotFound(AgentId),
}
