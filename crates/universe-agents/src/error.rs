//! Error types for the universe-agents crate.
//!
//! Agent logic itself is infallible by design: trait drift clamps instead
//! of erroring, an ineligible reproduction attempt is a no-op, and death
//! is data. The only failure surface is configuration, validated once at
//! construction before the first tick.

/// Errors raised when validating an [`AgentConfig`].
///
/// [`AgentConfig`]: crate::config::AgentConfig
#[derive(Debug, thiserror::Error)]
pub enum AgentConfigError {
    /// A tunable value lies outside its permitted range.
    #[error("{field} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        /// The configuration field name.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Minimum permitted value (inclusive).
        min: f64,
        /// Maximum permitted value (inclusive).
        max: f64,
    },

    /// Two fields violate a required ordering (e.g. adult age past
    /// maximum age).
    #[error("invalid configuration ordering: {reason}")]
    InvalidOrdering {
        /// Explanation of the violated ordering.
        reason: String,
    },
}
