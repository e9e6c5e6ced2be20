//! Habitat, population, and phase-classifier configuration.
//!
//! Like the agent tunables, everything here is configuration rather than
//! hard-coded literals: the experiment's source material gives no
//! principled derivation for the exact thresholds, so they are exposed
//! for calibration and only the ordering properties are asserted by
//! tests. Each struct validates itself at construction.

use serde::Deserialize;

use crate::error::WorldError;

/// Dimensions and capacity of the bounded 2D habitat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HabitatConfig {
    /// Grid width in cells (default: 40).
    pub width: u32,

    /// Grid height in cells (default: 30).
    pub height: u32,

    /// Population ceiling used for density computation (default: 960,
    /// i.e. 0.8 agents per cell on the default grid).
    pub capacity: u32,

    /// Chebyshev radius of an agent's interaction neighborhood
    /// (default: 2).
    pub interaction_radius: u32,
}

impl Default for HabitatConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 30,
            capacity: 960,
            interaction_radius: 2,
        }
    }
}

impl HabitatConfig {
    /// Validate dimensions and capacity.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidConfig`] for a zero dimension, zero
    /// capacity, or a zero interaction radius.
    pub fn validate(&self) -> Result<(), WorldError> {
        if self.width == 0 || self.height == 0 {
            return Err(WorldError::InvalidConfig {
                field: "width/height",
                reason: format!("grid must be non-empty, got {}x{}", self.width, self.height),
            });
        }
        if self.capacity == 0 {
            return Err(WorldError::InvalidConfig {
                field: "capacity",
                reason: String::from("capacity must be at least 1"),
            });
        }
        if self.interaction_radius == 0 {
            return Err(WorldError::InvalidConfig {
                field: "interaction_radius",
                reason: String::from("interaction radius must be at least 1"),
            });
        }
        Ok(())
    }
}

/// Seeding and population-level stochastic parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PopulationConfig {
    /// Number of agents seeded at start and on reset (default: 10).
    pub initial_population: u32,

    /// Random seed; identical seeds and tunables reproduce identical
    /// runs byte for byte (default: 25).
    pub seed: u64,

    /// Scale of the stochastic overcrowding death probability. The
    /// per-agent, per-tick chance is
    /// `stress_death_rate * density^2 * (1 + neighborhood aggression / 100)`
    /// (default: 0.004).
    pub stress_death_rate: f64,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial_population: 10,
            seed: 25,
            stress_death_rate: 0.004,
        }
    }
}

impl PopulationConfig {
    /// Validate seeding parameters.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidConfig`] for an empty initial
    /// population or an out-of-range death rate.
    pub fn validate(&self) -> Result<(), WorldError> {
        if self.initial_population == 0 {
            return Err(WorldError::InvalidConfig {
                field: "initial_population",
                reason: String::from("initial population must be at least 1"),
            });
        }
        if self.stress_death_rate.is_nan()
            || self.stress_death_rate < 0.0
            || self.stress_death_rate > 1.0
        {
            return Err(WorldError::InvalidConfig {
                field: "stress_death_rate",
                reason: format!("must be in [0, 1], got {}", self.stress_death_rate),
            });
        }
        Ok(())
    }
}

/// Thresholds for the four-phase lifecycle classifier.
///
/// All criteria are evaluated over a trailing window of statistics
/// snapshots rather than a single tick, to avoid transition flapping.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhaseConfig {
    /// Trailing window length in ticks (default: 20).
    pub window: usize,

    /// Settlement -> Growth: minimum mean per-tick relative population
    /// growth over the window (default: 0.005, i.e. 0.5% per tick).
    pub growth_rate_threshold: f64,

    /// Growth -> Breakdown: minimum mean density over the window
    /// (default: 0.6).
    pub breakdown_density_threshold: f64,

    /// Growth -> Breakdown: minimum mean proportion of living agents in
    /// pathological states over the window (default: 0.4).
    pub pathology_threshold: f64,

    /// Breakdown -> Collapse: mean births per tick over the window must
    /// fall below this floor while deaths meet or exceed births
    /// (default: 0.05).
    pub collapse_birth_rate_floor: f64,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            window: 20,
            growth_rate_threshold: 0.005,
            breakdown_density_threshold: 0.6,
            pathology_threshold: 0.4,
            collapse_birth_rate_floor: 0.05,
        }
    }
}

impl PhaseConfig {
    /// Validate classifier thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidConfig`] for a zero window or
    /// out-of-range proportions.
    pub fn validate(&self) -> Result<(), WorldError> {
        if self.window == 0 {
            return Err(WorldError::InvalidConfig {
                field: "window",
                reason: String::from("trailing window must be at least 1 tick"),
            });
        }
        let proportions: [(&'static str, f64); 2] = [
            ("breakdown_density_threshold", self.breakdown_density_threshold),
            ("pathology_threshold", self.pathology_threshold),
        ];
        for (field, value) in proportions {
            if value.is_nan() || !(0.0..=1.0).contains(&value) {
                return Err(WorldError::InvalidConfig {
                    field,
                    reason: format!("must be in [0, 1], got {value}"),
                });
            }
        }
        let nonnegative: [(&'static str, f64); 2] = [
            ("growth_rate_threshold", self.growth_rate_threshold),
            ("collapse_birth_rate_floor", self.collapse_birth_rate_floor),
        ];
        for (field, value) in nonnegative {
            if value.is_nan() || value < 0.0 {
                return Err(WorldError::InvalidConfig {
                    field,
                    reason: format!("must be non-negative, got {value}"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(HabitatConfig::default().validate().is_ok());
        assert!(PopulationConfig::default().validate().is_ok());
        assert!(PhaseConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_capacity_rejected() {
        let config = HabitatConfig {
            capacity: 0,
            ..HabitatConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(WorldError::InvalidConfig { field: "capacity", .. })
        ));
    }

    #[test]
    fn empty_grid_rejected() {
        let config = HabitatConfig {
            width: 0,
            ..HabitatConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_window_rejected() {
        let config = PhaseConfig {
            window: 0,
            ..PhaseConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn pathology_threshold_above_one_rejected() {
        let config = PhaseConfig {
            pathology_threshold: 1.2,
            ..PhaseConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn stress_death_rate_out_of_range_rejected() {
        let config = PopulationConfig {
            stress_death_rate: -0.1,
            ..PopulationConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
