//! Tunable parameters for agent physiology, traits, and reproduction.
//!
//! Every threshold in the mental-state derivation and every drift delta is
//! a simulation-wide constant held here rather than a hard-coded literal,
//! because the experiment's source material documents no derivation for
//! the exact numbers. Defaults follow the behavior of the original
//! Universe 25 model. [`AgentConfig::validate`] runs at construction and
//! refuses out-of-range values before the first tick.

use serde::Deserialize;

use crate::error::AgentConfigError;

/// Configuration for per-agent mechanics.
///
/// All trait-valued fields are on the `[0, 100]` trait scale; density
/// thresholds are on the `[0, 1]` density scale; ages and cooldowns are
/// in ticks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentConfig {
    /// Maximum lifespan in ticks; exceeding it is death by old age
    /// (default: 1000).
    pub max_age: u64,

    /// Age in ticks at which reproduction becomes possible (default: 200).
    pub adult_age: u64,

    /// Age in ticks below which an agent cannot classify as a beautiful
    /// one (default: 200).
    pub juvenile_age: u64,

    /// Ticks both parents wait after a birth before either is eligible
    /// again (default: 100).
    pub reproduction_cooldown: u64,

    /// Hunger added per tick (default: 0.5).
    pub hunger_rate: f64,

    /// Energy lost per tick (default: 0.3).
    pub energy_rate: f64,

    /// Hunger relieved by one foraging action (default: 30).
    pub forage_relief: f64,

    /// Energy recovered by one rest action (default: 20).
    pub rest_recovery: f64,

    /// Hunger level above which foraging takes priority (default: 70).
    pub forage_threshold: f64,

    /// Energy level below which resting takes priority (default: 30).
    pub rest_threshold: f64,

    /// Reproduction drive gained per tick by adult females (default: 0.2).
    pub drive_rate_female: f64,

    /// Reproduction drive gained per tick by adult males (default: 0.3).
    pub drive_rate_male: f64,

    /// Drive level above which an agent seeks a mate (default: 70).
    pub mating_drive_threshold: f64,

    /// Grooming level above which (with low sociability and adult age)
    /// an agent classifies as a beautiful one (default: 65).
    pub grooming_threshold: f64,

    /// Sociability level below which an agent classifies as withdrawn
    /// (default: 35).
    pub sociability_threshold: f64,

    /// Aggression level above which an agent classifies as aggressive
    /// (default: 70).
    pub aggression_threshold: f64,

    /// Local density above which a non-pathological agent classifies as
    /// stressed (default: 0.6).
    pub density_threshold: f64,

    /// Parenting level below which reproduction is impossible outright
    /// (default: 5). Between this floor and
    /// [`neglect_threshold`](Self::neglect_threshold), low parenting
    /// suppresses the success *probability* instead.
    pub parenting_floor: f64,

    /// Parenting level below which a parent counts as neglectful:
    /// smaller litters and weaker newborns (default: 30).
    pub neglect_threshold: f64,

    /// Base probability that an eligible pairing produces a litter at
    /// zero density with perfect traits (default: 0.8).
    pub base_birth_chance: f64,

    /// Largest litter, produced at low density (default: 4).
    pub base_litter_size: u32,

    /// Uniform mutation half-range applied to each blended offspring
    /// trait (default: 10).
    pub mutation_range: f64,

    /// Health damage dealt per attack, as a fraction of the attacker's
    /// aggression (default: 0.2).
    pub attack_damage_factor: f64,

    /// Health recovered by one grooming action (default: 0.2).
    pub groom_heal: f64,

    /// Health penalty applied to a newborn abandoned by a neglectful
    /// mother (default: 20).
    pub abandonment_penalty: f64,

    /// Aggression gained when attacked (default: 2).
    pub attacked_aggression_gain: f64,

    /// Sociability lost per tick spent above the crowding threshold
    /// (default: 1.5).
    pub crowded_sociability_loss: f64,

    /// Grooming gained per tick spent above the crowding threshold;
    /// this is the drift that produces beautiful ones (default: 1).
    pub crowded_grooming_gain: f64,

    /// Sociability lost per tick spent with no neighbors; withdrawal is
    /// self-reinforcing (default: 1).
    pub isolated_sociability_loss: f64,

    /// Parenting gained on becoming a parent (default: 1).
    pub birth_parenting_gain: f64,

    /// Aggression shed per tick of ordinary aging (default: 0.01).
    pub aged_aggression_decay: f64,

    /// Sociability gained by one socializing action (default: 0.1).
    pub socialize_sociability_gain: f64,

    /// Probability that a normal agent socializes rather than explores
    /// (default: 0.3).
    pub socialize_chance: f64,

    /// Probability that a stressed agent hides rather than explores
    /// (default: 0.5).
    pub stressed_hide_chance: f64,

    /// Density at or above which a litter shrinks by one pup
    /// (default: 0.3).
    pub litter_density_medium: f64,

    /// Density at or above which a litter shrinks by two pups
    /// (default: 0.6).
    pub litter_density_high: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_age: 1000,
            adult_age: 200,
            juvenile_age: 200,
            reproduction_cooldown: 100,
            hunger_rate: 0.5,
            energy_rate: 0.3,
            forage_relief: 30.0,
            rest_recovery: 20.0,
            forage_threshold: 70.0,
            rest_threshold: 30.0,
            drive_rate_female: 0.2,
            drive_rate_male: 0.3,
            mating_drive_threshold: 70.0,
            grooming_threshold: 65.0,
            sociability_threshold: 35.0,
            aggression_threshold: 70.0,
            density_threshold: 0.6,
            parenting_floor: 5.0,
            neglect_threshold: 30.0,
            base_birth_chance: 0.8,
            base_litter_size: 4,
            mutation_range: 10.0,
            attack_damage_factor: 0.2,
            groom_heal: 0.2,
            abandonment_penalty: 20.0,
            attacked_aggression_gain: 2.0,
            crowded_sociability_loss: 1.5,
            crowded_grooming_gain: 1.0,
            isolated_sociability_loss: 1.0,
            birth_parenting_gain: 1.0,
            aged_aggression_decay: 0.01,
            socialize_sociability_gain: 0.1,
            socialize_chance: 0.3,
            stressed_hide_chance: 0.5,
            litter_density_medium: 0.3,
            litter_density_high: 0.6,
        }
    }
}

impl AgentConfig {
    /// Validate every tunable before the simulation starts.
    ///
    /// # Errors
    ///
    /// Returns [`AgentConfigError::OutOfRange`] for a value outside its
    /// scale, or [`AgentConfigError::InvalidOrdering`] when age fields
    /// contradict each other.
    pub fn validate(&self) -> Result<(), AgentConfigError> {
        let trait_scale: [(&'static str, f64); 10] = [
            ("forage_threshold", self.forage_threshold),
            ("rest_threshold", self.rest_threshold),
            ("mating_drive_threshold", self.mating_drive_threshold),
            ("grooming_threshold", self.grooming_threshold),
            ("sociability_threshold", self.sociability_threshold),
            ("aggression_threshold", self.aggression_threshold),
            ("parenting_floor", self.parenting_floor),
            ("neglect_threshold", self.neglect_threshold),
            ("mutation_range", self.mutation_range),
            ("abandonment_penalty", self.abandonment_penalty),
        ];
        for (field, value) in trait_scale {
            check_range(field, value, 0.0, 100.0)?;
        }

        check_range("density_threshold", self.density_threshold, 0.0, 1.0)?;
        check_range("base_birth_chance", self.base_birth_chance, 0.0, 1.0)?;
        check_range("attack_damage_factor", self.attack_damage_factor, 0.0, 1.0)?;
        check_range("socialize_chance", self.socialize_chance, 0.0, 1.0)?;
        check_range("stressed_hide_chance", self.stressed_hide_chance, 0.0, 1.0)?;
        check_range("litter_density_medium", self.litter_density_medium, 0.0, 1.0)?;
        check_range("litter_density_high", self.litter_density_high, 0.0, 1.0)?;

        let nonnegative: [(&'static str, f64); 10] = [
            ("hunger_rate", self.hunger_rate),
            ("energy_rate", self.energy_rate),
            ("forage_relief", self.forage_relief),
            ("rest_recovery", self.rest_recovery),
            ("drive_rate_female", self.drive_rate_female),
            ("drive_rate_male", self.drive_rate_male),
            ("groom_heal", self.groom_heal),
            ("attacked_aggression_gain", self.attacked_aggression_gain),
            ("crowded_sociability_loss", self.crowded_sociability_loss),
            ("aged_aggression_decay", self.aged_aggression_decay),
        ];
        for (field, value) in nonnegative {
            check_range(field, value, 0.0, f64::INFINITY)?;
        }

        if self.max_age == 0 {
            return Err(AgentConfigError::InvalidOrdering {
                reason: String::from("max_age must be at least 1"),
            });
        }
        if self.adult_age >= self.max_age {
            return Err(AgentConfigError::InvalidOrdering {
                reason: format!(
                    "adult_age ({}) must be below max_age ({})",
                    self.adult_age, self.max_age
                ),
            });
        }
        if self.parenting_floor > self.neglect_threshold {
            return Err(AgentConfigError::InvalidOrdering {
                reason: format!(
                    "parenting_floor ({}) must not exceed neglect_threshold ({})",
                    self.parenting_floor, self.neglect_threshold
                ),
            });
        }
        if self.litter_density_medium > self.litter_density_high {
            return Err(AgentConfigError::InvalidOrdering {
                reason: format!(
                    "litter_density_medium ({}) must not exceed litter_density_high ({})",
                    self.litter_density_medium, self.litter_density_high
                ),
            });
        }
        if self.base_litter_size == 0 {
            return Err(AgentConfigError::InvalidOrdering {
                reason: String::from("base_litter_size must be at least 1"),
            });
        }

        Ok(())
    }
}

/// Reject `value` outside `[min, max]`.
fn check_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), AgentConfigError> {
    if value.is_nan() || value < min || value > max {
        return Err(AgentConfigError::OutOfRange { field, value, min, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(AgentConfig::default().validate().is_ok());
    }

    #[test]
    fn density_threshold_above_one_rejected() {
        let config = AgentConfig {
            density_threshold: 1.5,
            ..AgentConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AgentConfigError::OutOfRange { field: "density_threshold", .. })
        ));
    }

    #[test]
    fn adult_age_past_lifespan_rejected() {
        let config = AgentConfig {
            adult_age: 2000,
            ..AgentConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AgentConfigError::InvalidOrdering { .. })
        ));
    }

    #[test]
    fn nan_threshold_rejected() {
        let config = AgentConfig {
            grooming_threshold: f64::NAN,
            ..AgentConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn socialize_chance_out_of_range_rejected() {
        let config = AgentConfig {
            socialize_chance: 1.1,
            ..AgentConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AgentConfigError::OutOfRange { field: "socialize_chance", .. })
        ));
    }

    #[test]
    fn inverted_litter_breakpoints_rejected() {
        let config = AgentConfig {
            litter_density_medium: 0.8,
            litter_density_high: 0.6,
            ..AgentConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AgentConfigError::InvalidOrdering { .. })
        ));
    }

    #[test]
    fn zero_litter_rejected() {
        let config = AgentConfig {
            base_litter_size: 0,
            ..AgentConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_deserializes_with_partial_yaml_fields() {
        let parsed: Result<AgentConfig, _> =
            serde_json::from_str(r#"{"max_age": 500, "grooming_threshold": 70.0}"#);
        let config = parsed.ok();
        assert!(config.is_some());
        if let Some(config) = config {
            assert_eq!(config.max_age, 500);
            assert!(config.validate().is_ok());
        }
    }
}
