//! Reproduction mechanics: pairing probability, litter size, and trait
//! blending.
//!
//! Eligibility lives on [`Agent::can_reproduce`]; this module computes
//! what happens once an eligible pair is found. Density feeds back into
//! every stage -- success probability, litter size, and newborn
//! survival -- which is the core loop that turns crowding into
//! population decline.

use rand::Rng;
use universe_types::Traits;

use crate::agent::Agent;
use crate::config::AgentConfig;

/// Density above which some newborns of a litter fail to survive.
const PUP_SURVIVAL_DENSITY: f64 = 0.9;

/// Probability that a single pup survives birth above that density.
const PUP_SURVIVAL_CHANCE: f64 = 0.3;

/// Multiplier applied to the success probability when a parent is
/// neglectful (parenting below the neglect threshold). Reflects
/// "neglectful parents abandon offspring" -- a rate suppression, not a
/// hard gate.
const NEGLECT_MULTIPLIER: f64 = 0.5;

/// Probability that a neglectful mother abandons a newborn.
const ABANDONMENT_CHANCE: f64 = 0.5;

/// Probability that an eligible pairing produces a litter this tick.
///
/// Scales down with density and up with both parents' parenting and
/// sociability:
///
/// ```text
/// p = base * (1 - density) * mean(parenting)/100 * mean(sociability)/100
/// ```
///
/// then halved once per neglectful parent. The result is clamped to
/// `[0, 1]`; at density 1.0 the probability is zero, which is exactly
/// Calhoun's observation.
pub fn success_probability(density: f64, a: &Agent, b: &Agent, config: &AgentConfig) -> f64 {
    let density_factor = (1.0 - density).clamp(0.0, 1.0);
    let parenting = mean(a.traits.parenting, b.traits.parenting) / Traits::MAX;
    let sociability = mean(a.traits.sociability, b.traits.sociability) / Traits::MAX;

    let mut p = config.base_birth_chance * density_factor * parenting * sociability;
    if a.traits.parenting < config.neglect_threshold {
        p *= NEGLECT_MULTIPLIER;
    }
    if b.traits.parenting < config.neglect_threshold {
        p *= NEGLECT_MULTIPLIER;
    }
    p.clamp(0.0, 1.0)
}

/// Litter size for a successful birth.
///
/// Base size at low density, one pup fewer past the medium-density
/// breakpoint, two fewer past the high one, and one fewer again for a
/// neglectful mother. Never below one: a successful mating always
/// produces at least one pup, though it may not survive (see
/// [`pup_survives`]).
pub fn litter_size(density: f64, mother_parenting: f64, config: &AgentConfig) -> u32 {
    let mut size = config.base_litter_size;
    if density >= config.litter_density_high {
        size = size.saturating_sub(2);
    } else if density >= config.litter_density_medium {
        size = size.saturating_sub(1);
    }
    if mother_parenting < config.neglect_threshold {
        size = size.saturating_sub(1);
    }
    size.max(1)
}

/// Roll survival for one pup of a litter.
///
/// Below the extreme-density cutoff every pup survives; above it most
/// are lost in the crush.
pub fn pup_survives(density: f64, rng: &mut impl Rng) -> bool {
    if density <= PUP_SURVIVAL_DENSITY {
        return true;
    }
    rng.random_bool(PUP_SURVIVAL_CHANCE)
}

/// Blend two parent trait vectors into an offspring vector.
///
/// Each trait is the parents' mean plus a uniform perturbation in
/// `[-mutation_range, +mutation_range]`, clamped back into `[0, 100]`.
pub fn blend_traits(a: &Traits, b: &Traits, config: &AgentConfig, rng: &mut impl Rng) -> Traits {
    let range = config.mutation_range;
    let mut blend = |pa: f64, pb: f64| -> f64 {
        let mutation = if range > 0.0 {
            rng.random_range(-range..=range)
        } else {
            0.0
        };
        mean(pa, pb) + mutation
    };

    Traits::new(
        blend(a.aggression, b.aggression),
        blend(a.sociability, b.sociability),
        blend(a.parenting, b.parenting),
        blend(a.grooming, b.grooming),
    )
}

/// Starting health for a newborn, reduced when the mother is neglectful
/// and abandons it.
pub fn newborn_health(mother_parenting: f64, config: &AgentConfig, rng: &mut impl Rng) -> f64 {
    if mother_parenting < config.neglect_threshold && rng.random_bool(ABANDONMENT_CHANCE) {
        (Traits::MAX - config.abandonment_penalty).max(0.0)
    } else {
        Traits::MAX
    }
}

/// Arithmetic mean of two trait components.
fn mean(a: f64, b: f64) -> f64 {
    f64::midpoint(a, b)
}
