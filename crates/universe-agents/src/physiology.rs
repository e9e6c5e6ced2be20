//! Per-tick physiological mechanics.
//!
//! Applied to every living agent at the start of a tick, before any
//! behavior runs:
//!
//! - Age increments by 1; death by old age when it exceeds the maximum.
//! - Hunger rises and energy falls by their configured rates.
//! - Adults accrue reproduction drive (sex-specific rates).
//! - An active reproduction cooldown counts down by 1.
//! - Death by health depletion when accumulated attack damage reaches 0.
//!
//! Stochastic overcrowding deaths are *not* handled here: they need the
//! population RNG and global density, so the manager rolls them as a
//! separate step.

use universe_types::DeathCause;

use crate::agent::Agent;
use crate::config::AgentConfig;

/// Result of applying one tick of physiology to an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysiologyOutcome {
    /// If the agent died during this tick, the cause.
    pub death: Option<DeathCause>,
}

/// Apply one tick of aging and needs decay to a living agent.
///
/// Order of operations:
///
/// 1. Increment age; check death by old age.
/// 2. Raise hunger (clamped to 100) and lower energy (clamped to 0).
/// 3. Accrue reproduction drive for adults.
/// 4. Decrement any active reproduction cooldown.
/// 5. Check death by health depletion.
///
/// Dead agents are frozen; calling this on one is a no-op.
pub fn apply_physiology_tick(agent: &mut Agent, config: &AgentConfig) -> PhysiologyOutcome {
    if !agent.alive {
        return PhysiologyOutcome { death: None };
    }

    // 1. Age, and die of old age past the maximum.
    agent.age = agent.age.saturating_add(1);
    if agent.age > config.max_age {
        return PhysiologyOutcome {
            death: Some(DeathCause::OldAge),
        };
    }

    // 2. Needs decay. Food is unlimited, so hunger saturating at 100 is
    // uncomfortable rather than lethal; foraging relieves it next tick.
    agent.hunger = (agent.hunger + config.hunger_rate).min(100.0);
    agent.energy = (agent.energy - config.energy_rate).max(0.0);

    // 3. Reproduction drive accrues in adults only.
    if agent.age >= config.adult_age {
        let rate = match agent.sex {
            universe_types::Sex::Female => config.drive_rate_female,
            universe_types::Sex::Male => config.drive_rate_male,
        };
        agent.reproduction_drive = (agent.reproduction_drive + rate).min(100.0);
    }

    // 4. Cooldown elapses.
    agent.cooldown = agent.cooldown.saturating_sub(1);

    // 5. Accumulated attack damage is lethal at zero health.
    if agent.health <= 0.0 {
        return PhysiologyOutcome {
            death: Some(DeathCause::Aggression),
        };
    }

    PhysiologyOutcome { death: None }
}
