//! Discrete classifications used across the simulation.
//!
//! These enums describe agent state (sex, derived mental state, behavior
//! actions, lifecycle events, death causes) and population state (the
//! four-phase experiment lifecycle). Mental state and phase are both
//! *derived* classifications: neither is authoritative storage, and the
//! phase ordering is load-bearing -- the classifier only ever advances.

use serde::{Deserialize, Serialize};

/// Biological sex of an agent. Reproduction requires one of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male agent.
    Male,
    /// Female agent.
    Female,
}

impl Sex {
    /// The reproductively compatible sex.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Male => Self::Female,
            Self::Female => Self::Male,
        }
    }
}

impl core::fmt::Display for Sex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

/// Derived mental state of an agent.
///
/// Recomputed from traits, age, and local density on every read -- never
/// stored as independent authoritative state. The derivation rule lives in
/// `universe-agents` and evaluates these variants in a fixed priority
/// order to break ties deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentalState {
    /// Baseline behavior: socializing and exploring.
    Normal,
    /// Density-induced stress without a dominant trait response.
    Stressed,
    /// High aggression; attacks neighbors.
    Aggressive,
    /// Low sociability; avoids other agents.
    Withdrawn,
    /// Calhoun's "beautiful ones": withdrawn, high-grooming,
    /// non-reproductive.
    BeautifulOne,
    /// The agent is dead. Terminal.
    Dead,
}

impl MentalState {
    /// Whether this state counts toward the behavioral-sink pathology
    /// proportion used by the phase classifier.
    pub const fn is_pathological(self) -> bool {
        matches!(self, Self::Aggressive | Self::Withdrawn | Self::BeautifulOne)
    }
}

impl core::fmt::Display for MentalState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Stressed => write!(f, "stressed"),
            Self::Aggressive => write!(f, "aggressive"),
            Self::Withdrawn => write!(f, "withdrawn"),
            Self::BeautifulOne => write!(f, "beautiful_one"),
            Self::Dead => write!(f, "dead"),
        }
    }
}

/// Population lifecycle phase, after Calhoun's four stages.
///
/// The derived `Ord` follows the experiment's chronology; the classifier
/// relies on it to enforce that transitions never regress (the "point of
/// no return" finding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Initial low-density establishment of the population.
    Settlement,
    /// Sustained exponential population growth.
    Growth,
    /// Behavioral sink: social pathology dominates while density peaks.
    Breakdown,
    /// Terminal decline: deaths outpace a collapsing birth rate.
    Collapse,
}

impl Phase {
    /// The phase that follows this one, or `None` from [`Phase::Collapse`].
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Settlement => Some(Self::Growth),
            Self::Growth => Some(Self::Breakdown),
            Self::Breakdown => Some(Self::Collapse),
            Self::Collapse => None,
        }
    }
}

impl core::fmt::Display for Phase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Settlement => write!(f, "settlement"),
            Self::Growth => write!(f, "growth"),
            Self::Breakdown => write!(f, "breakdown"),
            Self::Collapse => write!(f, "collapse"),
        }
    }
}

/// The action an agent chooses for one tick.
///
/// Produced by the agent's behavior decision from its own state plus the
/// density/neighbor context supplied by the population manager; resolved
/// by the manager, which owns all cross-agent effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorAction {
    /// Eat. Food is unlimited, so foraging always succeeds.
    Forage,
    /// Sleep to recover energy. The agent does not move.
    Rest,
    /// Wander to a random adjacent cell.
    Explore,
    /// Move toward the least crowded adjacent cell.
    Hide,
    /// Self-groom. Characteristic of the beautiful ones.
    Groom,
    /// Approach and interact with a nearby agent.
    Socialize,
    /// Attack a nearby agent.
    Attack,
    /// Seek an eligible partner and attempt to reproduce.
    AttemptReproduce,
}

/// A lifecycle event applied to an agent, driving bounded trait drift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentEvent {
    /// The agent was attacked for `damage` health points.
    Attacked {
        /// Health points lost to the attack.
        damage: f64,
    },
    /// The agent spent the tick above the crowding threshold.
    Crowded,
    /// The agent spent the tick with no neighbors in its
    /// interaction radius.
    Isolated,
    /// The agent became a parent this tick.
    GaveBirth,
    /// One tick of ordinary aging passed.
    Aged,
}

/// Why an agent died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    /// Age exceeded the configured maximum lifespan.
    OldAge,
    /// Health reached zero from accumulated attack damage.
    Aggression,
    /// Stochastic death under high-density stress.
    Overcrowding,
}

impl core::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OldAge => write!(f, "old_age"),
            Self::Aggression => write!(f, "aggression"),
            Self::Overcrowding => write!(f, "overcrowding"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_ordering_is_chronological() {
        assert!(Phase::Settlement < Phase::Growth);
        assert!(Phase::Growth < Phase::Breakdown);
        assert!(Phase::Breakdown < Phase::Collapse);
    }

    #[test]
    fn collapse_is_terminal() {
        assert_eq!(Phase::Breakdown.next(), Some(Phase::Collapse));
        assert_eq!(Phase::Collapse.next(), None);
    }

    #[test]
    fn pathological_states() {
        assert!(MentalState::Aggressive.is_pathological());
        assert!(MentalState::Withdrawn.is_pathological());
        assert!(MentalState::BeautifulOne.is_pathological());
        assert!(!MentalState::Normal.is_pathological());
        assert!(!MentalState::Stressed.is_pathological());
        assert!(!MentalState::Dead.is_pathological());
    }

    #[test]
    fn sex_opposite_is_involutive() {
        assert_eq!(Sex::Male.opposite(), Sex::Female);
        assert_eq!(Sex::Female.opposite().opposite(), Sex::Female);
    }
}
