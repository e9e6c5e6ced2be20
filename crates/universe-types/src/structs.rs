//! Value types exchanged between the agent logic, the habitat, and
//! external consumers.
//!
//! Everything here is plain data: no behavior beyond clamping and small
//! aggregate helpers. The statistics snapshot is the authoritative record
//! read by the external visualizer and is immutable once appended.

use serde::{Deserialize, Serialize};

use crate::enums::{DeathCause, MentalState, Phase, Sex};
use crate::ids::AgentId;

/// The four continuous behavioral traits of an agent, each in `[0, 100]`.
///
/// Set at creation (seeded or blended from parents) and drifting slowly
/// over life in response to experienced events. Every mutation path clamps
/// back into range; out-of-range values are a bug, not an error condition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Traits {
    /// Tendency to attack neighbors under stress.
    pub aggression: f64,
    /// Tendency to seek out and tolerate other agents.
    pub sociability: f64,
    /// Care invested in offspring; suppresses reproduction when low.
    pub parenting: f64,
    /// Self-maintenance drive; the beautiful-one marker when high.
    pub grooming: f64,
}

impl Traits {
    /// Lower bound of the trait range.
    pub const MIN: f64 = 0.0;
    /// Upper bound of the trait range.
    pub const MAX: f64 = 100.0;

    /// Build a trait vector, clamping every component into `[0, 100]`.
    pub const fn new(aggression: f64, sociability: f64, parenting: f64, grooming: f64) -> Self {
        Self {
            aggression: clamp_trait(aggression),
            sociability: clamp_trait(sociability),
            parenting: clamp_trait(parenting),
            grooming: clamp_trait(grooming),
        }
    }

    /// A mid-range trait vector (all components 50). Useful as a neutral
    /// baseline in tests and scenario seeding.
    pub const fn mid_range() -> Self {
        Self::new(50.0, 50.0, 50.0, 50.0)
    }

    /// Re-clamp every component into `[0, 100]`.
    ///
    /// Called after additive drift so intermediate sums can be written
    /// without branching at each site.
    pub const fn clamp_all(&mut self) {
        self.aggression = clamp_trait(self.aggression);
        self.sociability = clamp_trait(self.sociability);
        self.parenting = clamp_trait(self.parenting);
        self.grooming = clamp_trait(self.grooming);
    }

    /// Whether every component lies within `[0, 100]`.
    pub const fn in_range(&self) -> bool {
        in_trait_range(self.aggression)
            && in_trait_range(self.sociability)
            && in_trait_range(self.parenting)
            && in_trait_range(self.grooming)
    }
}

/// Clamp a single trait component into `[0, 100]`.
const fn clamp_trait(value: f64) -> f64 {
    if value < Traits::MIN {
        Traits::MIN
    } else if value > Traits::MAX {
        Traits::MAX
    } else {
        value
    }
}

/// Whether a single trait component lies within `[0, 100]`.
const fn in_trait_range(value: f64) -> bool {
    value >= Traits::MIN && value <= Traits::MAX
}

/// A cell coordinate in the bounded 2D habitat grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column, `0..width`.
    pub x: i32,
    /// Row, `0..height`.
    pub y: i32,
}

impl Position {
    /// Build a position from raw coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev (chessboard) distance to another position.
    ///
    /// This is the neighborhood metric of the grid: a radius-`r`
    /// interaction circle is the `(2r+1) x (2r+1)` square of cells.
    pub const fn chebyshev_distance(self, other: Self) -> u32 {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        if dx > dy { dx } else { dy }
    }
}

/// Aggregate view of the agents within one agent's interaction radius.
///
/// Assembled by the population manager and passed into the behavior
/// decision so that agent logic never touches global state directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeighborSummary {
    /// Number of living agents within the interaction radius
    /// (excluding the agent itself).
    pub count: u32,
    /// Mean aggression of those neighbors (0 when there are none).
    pub mean_aggression: f64,
    /// Mean sociability of those neighbors (0 when there are none).
    pub mean_sociability: f64,
}

impl NeighborSummary {
    /// The empty neighborhood.
    pub const fn empty() -> Self {
        Self {
            count: 0,
            mean_aggression: 0.0,
            mean_sociability: 0.0,
        }
    }
}

/// Living-agent counts per derived mental state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCounts {
    /// Agents in the normal state.
    pub normal: u32,
    /// Agents in the stressed state.
    pub stressed: u32,
    /// Agents in the aggressive state.
    pub aggressive: u32,
    /// Agents in the withdrawn state.
    pub withdrawn: u32,
    /// Beautiful ones.
    pub beautiful_one: u32,
}

impl StateCounts {
    /// Record one living agent's state. `Dead` is ignored: dead agents
    /// are tracked by the cumulative death counter instead.
    pub const fn record(&mut self, state: MentalState) {
        match state {
            MentalState::Normal => self.normal = self.normal.saturating_add(1),
            MentalState::Stressed => self.stressed = self.stressed.saturating_add(1),
            MentalState::Aggressive => self.aggressive = self.aggressive.saturating_add(1),
            MentalState::Withdrawn => self.withdrawn = self.withdrawn.saturating_add(1),
            MentalState::BeautifulOne => {
                self.beautiful_one = self.beautiful_one.saturating_add(1);
            }
            MentalState::Dead => {}
        }
    }

    /// Total agents counted across all states.
    pub const fn total(&self) -> u32 {
        self.normal
            .saturating_add(self.stressed)
            .saturating_add(self.aggressive)
            .saturating_add(self.withdrawn)
            .saturating_add(self.beautiful_one)
    }

    /// Agents in the pathological states (aggressive, withdrawn,
    /// beautiful one) that feed the breakdown criterion.
    pub const fn pathological(&self) -> u32 {
        self.aggressive
            .saturating_add(self.withdrawn)
            .saturating_add(self.beautiful_one)
    }
}

/// One per-tick record in the statistics time series.
///
/// Append-only and immutable once written: this is the authoritative
/// source for all graphs and for the phase classifier's trailing windows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// The tick this record describes.
    pub tick: u64,
    /// Living agents at the end of the tick.
    pub alive: u32,
    /// `alive / capacity` at the end of the tick, in `[0, 1]`.
    pub density: f64,
    /// Living agents per derived mental state.
    pub state_counts: StateCounts,
    /// Mean trait values over living agents (all zero when extinct).
    pub mean_traits: Traits,
    /// Agents born during this tick.
    pub births: u32,
    /// Agents that died during this tick.
    pub deaths: u32,
    /// Cumulative births since the run started.
    pub births_total: u64,
    /// Cumulative deaths since the run started.
    pub deaths_total: u64,
}

/// Read-only per-agent view for the external renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentView {
    /// The agent's stable identifier.
    pub id: AgentId,
    /// Grid position.
    pub position: Position,
    /// Derived mental state at the last completed tick.
    pub mental_state: MentalState,
    /// Whether the agent is alive.
    pub alive: bool,
}

/// Full trait/state readout of one agent, for click-to-inspect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDetail {
    /// The agent's stable identifier.
    pub id: AgentId,
    /// Biological sex.
    pub sex: Sex,
    /// Age in ticks.
    pub age: u64,
    /// Grid position.
    pub position: Position,
    /// Current trait vector.
    pub traits: Traits,
    /// Derived mental state.
    pub mental_state: MentalState,
    /// Hunger level, `[0, 100]`.
    pub hunger: f64,
    /// Energy level, `[0, 100]`.
    pub energy: f64,
    /// Reproduction drive, `[0, 100]`.
    pub reproduction_drive: f64,
    /// Physical health, `[0, 100]`.
    pub health: f64,
    /// Ticks until the agent is eligible to reproduce again.
    pub cooldown: u64,
    /// Generation number (0 for the seeded founders).
    pub generation: u32,
    /// Whether the agent is alive.
    pub alive: bool,
    /// Tick at which the agent entered the simulation.
    pub born_at_tick: u64,
    /// Tick of death, if dead.
    pub died_at_tick: Option<u64>,
    /// Cause of death, if dead.
    pub cause_of_death: Option<DeathCause>,
}

/// Demographic breakdown of the living population.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationSummary {
    /// Living females.
    pub females: u32,
    /// Living males.
    pub males: u32,
    /// Living agents below the adult age.
    pub juveniles: u32,
    /// Living adults.
    pub adults: u32,
    /// Highest generation number among living agents (0 when extinct).
    pub max_generation: u32,
}

/// The current phase together with the tick at which it was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTransition {
    /// The phase in effect.
    pub phase: Phase,
    /// The tick at which this phase was entered (0 for the initial
    /// settlement phase).
    pub tick: u64,
}
