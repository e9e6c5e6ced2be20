//! The agent entity: one mouse's identity, traits, and physiology.
//!
//! An [`Agent`] owns everything about a single mouse except its place in
//! the population: the habitat crate owns the arena, density, and all
//! cross-agent resolution. Agent methods therefore take any density or
//! neighbor context as parameters, which keeps them pure enough for
//! deterministic unit testing.

use rand::Rng;
use universe_types::{
    AgentDetail, AgentEvent, AgentId, AgentView, DeathCause, MentalState, Position, Sex, Traits,
};

use crate::config::AgentConfig;
use crate::state::derive_mental_state;

/// Upper bound of the hunger/energy/drive/health scales.
const STAT_MAX: f64 = 100.0;

/// One mouse in the simulation.
///
/// Invariants:
/// - traits stay within `[0, 100]` (clamped on every mutation),
/// - `age` is monotonically non-decreasing while alive,
/// - once `alive` is false the state is frozen: the agent is excluded
///   from density and interaction computation and only read for
///   aggregate statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    /// Stable identifier, never reused.
    pub id: AgentId,
    /// Biological sex.
    pub sex: Sex,
    /// Current trait vector.
    pub traits: Traits,
    /// Age in ticks.
    pub age: u64,
    /// Whether the agent is alive.
    pub alive: bool,
    /// Ticks remaining until reproduction eligibility returns.
    pub cooldown: u64,
    /// Grid position in the habitat.
    pub position: Position,
    /// Hunger level, `[0, 100]`. Rises each tick, relieved by foraging.
    pub hunger: f64,
    /// Energy level, `[0, 100]`. Falls each tick, restored by resting.
    pub energy: f64,
    /// Reproduction drive, `[0, 100]`. Accrues in adults, resets on mating.
    pub reproduction_drive: f64,
    /// Physical health, `[0, 100]`. Zero is lethal.
    pub health: f64,
    /// Generation number: 0 for founders, `max(parents) + 1` for offspring.
    pub generation: u32,
    /// Tick at which the agent entered the simulation.
    pub born_at_tick: u64,
    /// Tick of death, once dead.
    pub died_at_tick: Option<u64>,
    /// Cause of death, once dead.
    pub cause_of_death: Option<DeathCause>,
}

impl Agent {
    /// Create a founding agent (generation 0).
    ///
    /// Founders start as adults so the seeded colony can establish
    /// itself immediately, mirroring the original experiment's release
    /// of mature breeding pairs.
    pub fn founder(
        id: AgentId,
        sex: Sex,
        traits: Traits,
        position: Position,
        adult_age: u64,
    ) -> Self {
        Self {
            id,
            sex,
            traits,
            age: adult_age,
            alive: true,
            cooldown: 0,
            position,
            hunger: 0.0,
            energy: STAT_MAX,
            reproduction_drive: 0.0,
            health: STAT_MAX,
            generation: 0,
            born_at_tick: 0,
            died_at_tick: None,
            cause_of_death: None,
        }
    }

    /// Create a newborn agent at its mother's position.
    pub const fn offspring(
        id: AgentId,
        sex: Sex,
        traits: Traits,
        position: Position,
        generation: u32,
        born_at_tick: u64,
        starting_health: f64,
    ) -> Self {
        Self {
            id,
            sex,
            traits,
            age: 0,
            alive: true,
            cooldown: 0,
            position,
            hunger: 0.0,
            energy: STAT_MAX,
            reproduction_drive: 0.0,
            health: starting_health,
            generation,
            born_at_tick,
            died_at_tick: None,
            cause_of_death: None,
        }
    }

    /// Derive the agent's mental state for the given local density.
    ///
    /// Pure: reads traits and age, writes nothing. See
    /// [`derive_mental_state`] for the priority order.
    pub fn mental_state(&self, local_density: f64, config: &AgentConfig) -> MentalState {
        derive_mental_state(self.alive, &self.traits, self.age, local_density, config)
    }

    /// Apply one lifecycle event, drifting traits by bounded, clamped
    /// increments. Dead agents are frozen and ignore events.
    pub fn apply_event(&mut self, event: AgentEvent, config: &AgentConfig) {
        if !self.alive {
            return;
        }
        match event {
            AgentEvent::Attacked { damage } => {
                self.traits.aggression += config.attacked_aggression_gain;
                self.health = (self.health - damage).max(0.0);
            }
            AgentEvent::Crowded => {
                self.traits.sociability -= config.crowded_sociability_loss;
                self.traits.grooming += config.crowded_grooming_gain;
            }
            AgentEvent::Isolated => {
                self.traits.sociability -= config.isolated_sociability_loss;
            }
            AgentEvent::GaveBirth => {
                self.traits.parenting += config.birth_parenting_gain;
            }
            AgentEvent::Aged => {
                self.traits.aggression -= config.aged_aggression_decay;
            }
        }
        self.traits.clamp_all();
    }

    /// Whether this agent can currently act as a parent.
    ///
    /// Requires: alive, adult, no active cooldown, parenting above the
    /// hard floor, and a mental state compatible with mating. Withdrawn
    /// agents and beautiful ones do not breed; low (but above-floor)
    /// parenting suppresses the success probability instead of gating
    /// eligibility.
    pub fn can_reproduce(&self, local_density: f64, config: &AgentConfig) -> bool {
        if !self.alive || self.age < config.adult_age || self.cooldown > 0 {
            return false;
        }
        if self.traits.parenting < config.parenting_floor {
            return false;
        }
        !matches!(
            self.mental_state(local_density, config),
            MentalState::Withdrawn | MentalState::BeautifulOne | MentalState::Dead
        )
    }

    /// Freeze the agent as dead at `tick` with the given cause.
    ///
    /// Idempotent: a second call leaves the first death record intact.
    pub fn mark_dead(&mut self, tick: u64, cause: DeathCause) {
        if !self.alive {
            return;
        }
        self.alive = false;
        self.died_at_tick = Some(tick);
        self.cause_of_death = Some(cause);
    }

    /// Relieve hunger by one foraging action. Food never runs out.
    pub const fn forage(&mut self, config: &AgentConfig) {
        self.hunger = (self.hunger - config.forage_relief).max(0.0);
    }

    /// Recover energy by one rest action.
    pub const fn rest(&mut self, config: &AgentConfig) {
        self.energy = (self.energy + config.rest_recovery).min(STAT_MAX);
    }

    /// Recover a sliver of health by one grooming action.
    pub const fn groom(&mut self, config: &AgentConfig) {
        self.health = (self.health + config.groom_heal).min(STAT_MAX);
    }

    /// Read-only view for the renderer.
    pub fn view(&self, local_density: f64, config: &AgentConfig) -> AgentView {
        AgentView {
            id: self.id,
            position: self.position,
            mental_state: self.mental_state(local_density, config),
            alive: self.alive,
        }
    }

    /// Full readout for click-to-inspect.
    pub fn detail(&self, local_density: f64, config: &AgentConfig) -> AgentDetail {
        AgentDetail {
            id: self.id,
            sex: self.sex,
            age: self.age,
            position: self.position,
            traits: self.traits,
            mental_state: self.mental_state(local_density, config),
            hunger: self.hunger,
            energy: self.energy,
            reproduction_drive: self.reproduction_drive,
            health: self.health,
            cooldown: self.cooldown,
            generation: self.generation,
            alive: self.alive,
            born_at_tick: self.born_at_tick,
            died_at_tick: self.died_at_tick,
            cause_of_death: self.cause_of_death,
        }
    }
}

/// Sample founder traits from the original model's seeding ranges:
/// modest aggression, sociable, attentive parents, moderate grooming.
pub fn founder_traits(rng: &mut impl Rng) -> Traits {
    Traits::new(
        rng.random_range(20.0..=40.0),
        rng.random_range(60.0..=80.0),
        rng.random_range(60.0..=80.0),
        rng.random_range(40.0..=60.0),
    )
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn adult(id: u64, sex: Sex) -> Agent {
        Agent::founder(
            AgentId::from_raw(id),
            sex,
            Traits::mid_range(),
            Position::new(0, 0),
            200,
        )
    }

    #[test]
    fn founder_starts_adult_and_healthy() {
        let agent = adult(0, Sex::Female);
        assert!(agent.alive);
        assert_eq!(agent.age, 200);
        assert_eq!(agent.health, 100.0);
        assert_eq!(agent.generation, 0);
    }

    #[test]
    fn events_drift_traits_within_bounds() {
        let config = AgentConfig::default();
        let mut agent = adult(0, Sex::Male);
        agent.traits = Traits::new(99.5, 0.5, 50.0, 99.5);

        agent.apply_event(AgentEvent::Attacked { damage: 5.0 }, &config);
        agent.apply_event(AgentEvent::Crowded, &config);
        agent.apply_event(AgentEvent::Isolated, &config);

        assert!(agent.traits.in_range());
        assert_eq!(agent.traits.aggression, 100.0);
        assert_eq!(agent.traits.sociability, 0.0);
        assert_eq!(agent.traits.grooming, 100.0);
        assert_eq!(agent.health, 95.0);
    }

    #[test]
    fn dead_agents_ignore_events() {
        let config = AgentConfig::default();
        let mut agent = adult(0, Sex::Male);
        agent.mark_dead(10, DeathCause::Aggression);
        let before = agent.traits;

        agent.apply_event(AgentEvent::Attacked { damage: 50.0 }, &config);
        assert_eq!(agent.traits, before);
        assert_eq!(agent.health, 100.0);
    }

    #[test]
    fn mark_dead_is_idempotent() {
        let mut agent = adult(0, Sex::Female);
        agent.mark_dead(10, DeathCause::OldAge);
        agent.mark_dead(20, DeathCause::Overcrowding);
        assert_eq!(agent.died_at_tick, Some(10));
        assert_eq!(agent.cause_of_death, Some(DeathCause::OldAge));
    }

    #[test]
    fn cooldown_blocks_reproduction() {
        let config = AgentConfig::default();
        let mut agent = adult(0, Sex::Female);
        assert!(agent.can_reproduce(0.1, &config));
        agent.cooldown = 5;
        assert!(!agent.can_reproduce(0.1, &config));
    }

    #[test]
    fn juveniles_cannot_reproduce() {
        let config = AgentConfig::default();
        let mut agent = adult(0, Sex::Male);
        agent.age = 50;
        assert!(!agent.can_reproduce(0.1, &config));
    }

    #[test]
    fn beautiful_ones_do_not_breed() {
        let config = AgentConfig::default();
        let mut agent = adult(0, Sex::Male);
        agent.age = 300;
        agent.traits = Traits::new(10.0, 10.0, 60.0, 90.0);
        assert_eq!(agent.mental_state(0.0, &config), MentalState::BeautifulOne);
        assert!(!agent.can_reproduce(0.0, &config));
    }

    #[test]
    fn parenting_below_floor_gates_hard() {
        let config = AgentConfig::default();
        let mut agent = adult(0, Sex::Female);
        agent.traits.parenting = 2.0;
        assert!(!agent.can_reproduce(0.1, &config));
        // Low-but-above-floor parenting stays eligible; only the success
        // probability is suppressed.
        agent.traits.parenting = 10.0;
        assert!(agent.can_reproduce(0.1, &config));
    }

    #[test]
    fn forage_and_rest_clamp_to_scale() {
        let config = AgentConfig::default();
        let mut agent = adult(0, Sex::Male);
        agent.hunger = 10.0;
        agent.forage(&config);
        assert_eq!(agent.hunger, 0.0);

        agent.energy = 95.0;
        agent.rest(&config);
        assert_eq!(agent.energy, 100.0);
    }

    #[test]
    fn founder_traits_within_seeding_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let traits = founder_traits(&mut rng);
            assert!(traits.aggression >= 20.0 && traits.aggression <= 40.0);
            assert!(traits.sociability >= 60.0 && traits.sociability <= 80.0);
            assert!(traits.parenting >= 60.0 && traits.parenting <= 80.0);
            assert!(traits.grooming >= 40.0 && traits.grooming <= 60.0);
        }
    }
}
