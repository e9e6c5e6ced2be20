//! The population manager: the arena of agents and the tick loop.
//!
//! [`Population`] owns every agent, the habitat geometry, the seeded RNG,
//! the statistics recorder, and the phase classifier. All cross-agent
//! resolution (movement, attacks, pairing, crowd mortality) happens here,
//! in a fixed sub-step order and in ascending id order within each
//! sub-step, so a run is a pure function of its seed and tunables.
//!
//! `step()` is infallible. Extinction, trait saturation, and population
//! stagnation are valid outcomes that show up in the statistics, never
//! errors.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use universe_agents::{
    Agent, AgentConfig, apply_physiology_tick, blend_traits, decide_behavior, founder_traits,
    litter_size, newborn_health, pup_survives, success_probability,
};
use universe_types::{
    AgentDetail, AgentEvent, AgentId, AgentView, BehaviorAction, DeathCause, NeighborSummary,
    PhaseTransition, PopulationSummary, Position, Sex, StateCounts, StatsSnapshot, Traits,
};

use crate::config::{HabitatConfig, PhaseConfig, PopulationConfig};
use crate::error::WorldError;
use crate::habitat::Habitat;
use crate::phase::PhaseClassifier;
use crate::snapshot::WorldSnapshot;
use crate::stats::StatsRecorder;

/// What happened during one completed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    /// The tick that just completed.
    pub tick: u64,
    /// Agents born this tick.
    pub births: u32,
    /// Agents that died this tick.
    pub deaths: u32,
    /// Living agents at the end of the tick.
    pub alive: u32,
    /// A phase transition, if this tick triggered one.
    pub phase_transition: Option<PhaseTransition>,
}

/// Minimal copy of a living agent used during cross-agent resolution,
/// taken before any sub-step mutates the arena.
#[derive(Debug, Clone, Copy)]
struct RosterEntry {
    id: AgentId,
    position: Position,
    aggression: f64,
    sociability: f64,
}

/// The simulation world: agent arena, habitat, RNG, statistics, and
/// phase classification.
#[derive(Debug)]
pub struct Population {
    agents: BTreeMap<AgentId, Agent>,
    next_id: u64,
    tick: u64,
    rng: StdRng,
    habitat: Habitat,
    agent_config: AgentConfig,
    population_config: PopulationConfig,
    phase_config: PhaseConfig,
    stats: StatsRecorder,
    classifier: PhaseClassifier,
    snapshot: Arc<WorldSnapshot>,
    births_total: u64,
    deaths_total: u64,
}

impl Population {
    /// Build a world and seed its founding colony.
    ///
    /// Founders alternate female/male, start at adult age, and are
    /// placed uniformly at random. Identical configurations (seed
    /// included) produce identical worlds.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidConfig`] or
    /// [`WorldError::AgentConfig`] when any tunable fails validation.
    /// Validation happens here, once, so the tick loop never has to.
    pub fn new(
        habitat_config: &HabitatConfig,
        population_config: PopulationConfig,
        phase_config: PhaseConfig,
        agent_config: AgentConfig,
    ) -> Result<Self, WorldError> {
        let habitat = Habitat::new(habitat_config)?;
        population_config.validate()?;
        phase_config.validate()?;
        agent_config.validate()?;

        let mut population = Self {
            agents: BTreeMap::new(),
            next_id: 0,
            tick: 0,
            rng: StdRng::seed_from_u64(population_config.seed),
            habitat,
            agent_config,
            population_config,
            phase_config,
            stats: StatsRecorder::new(),
            classifier: PhaseClassifier::new(phase_config),
            snapshot: WorldSnapshot::initial(
                PhaseTransition {
                    phase: universe_types::Phase::Settlement,
                    tick: 0,
                },
                Vec::new(),
            ),
            births_total: 0,
            deaths_total: 0,
        };
        population.seed_founders();
        population.commit_snapshot(None);
        Ok(population)
    }

    /// Discard all run state and reseed the founding colony.
    ///
    /// After a reset the world is indistinguishable from a freshly
    /// constructed one with the same configuration, the RNG included.
    pub fn reset(&mut self) {
        self.agents.clear();
        self.next_id = 0;
        self.tick = 0;
        self.rng = StdRng::seed_from_u64(self.population_config.seed);
        self.stats = StatsRecorder::new();
        self.classifier = PhaseClassifier::new(self.phase_config);
        self.births_total = 0;
        self.deaths_total = 0;
        self.seed_founders();
        self.commit_snapshot(None);
    }

    /// Advance the world by exactly one tick.
    ///
    /// Sub-steps, always in this order:
    ///
    /// 1. Physiology for every living agent (id order): aging, needs
    ///    decay, drive accrual, cooldown; deaths by old age or health.
    /// 2. Global density from the post-mortality living count.
    /// 3. Behavior decisions (id order) against pre-move neighborhoods.
    /// 4. Action resolution (id order): crowd and isolation trait
    ///    drift, movement, attacks with immediate lethality, then
    ///    mate pairing and litters; newborns enter the arena here.
    /// 5. Stochastic overcrowding mortality (id order).
    /// 6. A statistics row is appended for this tick.
    /// 7. The phase classifier re-evaluates its trailing window.
    ///
    /// Finally a fresh snapshot is published for external readers.
    pub fn step(&mut self) -> TickSummary {
        let tick = self.tick.saturating_add(1);
        self.tick = tick;
        let mut births: u32 = 0;
        let mut deaths: u32 = 0;

        // 1. Physiology and aging.
        let ids: Vec<AgentId> = self.agents.keys().copied().collect();
        for id in &ids {
            let Some(agent) = self.agents.get_mut(id) else {
                continue;
            };
            if !agent.alive {
                continue;
            }
            let outcome = apply_physiology_tick(agent, &self.agent_config);
            if let Some(cause) = outcome.death {
                agent.mark_dead(tick, cause);
                deaths = deaths.saturating_add(1);
                debug!(agent = %id, cause = %cause, tick, "Agent died");
            } else {
                agent.apply_event(AgentEvent::Aged, &self.agent_config);
            }
        }

        // 2. Global density after mortality.
        let density = self.habitat.density(self.alive());

        // 3. Behavior decisions against a consistent pre-move roster.
        let roster = self.live_roster();
        let mut decisions: Vec<(AgentId, BehaviorAction, NeighborSummary, f64)> =
            Vec::with_capacity(roster.len());
        for entry in &roster {
            let neighbors = self.neighborhood(&roster, entry.id, entry.position);
            let local_density = self.habitat.local_density(neighbors.count);
            let Some(agent) = self.agents.get(&entry.id) else {
                continue;
            };
            let action =
                decide_behavior(agent, local_density, &neighbors, &self.agent_config, &mut self.rng);
            decisions.push((entry.id, action, neighbors, local_density));
        }

        // 4. Action resolution.
        let occupied: Vec<Position> = roster.iter().map(|e| e.position).collect();
        let mut suitors: Vec<AgentId> = Vec::new();
        for &(id, action, neighbors, local_density) in &decisions {
            deaths = deaths.saturating_add(self.resolve_action(
                id,
                action,
                neighbors,
                local_density,
                &occupied,
                tick,
                &mut suitors,
            ));
        }
        births = births.saturating_add(self.resolve_matings(&suitors, density, tick));

        // 5. Stochastic overcrowding mortality against post-move positions.
        deaths = deaths.saturating_add(self.resolve_crowd_mortality(density, tick));

        // 6. Record statistics.
        self.births_total = self.births_total.saturating_add(u64::from(births));
        self.deaths_total = self.deaths_total.saturating_add(u64::from(deaths));
        let row = self.collect_stats(tick, births, deaths);
        self.stats.push(row);

        // 7. Phase classification over the trailing window.
        let phase_transition = self
            .classifier
            .evaluate(self.stats.trailing(self.phase_config.window));

        self.commit_snapshot(Some(row));
        debug!(tick, alive = row.alive, births, deaths, "Tick complete");
        TickSummary {
            tick,
            births,
            deaths,
            alive: row.alive,
            phase_transition,
        }
    }

    /// Number of living agents.
    pub fn alive(&self) -> u32 {
        let count = self.agents.values().filter(|a| a.alive).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Whether every agent is dead.
    pub fn is_extinct(&self) -> bool {
        self.alive() == 0
    }

    /// The tick of the last completed step (0 before any step).
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// The phase in effect and the tick it was entered.
    pub const fn phase(&self) -> PhaseTransition {
        self.classifier.current()
    }

    /// The full append-only statistics history, oldest first.
    pub fn history(&self) -> &[StatsSnapshot] {
        self.stats.history()
    }

    /// The statistics row of the last completed tick.
    pub fn latest_stats(&self) -> Option<&StatsSnapshot> {
        self.stats.latest()
    }

    /// Summary views of every agent, dead agents included, in
    /// ascending id order.
    pub fn agent_views(&self) -> Vec<AgentView> {
        let roster = self.live_roster();
        self.agents
            .values()
            .map(|agent| {
                let local_density = if agent.alive {
                    let neighbors = self.neighborhood(&roster, agent.id, agent.position);
                    self.habitat.local_density(neighbors.count)
                } else {
                    0.0
                };
                agent.view(local_density, &self.agent_config)
            })
            .collect()
    }

    /// Full readout of one agent for click-to-inspect.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::AgentNotFound`] for an id that was never
    /// allocated. Dead agents are still inspectable.
    pub fn agent_detail(&self, id: AgentId) -> Result<AgentDetail, WorldError> {
        let agent = self.agents.get(&id).ok_or(WorldError::AgentNotFound(id))?;
        let local_density = if agent.alive {
            let roster = self.live_roster();
            let neighbors = self.neighborhood(&roster, id, agent.position);
            self.habitat.local_density(neighbors.count)
        } else {
            0.0
        };
        Ok(agent.detail(local_density, &self.agent_config))
    }

    /// Demographic breakdown of the living population: sex counts,
    /// juvenile/adult split, and the deepest living generation.
    pub fn population_summary(&self) -> PopulationSummary {
        let mut summary = PopulationSummary::default();
        for agent in self.agents.values().filter(|a| a.alive) {
            match agent.sex {
                Sex::Female => summary.females = summary.females.saturating_add(1),
                Sex::Male => summary.males = summary.males.saturating_add(1),
            }
            if agent.age < self.agent_config.adult_age {
                summary.juveniles = summary.juveniles.saturating_add(1);
            } else {
                summary.adults = summary.adults.saturating_add(1);
            }
            summary.max_generation = summary.max_generation.max(agent.generation);
        }
        summary
    }

    /// The snapshot published at the end of the last completed tick.
    ///
    /// Cheap to call; the returned `Arc` stays consistent even while
    /// the simulation keeps stepping.
    pub fn snapshot(&self) -> Arc<WorldSnapshot> {
        Arc::clone(&self.snapshot)
    }

    fn seed_founders(&mut self) {
        for index in 0..self.population_config.initial_population {
            let sex = if index.is_multiple_of(2) {
                Sex::Female
            } else {
                Sex::Male
            };
            let traits = founder_traits(&mut self.rng);
            let position = self.habitat.random_position(&mut self.rng);
            let id = self.allocate_id();
            self.agents.insert(
                id,
                Agent::founder(id, sex, traits, position, self.agent_config.adult_age),
            );
        }
    }

    const fn allocate_id(&mut self) -> AgentId {
        let id = AgentId::from_raw(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// Resolve one decided action. Returns the number of deaths it
    /// caused (attacks can be immediately lethal).
    #[allow(clippy::too_many_arguments)]
    fn resolve_action(
        &mut self,
        id: AgentId,
        action: BehaviorAction,
        neighbors: NeighborSummary,
        local_density: f64,
        occupied: &[Position],
        tick: u64,
        suitors: &mut Vec<AgentId>,
    ) -> u32 {
        // Crowding and isolation drift traits before the action lands.
        let drift = if local_density >= self.agent_config.density_threshold {
            Some(AgentEvent::Crowded)
        } else if neighbors.count == 0 {
            Some(AgentEvent::Isolated)
        } else {
            None
        };
        if let Some(event) = drift {
            if let Some(agent) = self.agents.get_mut(&id) {
                agent.apply_event(event, &self.agent_config);
            }
        }

        let Some(agent) = self.agents.get(&id) else {
            return 0;
        };
        if !agent.alive {
            return 0;
        }
        let position = agent.position;

        match action {
            BehaviorAction::Forage => {
                let destination = self.habitat.random_step(position, &mut self.rng);
                if let Some(agent) = self.agents.get_mut(&id) {
                    agent.forage(&self.agent_config);
                    agent.position = destination;
                }
            }
            BehaviorAction::Rest => {
                if let Some(agent) = self.agents.get_mut(&id) {
                    agent.rest(&self.agent_config);
                }
            }
            BehaviorAction::Explore => {
                let destination = self.habitat.random_step(position, &mut self.rng);
                if let Some(agent) = self.agents.get_mut(&id) {
                    agent.position = destination;
                }
            }
            BehaviorAction::Hide => {
                let destination = self.habitat.least_crowded_step(position, occupied);
                if let Some(agent) = self.agents.get_mut(&id) {
                    agent.position = destination;
                }
            }
            BehaviorAction::Groom => {
                if let Some(agent) = self.agents.get_mut(&id) {
                    agent.groom(&self.agent_config);
                }
            }
            BehaviorAction::Socialize => {
                let target = self.nearest_living_neighbor(id, position);
                let destination = target
                    .and_then(|other| self.agents.get(&other))
                    .map_or(position, |other| {
                        self.habitat.step_toward(position, other.position)
                    });
                if let Some(agent) = self.agents.get_mut(&id) {
                    agent.position = destination;
                    let gain = self.agent_config.socialize_sociability_gain;
                    agent.traits.sociability = (agent.traits.sociability + gain).min(Traits::MAX);
                }
            }
            BehaviorAction::Attack => {
                return self.resolve_attack(id, position, tick);
            }
            BehaviorAction::AttemptReproduce => {
                suitors.push(id);
            }
        }
        0
    }

    /// One attack against the nearest living neighbor. Damage scales
    /// with the attacker's aggression; a victim driven to zero health
    /// dies on the spot and is gone before later agents act.
    fn resolve_attack(&mut self, attacker_id: AgentId, position: Position, tick: u64) -> u32 {
        let Some(victim_id) = self.nearest_living_neighbor(attacker_id, position) else {
            // The crowd dispersed between decision and resolution.
            let destination = self.habitat.random_step(position, &mut self.rng);
            if let Some(agent) = self.agents.get_mut(&attacker_id) {
                agent.position = destination;
            }
            return 0;
        };

        let damage = self
            .agents
            .get(&attacker_id)
            .map_or(0.0, |a| a.traits.aggression * self.agent_config.attack_damage_factor);
        let Some(victim) = self.agents.get_mut(&victim_id) else {
            return 0;
        };
        victim.apply_event(AgentEvent::Attacked { damage }, &self.agent_config);
        if victim.alive && victim.health <= 0.0 {
            victim.mark_dead(tick, DeathCause::Aggression);
            debug!(victim = %victim_id, attacker = %attacker_id, tick, "Agent killed");
            return 1;
        }
        0
    }

    /// Pair this tick's suitors and resolve litters. Returns births.
    ///
    /// Females claim the nearest unclaimed male suitor within the
    /// interaction radius, in ascending female id order. Success,
    /// litter size, and pup survival all degrade with global density.
    /// Births stop at the habitat capacity.
    fn resolve_matings(&mut self, suitors: &[AgentId], density: f64, tick: u64) -> u32 {
        let mut births: u32 = 0;
        let mut claimed: BTreeSet<AgentId> = BTreeSet::new();
        let mut headroom = u64::from(self.habitat.capacity()).saturating_sub(u64::from(self.alive()));

        for &mother_id in suitors {
            if claimed.contains(&mother_id) {
                continue;
            }
            let Some(mother) = self.agents.get(&mother_id) else {
                continue;
            };
            if !mother.alive || mother.sex != Sex::Female {
                continue;
            }
            let Some(father_id) = self.nearest_mate(mother, suitors, &claimed) else {
                continue;
            };
            claimed.insert(mother_id);
            claimed.insert(father_id);

            let Some(father) = self.agents.get(&father_id) else {
                continue;
            };
            let probability = success_probability(density, mother, father, &self.agent_config);
            if !self.rng.random_bool(probability.clamp(0.0, 1.0)) {
                continue;
            }

            let mother_traits = mother.traits;
            let mother_position = mother.position;
            let father_traits = father.traits;
            let generation = mother.generation.max(father.generation).saturating_add(1);

            let litter = litter_size(density, mother_traits.parenting, &self.agent_config);
            for _ in 0..litter {
                if headroom == 0 {
                    break;
                }
                if !pup_survives(density, &mut self.rng) {
                    continue;
                }
                let traits =
                    blend_traits(&mother_traits, &father_traits, &self.agent_config, &mut self.rng);
                let health = newborn_health(mother_traits.parenting, &self.agent_config, &mut self.rng);
                let sex = if self.rng.random_bool(0.5) {
                    Sex::Female
                } else {
                    Sex::Male
                };
                let id = self.allocate_id();
                self.agents.insert(
                    id,
                    Agent::offspring(id, sex, traits, mother_position, generation, tick, health),
                );
                births = births.saturating_add(1);
                headroom = headroom.saturating_sub(1);
            }

            for parent_id in [mother_id, father_id] {
                if let Some(parent) = self.agents.get_mut(&parent_id) {
                    parent.cooldown = self.agent_config.reproduction_cooldown;
                    parent.reproduction_drive = 0.0;
                    parent.apply_event(AgentEvent::GaveBirth, &self.agent_config);
                }
            }
        }
        births
    }

    /// Roll the stochastic overcrowding death for every living agent.
    ///
    /// The per-agent chance is
    /// `stress_death_rate * density^2 * (1 + neighborhood aggression / 100)`,
    /// so mortality is quadratic in crowding and worse in violent
    /// neighborhoods. Returns the number of deaths.
    fn resolve_crowd_mortality(&mut self, density: f64, tick: u64) -> u32 {
        let mut deaths: u32 = 0;
        let roster = self.live_roster();
        for entry in &roster {
            let neighbors = self.neighborhood(&roster, entry.id, entry.position);
            let chance = self.population_config.stress_death_rate
                * density
                * density
                * (1.0 + neighbors.mean_aggression / 100.0);
            let chance = chance.clamp(0.0, 1.0);
            if chance <= 0.0 || !self.rng.random_bool(chance) {
                continue;
            }
            if let Some(agent) = self.agents.get_mut(&entry.id) {
                agent.mark_dead(tick, DeathCause::Overcrowding);
                deaths = deaths.saturating_add(1);
                debug!(agent = %entry.id, tick, "Agent crushed by the crowd");
            }
        }
        deaths
    }

    fn collect_stats(&self, tick: u64, births: u32, deaths: u32) -> StatsSnapshot {
        let roster = self.live_roster();
        let mut state_counts = StateCounts::default();
        let mut sums = [0.0f64; 4];
        for entry in &roster {
            let Some(agent) = self.agents.get(&entry.id) else {
                continue;
            };
            let neighbors = self.neighborhood(&roster, entry.id, entry.position);
            let local_density = self.habitat.local_density(neighbors.count);
            state_counts.record(agent.mental_state(local_density, &self.agent_config));
            sums = [
                sums[0] + agent.traits.aggression,
                sums[1] + agent.traits.sociability,
                sums[2] + agent.traits.parenting,
                sums[3] + agent.traits.grooming,
            ];
        }
        let alive = u32::try_from(roster.len()).unwrap_or(u32::MAX);
        let mean_traits = if alive == 0 {
            Traits::new(0.0, 0.0, 0.0, 0.0)
        } else {
            let n = f64::from(alive);
            Traits::new(sums[0] / n, sums[1] / n, sums[2] / n, sums[3] / n)
        };
        StatsSnapshot {
            tick,
            alive,
            density: self.habitat.density(alive),
            state_counts,
            mean_traits,
            births,
            deaths,
            births_total: self.births_total,
            deaths_total: self.deaths_total,
        }
    }

    fn commit_snapshot(&mut self, latest_stats: Option<StatsSnapshot>) {
        self.snapshot = Arc::new(WorldSnapshot {
            tick: self.tick,
            phase: self.classifier.current(),
            agents: self.agent_views(),
            latest_stats,
        });
    }

    /// Living agents in ascending id order with the fields cross-agent
    /// resolution needs.
    fn live_roster(&self) -> Vec<RosterEntry> {
        self.agents
            .values()
            .filter(|a| a.alive)
            .map(|a| RosterEntry {
                id: a.id,
                position: a.position,
                aggression: a.traits.aggression,
                sociability: a.traits.sociability,
            })
            .collect()
    }

    /// Neighborhood summary for one agent against a roster, excluding
    /// the agent itself.
    fn neighborhood(&self, roster: &[RosterEntry], id: AgentId, position: Position) -> NeighborSummary {
        let mut count: u32 = 0;
        let mut aggression = 0.0f64;
        let mut sociability = 0.0f64;
        for entry in roster {
            if entry.id == id || !self.habitat.within_interaction(position, entry.position) {
                continue;
            }
            count = count.saturating_add(1);
            aggression += entry.aggression;
            sociability += entry.sociability;
        }
        if count == 0 {
            return NeighborSummary::empty();
        }
        let n = f64::from(count);
        NeighborSummary {
            count,
            mean_aggression: aggression / n,
            mean_sociability: sociability / n,
        }
    }

    /// The nearest living agent within the interaction radius, ties
    /// broken toward the lowest id.
    fn nearest_living_neighbor(&self, id: AgentId, position: Position) -> Option<AgentId> {
        self.agents
            .values()
            .filter(|a| a.alive && a.id != id)
            .filter(|a| self.habitat.within_interaction(position, a.position))
            .map(|a| (position.chebyshev_distance(a.position), a.id))
            .min()
            .map(|(_, nearest)| nearest)
    }

    /// The nearest unclaimed, still-eligible male suitor within the
    /// mother's interaction radius.
    fn nearest_mate(
        &self,
        mother: &Agent,
        suitors: &[AgentId],
        claimed: &BTreeSet<AgentId>,
    ) -> Option<AgentId> {
        suitors
            .iter()
            .filter(|id| !claimed.contains(id))
            .filter_map(|id| self.agents.get(id))
            .filter(|candidate| candidate.alive && candidate.sex == Sex::Male)
            .filter(|candidate| {
                self.habitat
                    .within_interaction(mother.position, candidate.position)
            })
            .map(|candidate| {
                (
                    mother.position.chebyshev_distance(candidate.position),
                    candidate.id,
                )
            })
            .min()
            .map(|(_, id)| id)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::float_cmp
)]
mod tests {
    use universe_types::{MentalState, Phase};

    use super::*;

    fn world(initial: u32, capacity: u32, seed: u64) -> Population {
        let habitat = HabitatConfig {
            capacity,
            ..HabitatConfig::default()
        };
        let population = PopulationConfig {
            initial_population: initial,
            seed,
            ..PopulationConfig::default()
        };
        Population::new(
            &habitat,
            population,
            PhaseConfig::default(),
            AgentConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn invalid_config_fails_at_construction() {
        let habitat = HabitatConfig {
            capacity: 0,
            ..HabitatConfig::default()
        };
        let result = Population::new(
            &habitat,
            PopulationConfig::default(),
            PhaseConfig::default(),
            AgentConfig::default(),
        );
        assert!(matches!(result, Err(WorldError::InvalidConfig { .. })));
    }

    #[test]
    fn invalid_agent_config_fails_at_construction() {
        let agents = AgentConfig {
            base_birth_chance: 1.5,
            ..AgentConfig::default()
        };
        let result = Population::new(
            &HabitatConfig::default(),
            PopulationConfig::default(),
            PhaseConfig::default(),
            agents,
        );
        assert!(matches!(result, Err(WorldError::AgentConfig { .. })));
    }

    #[test]
    fn founders_alternate_sex_and_start_adult() {
        let world = world(6, 960, 1);
        let agents: Vec<&Agent> = world.agents.values().collect();
        assert_eq!(agents.len(), 6);
        for (index, agent) in agents.iter().enumerate() {
            let expected = if index % 2 == 0 { Sex::Female } else { Sex::Male };
            assert_eq!(agent.sex, expected);
            assert_eq!(agent.age, 200);
            assert!(agent.alive);
        }
    }

    #[test]
    fn step_appends_exactly_one_stats_row() {
        let mut world = world(10, 960, 2);
        assert!(world.history().is_empty());
        for expected in 1..=5u64 {
            let summary = world.step();
            assert_eq!(summary.tick, expected);
            assert_eq!(world.history().len(), usize::try_from(expected).unwrap());
        }
        // Ticks in the history are strictly increasing.
        let ticks: Vec<u64> = world.history().iter().map(|s| s.tick).collect();
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn density_stays_in_unit_interval() {
        let mut world = world(50, 60, 3);
        for _ in 0..200 {
            world.step();
            let row = world.latest_stats().copied().unwrap();
            assert!(row.density >= 0.0 && row.density <= 1.0);
        }
    }

    #[test]
    fn mean_traits_stay_in_range() {
        let mut world = world(20, 100, 4);
        for _ in 0..300 {
            world.step();
        }
        for row in world.history() {
            assert!(row.mean_traits.in_range());
        }
    }

    #[test]
    fn step_never_fails_after_extinction() {
        let mut world = world(2, 960, 5);
        for agent in world.agents.values_mut() {
            agent.mark_dead(0, DeathCause::OldAge);
        }
        assert!(world.is_extinct());

        let summary = world.step();
        assert_eq!(summary.alive, 0);
        assert_eq!(summary.births, 0);
        let row = world.latest_stats().copied().unwrap();
        assert_eq!(row.alive, 0);
        assert_eq!(row.mean_traits, Traits::new(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn identical_seeds_produce_identical_runs() {
        let mut a = world(12, 200, 42);
        let mut b = world(12, 200, 42);
        for _ in 0..150 {
            let sa = a.step();
            let sb = b.step();
            assert_eq!(sa, sb);
        }
        let rows_a = serde_json::to_string(a.history()).unwrap();
        let rows_b = serde_json::to_string(b.history()).unwrap();
        assert_eq!(rows_a, rows_b);
        assert_eq!(a.agent_views(), b.agent_views());
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = world(12, 200, 1);
        let mut b = world(12, 200, 2);
        for _ in 0..100 {
            a.step();
            b.step();
        }
        let rows_a = serde_json::to_string(a.history()).unwrap();
        let rows_b = serde_json::to_string(b.history()).unwrap();
        assert_ne!(rows_a, rows_b);
    }

    #[test]
    fn reset_reproduces_the_original_run() {
        let mut world = world(10, 200, 7);
        for _ in 0..80 {
            world.step();
        }
        let first_run = serde_json::to_string(world.history()).unwrap();

        world.reset();
        assert_eq!(world.tick(), 0);
        assert!(world.history().is_empty());
        assert_eq!(world.phase().phase, Phase::Settlement);

        for _ in 0..80 {
            world.step();
        }
        let second_run = serde_json::to_string(world.history()).unwrap();
        assert_eq!(first_run, second_run);
    }

    #[test]
    fn population_never_exceeds_capacity() {
        let mut world = world(40, 50, 9);
        for _ in 0..500 {
            world.step();
            assert!(world.alive() <= 50);
        }
    }

    #[test]
    fn dead_agents_are_retained_and_frozen() {
        let mut world = world(4, 960, 11);
        let victim_id = *world.agents.keys().next().unwrap();
        world
            .agents
            .get_mut(&victim_id)
            .unwrap()
            .mark_dead(1, DeathCause::Aggression);

        for _ in 0..10 {
            world.step();
        }
        let detail = world.agent_detail(victim_id).unwrap();
        assert!(!detail.alive);
        assert_eq!(detail.died_at_tick, Some(1));
        assert_eq!(detail.mental_state, MentalState::Dead);
        // Dead agents still appear in views for the renderer.
        assert!(world.agent_views().iter().any(|v| v.id == victim_id));
    }

    #[test]
    fn unknown_agent_lookup_is_a_recoverable_error() {
        let world = world(3, 960, 13);
        let missing = AgentId::from_raw(9999);
        assert!(matches!(
            world.agent_detail(missing),
            Err(WorldError::AgentNotFound(id)) if id == missing
        ));
    }

    #[test]
    fn snapshot_reflects_the_last_completed_tick() {
        let mut world = world(10, 960, 17);
        let initial = world.snapshot();
        assert_eq!(initial.tick, 0);
        assert!(initial.latest_stats.is_none());

        world.step();
        let after = world.snapshot();
        assert_eq!(after.tick, 1);
        assert_eq!(after.latest_stats.map(|s| s.tick), Some(1));
        // The old snapshot is unaffected by the swap.
        assert_eq!(initial.tick, 0);
    }

    #[test]
    fn a_lone_pair_eventually_breeds() {
        // One female, one male, tiny habitat, low density. Drive accrues
        // at 0.2 per tick from adult founders, so within a few hundred
        // ticks the pair must pair off and produce at least one litter.
        let habitat = HabitatConfig {
            width: 3,
            height: 3,
            capacity: 100,
            interaction_radius: 2,
        };
        let population = PopulationConfig {
            initial_population: 2,
            seed: 25,
            ..PopulationConfig::default()
        };
        let mut world = Population::new(
            &habitat,
            population,
            PhaseConfig::default(),
            AgentConfig::default(),
        )
        .unwrap();

        let mut births = 0u32;
        for _ in 0..600 {
            births = births.saturating_add(world.step().births);
        }
        assert!(births > 0);
    }

    #[test]
    fn cooldown_is_set_after_a_birth() {
        let habitat = HabitatConfig {
            width: 3,
            height: 3,
            capacity: 100,
            interaction_radius: 2,
        };
        let population = PopulationConfig {
            initial_population: 2,
            seed: 25,
            ..PopulationConfig::default()
        };
        let mut world = Population::new(
            &habitat,
            population,
            PhaseConfig::default(),
            AgentConfig::default(),
        )
        .unwrap();

        for _ in 0..600 {
            let summary = world.step();
            if summary.births > 0 {
                let founder = world.agent_detail(AgentId::from_raw(0)).unwrap();
                assert!(founder.cooldown > 0);
                assert_eq!(founder.reproduction_drive, 0.0);
                return;
            }
        }
        panic!("no birth within 600 ticks");
    }

    #[test]
    fn population_summary_counts_the_living() {
        let mut world = world(6, 960, 21);
        let summary = world.population_summary();
        assert_eq!(summary.females, 3);
        assert_eq!(summary.males, 3);
        assert_eq!(summary.adults, 6);
        assert_eq!(summary.juveniles, 0);
        assert_eq!(summary.max_generation, 0);

        let victim_id = *world.agents.keys().next().unwrap();
        world
            .agents
            .get_mut(&victim_id)
            .unwrap()
            .mark_dead(1, DeathCause::OldAge);
        let summary = world.population_summary();
        assert_eq!(summary.females.saturating_add(summary.males), 5);
    }

    #[test]
    fn total_counts_accumulate_monotonically() {
        let mut world = world(20, 100, 19);
        let mut last_births = 0u64;
        let mut last_deaths = 0u64;
        for _ in 0..300 {
            world.step();
            let row = world.latest_stats().copied().unwrap();
            assert!(row.births_total >= last_births);
            assert!(row.deaths_total >= last_deaths);
            last_births = row.births_total;
            last_deaths = row.deaths_total;
        }
    }
}
