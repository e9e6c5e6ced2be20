//! Per-tick behavior decision.
//!
//! [`decide_behavior`] is a pure function of the agent's own state plus
//! the density/neighbor context supplied by the population manager; the
//! RNG is threaded in explicitly so two runs with the same seed make the
//! same choices. It only *chooses* an action -- resolution (movement,
//! attack damage, pairing) belongs to the manager, which owns the arena.

use rand::Rng;
use universe_types::{BehaviorAction, MentalState, NeighborSummary};

use crate::agent::Agent;
use crate::config::AgentConfig;

/// Choose the agent's action for this tick.
///
/// Priority ladder, mirroring the drive structure of the original model:
///
/// 1. Forage when hunger is above the forage threshold (survival first;
///    food is unlimited, so this is always satisfiable).
/// 2. Rest when energy is below the rest threshold.
/// 3. Attempt reproduction when the drive is high and the agent is an
///    eligible parent.
/// 4. Otherwise act out the derived mental state: normal agents mostly
///    explore and sometimes socialize, stressed agents waver between
///    exploring and hiding, aggressive agents attack, withdrawn agents
///    hide, and beautiful ones groom.
///
/// Dead agents never decide; callers filter them out.
pub fn decide_behavior(
    agent: &Agent,
    local_density: f64,
    neighbors: &NeighborSummary,
    config: &AgentConfig,
    rng: &mut impl Rng,
) -> BehaviorAction {
    if agent.hunger > config.forage_threshold {
        return BehaviorAction::Forage;
    }
    if agent.energy < config.rest_threshold {
        return BehaviorAction::Rest;
    }
    if agent.reproduction_drive > config.mating_drive_threshold
        && agent.can_reproduce(local_density, config)
    {
        return BehaviorAction::AttemptReproduce;
    }

    match agent.mental_state(local_density, config) {
        MentalState::Normal => {
            if rng.random_bool(config.socialize_chance) {
                BehaviorAction::Socialize
            } else {
                BehaviorAction::Explore
            }
        }
        MentalState::Stressed => {
            if rng.random_bool(config.stressed_hide_chance) {
                BehaviorAction::Hide
            } else {
                BehaviorAction::Explore
            }
        }
        MentalState::Aggressive => {
            if neighbors.count > 0 {
                BehaviorAction::Attack
            } else {
                BehaviorAction::Explore
            }
        }
        MentalState::Withdrawn => BehaviorAction::Hide,
        MentalState::BeautifulOne => BehaviorAction::Groom,
        // Unreachable for live callers; resting is the inert choice.
        MentalState::Dead => BehaviorAction::Rest,
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use universe_types::{AgentId, Position, Sex, Traits};

    use super::*;

    fn agent_with_traits(traits: Traits) -> Agent {
        Agent::founder(AgentId::from_raw(0), Sex::Male, traits, Position::new(5, 5), 200)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(99)
    }

    #[test]
    fn hunger_dominates_everything() {
        let config = AgentConfig::default();
        let mut agent = agent_with_traits(Traits::new(95.0, 50.0, 50.0, 50.0));
        agent.hunger = 90.0;
        agent.reproduction_drive = 100.0;

        let action =
            decide_behavior(&agent, 0.1, &NeighborSummary::empty(), &config, &mut rng());
        assert_eq!(action, BehaviorAction::Forage);
    }

    #[test]
    fn exhaustion_beats_mating() {
        let config = AgentConfig::default();
        let mut agent = agent_with_traits(Traits::mid_range());
        agent.energy = 10.0;
        agent.reproduction_drive = 100.0;

        let action =
            decide_behavior(&agent, 0.1, &NeighborSummary::empty(), &config, &mut rng());
        assert_eq!(action, BehaviorAction::Rest);
    }

    #[test]
    fn high_drive_eligible_agent_seeks_mate() {
        let config = AgentConfig::default();
        let mut agent = agent_with_traits(Traits::mid_range());
        agent.reproduction_drive = 80.0;

        let action =
            decide_behavior(&agent, 0.1, &NeighborSummary::empty(), &config, &mut rng());
        assert_eq!(action, BehaviorAction::AttemptReproduce);
    }

    #[test]
    fn high_drive_on_cooldown_falls_through_to_state_behavior() {
        let config = AgentConfig::default();
        let mut agent = agent_with_traits(Traits::mid_range());
        agent.reproduction_drive = 80.0;
        agent.cooldown = 50;

        let action =
            decide_behavior(&agent, 0.1, &NeighborSummary::empty(), &config, &mut rng());
        assert_ne!(action, BehaviorAction::AttemptReproduce);
    }

    #[test]
    fn aggressive_agent_attacks_only_with_neighbors() {
        let config = AgentConfig::default();
        let agent = agent_with_traits(Traits::new(90.0, 50.0, 50.0, 40.0));

        let crowd = NeighborSummary {
            count: 3,
            mean_aggression: 50.0,
            mean_sociability: 50.0,
        };
        let action = decide_behavior(&agent, 0.1, &crowd, &config, &mut rng());
        assert_eq!(action, BehaviorAction::Attack);

        let action =
            decide_behavior(&agent, 0.1, &NeighborSummary::empty(), &config, &mut rng());
        assert_eq!(action, BehaviorAction::Explore);
    }

    #[test]
    fn withdrawn_hides_and_beautiful_one_grooms() {
        let config = AgentConfig::default();
        let withdrawn = agent_with_traits(Traits::new(20.0, 10.0, 50.0, 40.0));
        let action =
            decide_behavior(&withdrawn, 0.1, &NeighborSummary::empty(), &config, &mut rng());
        assert_eq!(action, BehaviorAction::Hide);

        let mut beautiful = agent_with_traits(Traits::new(10.0, 10.0, 60.0, 90.0));
        beautiful.age = 300;
        let action =
            decide_behavior(&beautiful, 0.1, &NeighborSummary::empty(), &config, &mut rng());
        assert_eq!(action, BehaviorAction::Groom);
    }

    #[test]
    fn action_mix_probabilities_come_from_config() {
        let agent = agent_with_traits(Traits::mid_range());
        let neighbors = NeighborSummary::empty();

        let sociable = AgentConfig {
            socialize_chance: 1.0,
            ..AgentConfig::default()
        };
        let solitary = AgentConfig {
            socialize_chance: 0.0,
            ..AgentConfig::default()
        };
        let action = decide_behavior(&agent, 0.1, &neighbors, &sociable, &mut rng());
        assert_eq!(action, BehaviorAction::Socialize);
        let action = decide_behavior(&agent, 0.1, &neighbors, &solitary, &mut rng());
        assert_eq!(action, BehaviorAction::Explore);

        // Mid-range traits above the density threshold derive Stressed.
        let timid = AgentConfig {
            stressed_hide_chance: 1.0,
            ..AgentConfig::default()
        };
        let restless = AgentConfig {
            stressed_hide_chance: 0.0,
            ..AgentConfig::default()
        };
        let action = decide_behavior(&agent, 0.9, &neighbors, &timid, &mut rng());
        assert_eq!(action, BehaviorAction::Hide);
        let action = decide_behavior(&agent, 0.9, &neighbors, &restless, &mut rng());
        assert_eq!(action, BehaviorAction::Explore);
    }

    #[test]
    fn same_seed_same_choices() {
        let config = AgentConfig::default();
        let agent = agent_with_traits(Traits::mid_range());
        let neighbors = NeighborSummary::empty();

        let mut rng_a = StdRng::seed_from_u64(1234);
        let mut rng_b = StdRng::seed_from_u64(1234);
        for _ in 0..100 {
            let a = decide_behavior(&agent, 0.2, &neighbors, &config, &mut rng_a);
            let b = decide_behavior(&agent, 0.2, &neighbors, &config, &mut rng_b);
            assert_eq!(a, b);
        }
    }
}
