//! Mental-state derivation.
//!
//! Mental state is a pure function of traits, age, and local density --
//! recomputed on every read, never cached. Storing it separately would
//! let it drift from the traits that justify it, so the classification
//! lives here as a single function with a fixed priority order that
//! breaks ties deterministically.

use universe_types::{MentalState, Traits};

use crate::config::AgentConfig;

/// Derive an agent's mental state.
///
/// Evaluation order (first match wins):
///
/// 1. `Dead` if the agent is not alive.
/// 2. `BeautifulOne` if grooming exceeds the grooming threshold AND
///    sociability is below the sociability threshold AND the agent is
///    past juvenile age.
/// 3. `Aggressive` if aggression exceeds the aggression threshold.
/// 4. `Withdrawn` if sociability is below the sociability threshold.
/// 5. `Stressed` if local density exceeds the density threshold.
/// 6. `Normal` otherwise.
pub fn derive_mental_state(
    alive: bool,
    traits: &Traits,
    age: u64,
    local_density: f64,
    config: &AgentConfig,
) -> MentalState {
    if !alive {
        return MentalState::Dead;
    }
    if traits.grooming > config.grooming_threshold
        && traits.sociability < config.sociability_threshold
        && age > config.juvenile_age
    {
        return MentalState::BeautifulOne;
    }
    if traits.aggression > config.aggression_threshold {
        return MentalState::Aggressive;
    }
    if traits.sociability < config.sociability_threshold {
        return MentalState::Withdrawn;
    }
    if local_density > config.density_threshold {
        return MentalState::Stressed;
    }
    MentalState::Normal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AgentConfig {
        AgentConfig::default()
    }

    #[test]
    fn dead_takes_priority_over_everything() {
        let traits = Traits::new(100.0, 0.0, 50.0, 100.0);
        let state = derive_mental_state(false, &traits, 500, 1.0, &config());
        assert_eq!(state, MentalState::Dead);
    }

    #[test]
    fn beautiful_one_requires_all_three_conditions() {
        let cfg = config();
        let qualifying = Traits::new(10.0, 20.0, 50.0, 80.0);

        // All conditions met.
        assert_eq!(
            derive_mental_state(true, &qualifying, 300, 0.0, &cfg),
            MentalState::BeautifulOne
        );
        // Too young: falls through to withdrawn (low sociability).
        assert_eq!(
            derive_mental_state(true, &qualifying, 100, 0.0, &cfg),
            MentalState::Withdrawn
        );
        // Sociable groomer: normal.
        let sociable = Traits::new(10.0, 80.0, 50.0, 80.0);
        assert_eq!(
            derive_mental_state(true, &sociable, 300, 0.0, &cfg),
            MentalState::Normal
        );
    }

    #[test]
    fn beautiful_one_outranks_aggressive() {
        // A high-aggression, high-grooming recluse still classifies as a
        // beautiful one: the priority order is fixed.
        let traits = Traits::new(90.0, 10.0, 50.0, 90.0);
        let state = derive_mental_state(true, &traits, 300, 0.0, &config());
        assert_eq!(state, MentalState::BeautifulOne);
    }

    #[test]
    fn aggressive_above_threshold() {
        let traits = Traits::new(80.0, 60.0, 50.0, 40.0);
        assert_eq!(
            derive_mental_state(true, &traits, 300, 0.0, &config()),
            MentalState::Aggressive
        );
    }

    #[test]
    fn withdrawn_without_grooming_condition() {
        let traits = Traits::new(20.0, 10.0, 50.0, 40.0);
        assert_eq!(
            derive_mental_state(true, &traits, 300, 0.0, &config()),
            MentalState::Withdrawn
        );
    }

    #[test]
    fn stressed_only_under_density() {
        let traits = Traits::mid_range();
        assert_eq!(
            derive_mental_state(true, &traits, 300, 0.9, &config()),
            MentalState::Stressed
        );
        assert_eq!(
            derive_mental_state(true, &traits, 300, 0.1, &config()),
            MentalState::Normal
        );
    }
}
