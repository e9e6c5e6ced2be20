//! The four-phase population-lifecycle classifier.
//!
//! A one-directional state machine over
//! Settlement -> Growth -> Breakdown -> Collapse. Each criterion is
//! evaluated against a trailing window of statistics snapshots, never a
//! single-tick sample, so a noisy tick cannot flap a transition. No
//! transition ever reverses: once Collapse is reached the classification
//! is terminal even if the population later stabilizes at a low count,
//! matching the experiment's "no recovery" finding.

use tracing::info;
use universe_types::{Phase, PhaseTransition, StatsSnapshot};

use crate::config::PhaseConfig;

/// Monotonic phase classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseClassifier {
    config: PhaseConfig,
    current: PhaseTransition,
}

impl PhaseClassifier {
    /// A fresh classifier in the Settlement phase at tick 0.
    pub const fn new(config: PhaseConfig) -> Self {
        Self {
            config,
            current: PhaseTransition {
                phase: Phase::Settlement,
                tick: 0,
            },
        }
    }

    /// The phase in effect and the tick it was entered.
    pub const fn current(&self) -> PhaseTransition {
        self.current
    }

    /// Re-evaluate against the trailing window of `history`.
    ///
    /// Advances at most one phase per call and returns the transition
    /// if one occurred. The window must be full before any criterion is
    /// considered, so early-run noise cannot trigger a premature
    /// transition.
    pub fn evaluate(&mut self, trailing: &[StatsSnapshot]) -> Option<PhaseTransition> {
        if trailing.len() < self.config.window {
            return None;
        }

        let advance = match self.current.phase {
            Phase::Settlement => self.growth_criterion(trailing),
            Phase::Growth => self.breakdown_criterion(trailing),
            Phase::Breakdown => self.collapse_criterion(trailing),
            Phase::Collapse => false,
        };
        if !advance {
            return None;
        }

        let next = self.current.phase.next()?;
        let tick = trailing.last().map_or(0, |s| s.tick);
        self.current = PhaseTransition { phase: next, tick };
        info!(phase = %next, tick, "Phase transition");
        Some(self.current)
    }

    /// Growth -> Breakdown: crowding plus dominant social pathology.
    fn breakdown_criterion(&self, window: &[StatsSnapshot]) -> bool {
        let mean_density = mean(window.iter().map(|s| s.density));
        let mean_pathology = mean(window.iter().map(|s| {
            if s.alive == 0 {
                0.0
            } else {
                f64::from(s.state_counts.pathological()) / f64::from(s.alive)
            }
        }));
        mean_density > self.config.breakdown_density_threshold
            && mean_pathology > self.config.pathology_threshold
    }

    /// Settlement -> Growth: sustained relative population growth.
    fn growth_criterion(&self, window: &[StatsSnapshot]) -> bool {
        let (Some(first), Some(last)) = (window.first(), window.last()) else {
            return false;
        };
        if last.alive <= first.alive {
            return false;
        }
        let baseline = f64::from(first.alive.max(1));
        let growth = f64::from(last.alive.saturating_sub(first.alive));
        let ticks = window.len().saturating_sub(1).max(1);
        let rate_per_tick = growth / baseline / ticks_as_f64(ticks);
        rate_per_tick >= self.config.growth_rate_threshold
    }

    /// Breakdown -> Collapse: birth rate under the floor while deaths
    /// keep pace with or outrun births.
    fn collapse_criterion(&self, window: &[StatsSnapshot]) -> bool {
        let birth_rate = mean(window.iter().map(|s| f64::from(s.births)));
        let death_rate = mean(window.iter().map(|s| f64::from(s.deaths)));
        birth_rate < self.config.collapse_birth_rate_floor && death_rate >= birth_rate
    }
}

/// Mean of an iterator of samples, 0 when empty.
fn mean(samples: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count: u32 = 0;
    for sample in samples {
        sum += sample;
        count = count.saturating_add(1);
    }
    if count == 0 { 0.0 } else { sum / f64::from(count) }
}

/// Window length as f64 without precision-loss casts (windows are small).
fn ticks_as_f64(ticks: usize) -> f64 {
    u32::try_from(ticks).map_or(f64::MAX, f64::from)
}

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects)]
mod tests {
    use universe_types::{StateCounts, Traits};

    use super::*;

    fn config() -> PhaseConfig {
        PhaseConfig {
            window: 5,
            ..PhaseConfig::default()
        }
    }

    fn snapshot(tick: u64, alive: u32, density: f64, births: u32, deaths: u32) -> StatsSnapshot {
        StatsSnapshot {
            tick,
            alive,
            density,
            state_counts: StateCounts::default(),
            mean_traits: Traits::mid_range(),
            births,
            deaths,
            births_total: 0,
            deaths_total: 0,
        }
    }

    fn pathological_snapshot(tick: u64, alive: u32, density: f64) -> StatsSnapshot {
        let mut s = snapshot(tick, alive, density, 0, 0);
        s.state_counts.aggressive = alive / 2;
        s.state_counts.withdrawn = alive / 4;
        s
    }

    #[test]
    fn no_transition_before_window_fills() {
        let mut classifier = PhaseClassifier::new(config());
        let window: Vec<StatsSnapshot> =
            (1..=3).map(|t| snapshot(t, (t * 20).try_into().unwrap_or(0), 0.1, 2, 0)).collect();
        assert!(classifier.evaluate(&window).is_none());
        assert_eq!(classifier.current().phase, Phase::Settlement);
    }

    #[test]
    fn settlement_advances_on_sustained_growth() {
        let mut classifier = PhaseClassifier::new(config());
        let window: Vec<StatsSnapshot> = (1..=5)
            .map(|t| snapshot(t, 10 + u32::try_from(t).unwrap_or(0) * 5, 0.05, 2, 0))
            .collect();
        let transition = classifier.evaluate(&window);
        assert_eq!(
            transition.map(|t| t.phase),
            Some(Phase::Growth),
        );
        assert_eq!(transition.map(|t| t.tick), Some(5));
    }

    #[test]
    fn flat_population_stays_in_settlement() {
        let mut classifier = PhaseClassifier::new(config());
        let window: Vec<StatsSnapshot> = (1..=5).map(|t| snapshot(t, 10, 0.05, 0, 0)).collect();
        assert!(classifier.evaluate(&window).is_none());
    }

    #[test]
    fn growth_advances_on_crowded_pathology() {
        let mut classifier = PhaseClassifier::new(config());
        // Reach Growth first.
        let growth_window: Vec<StatsSnapshot> = (1..=5)
            .map(|t| snapshot(t, 10 + u32::try_from(t).unwrap_or(0) * 5, 0.1, 2, 0))
            .collect();
        classifier.evaluate(&growth_window);
        assert_eq!(classifier.current().phase, Phase::Growth);

        // Crowded and pathological: advance to Breakdown.
        let breakdown_window: Vec<StatsSnapshot> =
            (6..=10).map(|t| pathological_snapshot(t, 100, 0.7)).collect();
        let transition = classifier.evaluate(&breakdown_window);
        assert_eq!(transition.map(|t| t.phase), Some(Phase::Breakdown));
    }

    #[test]
    fn crowding_without_pathology_does_not_break_down() {
        let mut classifier = PhaseClassifier::new(config());
        let growth_window: Vec<StatsSnapshot> = (1..=5)
            .map(|t| snapshot(t, 10 + u32::try_from(t).unwrap_or(0) * 5, 0.1, 2, 0))
            .collect();
        classifier.evaluate(&growth_window);

        let crowded_only: Vec<StatsSnapshot> =
            (6..=10).map(|t| snapshot(t, 100, 0.9, 3, 1)).collect();
        assert!(classifier.evaluate(&crowded_only).is_none());
        assert_eq!(classifier.current().phase, Phase::Growth);
    }

    #[test]
    fn breakdown_collapses_when_deaths_outrun_dying_births() {
        let mut classifier = PhaseClassifier::new(config());
        let growth_window: Vec<StatsSnapshot> = (1..=5)
            .map(|t| snapshot(t, 10 + u32::try_from(t).unwrap_or(0) * 5, 0.1, 2, 0))
            .collect();
        classifier.evaluate(&growth_window);
        let breakdown_window: Vec<StatsSnapshot> =
            (6..=10).map(|t| pathological_snapshot(t, 100, 0.7)).collect();
        classifier.evaluate(&breakdown_window);
        assert_eq!(classifier.current().phase, Phase::Breakdown);

        let dying: Vec<StatsSnapshot> = (11..=15).map(|t| snapshot(t, 50, 0.5, 0, 3)).collect();
        let transition = classifier.evaluate(&dying);
        assert_eq!(transition.map(|t| t.phase), Some(Phase::Collapse));
    }

    #[test]
    fn collapse_is_terminal_even_if_population_recovers() {
        let mut classifier = PhaseClassifier::new(config());
        // Drive straight through all transitions.
        let growth_window: Vec<StatsSnapshot> = (1..=5)
            .map(|t| snapshot(t, 10 + u32::try_from(t).unwrap_or(0) * 5, 0.1, 2, 0))
            .collect();
        classifier.evaluate(&growth_window);
        let breakdown_window: Vec<StatsSnapshot> =
            (6..=10).map(|t| pathological_snapshot(t, 100, 0.7)).collect();
        classifier.evaluate(&breakdown_window);
        let dying: Vec<StatsSnapshot> = (11..=15).map(|t| snapshot(t, 50, 0.5, 0, 3)).collect();
        classifier.evaluate(&dying);
        assert_eq!(classifier.current().phase, Phase::Collapse);

        // A later recovery-shaped window changes nothing.
        let recovery: Vec<StatsSnapshot> = (16..=20)
            .map(|t| snapshot(t, 10 + u32::try_from(t).unwrap_or(0), 0.05, 5, 0))
            .collect();
        assert!(classifier.evaluate(&recovery).is_none());
        assert_eq!(classifier.current().phase, Phase::Collapse);
    }
}
