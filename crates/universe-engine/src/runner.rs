//! The headless run loop.
//!
//! Drives a [`Population`] frame by frame: each frame advances the world
//! by the configured speed multiplier, optionally sleeps to pace the
//! run, and periodically logs a population summary. The loop ends at the
//! tick budget or a configurable number of ticks after extinction
//! (enough for the final statistics rows and a terminal phase check).

use std::time::Duration;

use tracing::info;
use universe_habitat::Population;
use universe_types::Phase;

use crate::config::RunConfig;
use crate::error::EngineError;

/// Speed multipliers the driver accepts.
const SPEEDS: [u32; 5] = [1, 2, 5, 10, 20];

/// Extra ticks to run after extinction so the trailing statistics
/// window can settle.
const EXTINCTION_GRACE_TICKS: u64 = 25;

/// Why the run loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The configured tick budget was reached.
    TickBudget,
    /// Every agent died and the grace period elapsed.
    Extinction,
}

/// The headless simulation driver.
#[derive(Debug)]
pub struct Runner {
    population: Population,
    run: RunConfig,
}

impl Runner {
    /// Wrap a world with run settings.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidRunConfig`] for a zero tick budget
    /// or an unsupported speed multiplier.
    pub fn new(population: Population, run: RunConfig) -> Result<Self, EngineError> {
        if run.max_ticks == 0 {
            return Err(EngineError::InvalidRunConfig {
                field: "max_ticks",
                reason: String::from("tick budget must be at least 1"),
            });
        }
        if !SPEEDS.contains(&run.speed) {
            return Err(EngineError::InvalidRunConfig {
                field: "speed",
                reason: format!("must be one of {SPEEDS:?}, got {}", run.speed),
            });
        }
        Ok(Self { population, run })
    }

    /// Run to the tick budget or extinction, then return why we stopped.
    pub fn run(&mut self) -> StopReason {
        let mut extinct_since: Option<u64> = None;

        loop {
            for _ in 0..self.run.speed {
                let summary = self.population.step();

                if self.run.log_every > 0 && summary.tick.is_multiple_of(self.run.log_every) {
                    self.log_progress();
                }
                if self.population.is_extinct() && extinct_since.is_none() {
                    extinct_since = Some(summary.tick);
                    info!(tick = summary.tick, "Population extinct");
                }

                if summary.tick >= self.run.max_ticks {
                    self.log_progress();
                    return StopReason::TickBudget;
                }
                if let Some(since) = extinct_since {
                    if summary.tick.saturating_sub(since) >= EXTINCTION_GRACE_TICKS {
                        self.log_progress();
                        return StopReason::Extinction;
                    }
                }
            }

            if self.run.frame_interval_ms > 0 {
                std::thread::sleep(Duration::from_millis(self.run.frame_interval_ms));
            }
        }
    }

    /// The driven world, for post-run inspection.
    pub const fn population(&self) -> &Population {
        &self.population
    }

    fn log_progress(&self) {
        let phase = self.population.phase();
        if let Some(row) = self.population.latest_stats() {
            info!(
                tick = row.tick,
                alive = row.alive,
                density = format!("{:.3}", row.density),
                phase = %phase.phase,
                births_total = row.births_total,
                deaths_total = row.deaths_total,
                pathological = row.state_counts.pathological(),
                "Population summary"
            );
        }
        if phase.phase == Phase::Collapse {
            info!(since_tick = phase.tick, "Colony in terminal collapse");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use universe_agents::AgentConfig;
    use universe_habitat::{HabitatConfig, PhaseConfig, PopulationConfig};

    use super::*;

    fn world(initial_population: u32) -> Population {
        let population = PopulationConfig {
            initial_population,
            ..PopulationConfig::default()
        };
        Population::new(
            &HabitatConfig::default(),
            population,
            PhaseConfig::default(),
            AgentConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn zero_tick_budget_is_rejected() {
        let run = RunConfig {
            max_ticks: 0,
            ..RunConfig::default()
        };
        assert!(matches!(
            Runner::new(world(2), run),
            Err(EngineError::InvalidRunConfig { field: "max_ticks", .. })
        ));
    }

    #[test]
    fn unsupported_speed_is_rejected() {
        let run = RunConfig {
            speed: 3,
            ..RunConfig::default()
        };
        assert!(matches!(
            Runner::new(world(2), run),
            Err(EngineError::InvalidRunConfig { field: "speed", .. })
        ));
    }

    #[test]
    fn run_stops_at_the_tick_budget() {
        let run = RunConfig {
            max_ticks: 50,
            speed: 5,
            frame_interval_ms: 0,
            log_every: 0,
        };
        let mut runner = Runner::new(world(4), run).unwrap();
        assert_eq!(runner.run(), StopReason::TickBudget);
        assert_eq!(runner.population().tick(), 50);
        assert_eq!(runner.population().history().len(), 50);
    }

    #[test]
    fn run_stops_shortly_after_extinction() {
        // A single founder cannot breed; it dies of old age at
        // tick 801 and the loop stops a grace period later, well short
        // of the budget.
        let run = RunConfig {
            max_ticks: 10_000,
            speed: 20,
            frame_interval_ms: 0,
            log_every: 0,
        };
        let mut runner = Runner::new(world(1), run).unwrap();
        assert_eq!(runner.run(), StopReason::Extinction);
        assert!(runner.population().is_extinct());
        assert!(runner.population().tick() < 1_000);
    }
}
