//! Immutable world snapshots for external readers.
//!
//! The population manager publishes a fresh [`WorldSnapshot`] behind an
//! [`Arc`] at the end of every completed tick. Readers clone the `Arc`
//! and observe a fully consistent world state with no partial-tick
//! visibility and no locking against the simulation loop.

use std::sync::Arc;

use serde::Serialize;
use universe_types::{AgentView, PhaseTransition, StatsSnapshot};

/// A consistent, read-only view of the world at the end of a tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSnapshot {
    /// The tick this snapshot was taken at (0 before any step).
    pub tick: u64,
    /// The phase in effect and when it was entered.
    pub phase: PhaseTransition,
    /// Summary views of every agent, dead agents included, in
    /// ascending id order.
    pub agents: Vec<AgentView>,
    /// The statistics row recorded for this tick, absent before the
    /// first step.
    pub latest_stats: Option<StatsSnapshot>,
}

impl WorldSnapshot {
    /// Snapshot of a world that has not stepped yet.
    pub fn initial(phase: PhaseTransition, agents: Vec<AgentView>) -> Arc<Self> {
        Arc::new(Self {
            tick: 0,
            phase,
            agents,
            latest_stats: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use universe_types::{AgentId, MentalState, Phase, Position};

    use super::*;

    #[test]
    fn initial_snapshot_has_no_stats() {
        let agents = vec![AgentView {
            id: AgentId::from_raw(1),
            position: Position { x: 0, y: 0 },
            mental_state: MentalState::Normal,
            alive: true,
        }];
        let snapshot = WorldSnapshot::initial(
            PhaseTransition {
                phase: Phase::Settlement,
                tick: 0,
            },
            agents,
        );
        assert_eq!(snapshot.tick, 0);
        assert!(snapshot.latest_stats.is_none());
        assert_eq!(snapshot.agents.len(), 1);
    }

    #[test]
    fn snapshots_are_independent_of_later_swaps() {
        let first = WorldSnapshot::initial(
            PhaseTransition {
                phase: Phase::Settlement,
                tick: 0,
            },
            Vec::new(),
        );
        let held = Arc::clone(&first);
        let replacement = Arc::new(WorldSnapshot {
            tick: 1,
            phase: held.phase,
            agents: Vec::new(),
            latest_stats: None,
        });
        assert_eq!(held.tick, 0);
        assert_eq!(replacement.tick, 1);
    }
}
