//! Append-only statistics time series.
//!
//! One [`StatsSnapshot`] is appended per completed tick and never
//! mutated afterward: this history is the authoritative source for the
//! external grapher and for the phase classifier's trailing windows.
//! `reset()` replaces the recorder wholesale rather than editing it.

use universe_types::StatsSnapshot;

/// Ordered, append-only record of per-tick statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsRecorder {
    history: Vec<StatsSnapshot>,
}

impl StatsRecorder {
    /// An empty recorder, as produced by construction and reset.
    pub const fn new() -> Self {
        Self { history: Vec::new() }
    }

    /// Append the record for a completed tick.
    pub fn push(&mut self, snapshot: StatsSnapshot) {
        self.history.push(snapshot);
    }

    /// The most recent record, if any tick has completed.
    pub fn latest(&self) -> Option<&StatsSnapshot> {
        self.history.last()
    }

    /// The full ordered history (read-only).
    pub fn history(&self) -> &[StatsSnapshot] {
        &self.history
    }

    /// The trailing window of up to `window` records.
    pub fn trailing(&self, window: usize) -> &[StatsSnapshot] {
        let start = self.history.len().saturating_sub(window);
        self.history.get(start..).unwrap_or_default()
    }

    /// Number of recorded ticks.
    pub const fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether no tick has been recorded yet.
    pub const fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
