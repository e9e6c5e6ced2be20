//! Habitat, population manager, phase classifier, and statistics for the
//! Universe 25 simulation.
//!
//! This crate owns everything above the single agent: the bounded grid,
//! the arena of agents and the deterministic tick loop, density and
//! neighborhood computation, the append-only statistics history, the
//! four-phase lifecycle classifier, and the snapshot surface external
//! readers consume.
//!
//! # Modules
//!
//! - [`config`] -- Habitat, seeding, and classifier tunables.
//! - [`error`] -- The world error surface ([`WorldError`]).
//! - [`habitat`] -- Grid geometry, density, and movement ([`Habitat`]).
//! - [`phase`] -- The monotonic lifecycle classifier ([`PhaseClassifier`]).
//! - [`population`] -- The arena and the tick loop ([`Population`]).
//! - [`snapshot`] -- Published read-only world state ([`WorldSnapshot`]).
//! - [`stats`] -- The append-only statistics recorder ([`StatsRecorder`]).

pub mod config;
pub mod error;
pub mod habitat;
pub mod phase;
pub mod population;
pub mod snapshot;
pub mod stats;

pub use config::{HabitatConfig, PhaseConfig, PopulationConfig};
pub use error::WorldError;
pub use habitat::Habitat;
pub use phase::PhaseClassifier;
pub use population::{Population, TickSummary};
pub use snapshot::WorldSnapshot;
pub use stats::StatsRecorder;
