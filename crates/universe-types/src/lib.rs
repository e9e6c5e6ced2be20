//! Shared type definitions for the Universe 25 simulation.
//!
//! This crate holds the data model used across the simulation: typed
//! identifiers, the enums describing agent and population state, and the
//! plain structs exchanged between the agent logic, the habitat, and any
//! external renderer.
//!
//! # Modules
//!
//! - [`ids`] -- Strongly-typed identifier wrappers ([`AgentId`]).
//! - [`enums`] -- Discrete classifications: [`Sex`], [`MentalState`],
//!   [`Phase`], [`BehaviorAction`], [`AgentEvent`], [`DeathCause`].
//! - [`structs`] -- Value types: [`Traits`], [`Position`],
//!   [`NeighborSummary`], [`StatsSnapshot`], [`AgentView`],
//!   [`AgentDetail`], [`PopulationSummary`], [`PhaseTransition`].

pub mod enums;
pub mod ids;
pub mod structs;

pub use enums::{AgentEvent, BehaviorAction, DeathCause, MentalState, Phase, Sex};
pub use ids::AgentId;
pub use structs::{
    AgentDetail, AgentView, NeighborSummary, PhaseTransition, PopulationSummary, Position,
    StateCounts, StatsSnapshot, Traits,
};
