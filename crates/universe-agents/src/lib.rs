//! Agent traits, physiology, behavior, and lifecycle for the Universe 25
//! simulation.
//!
//! This crate is the logic layer for individual mice -- everything that
//! operates on one agent's state without touching the population arena.
//! It sits between `universe-types` (data structures) and
//! `universe-habitat` (the population manager that owns the arena,
//! density, and cross-agent resolution).
//!
//! # Modules
//!
//! - [`agent`] -- The [`Agent`] entity: identity, traits, physiology,
//!   event-driven trait drift, reproduction eligibility.
//! - [`behavior`] -- Per-tick behavior decision ([`decide_behavior`]).
//! - [`config`] -- Tunable thresholds and rates ([`AgentConfig`]).
//! - [`error`] -- Configuration validation errors ([`AgentConfigError`]).
//! - [`physiology`] -- Aging and needs decay ([`apply_physiology_tick`]).
//! - [`reproduction`] -- Pairing probability, litter size, trait blending.
//! - [`state`] -- The pure mental-state derivation
//!   ([`derive_mental_state`]).

pub mod agent;
pub mod behavior;
pub mod config;
pub mod error;
pub mod physiology;
pub mod reproduction;
pub mod state;

pub use agent::{Agent, founder_traits};
pub use behavior::decide_behavior;
pub use config::AgentConfig;
pub use error::AgentConfigError;
pub use physiology::{PhysiologyOutcome, apply_physiology_tick};
pub use reproduction::{
    blend_traits, litter_size, newborn_health, pup_survives, success_probability,
};
pub use state::derive_mental_state;
