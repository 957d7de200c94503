//! Deterministic simulation module
//!
//! All seesaw logic lives here. This module must be pure and deterministic:
//! - Randomness only through an injected `RandomSource`
//! - Stable iteration order (drop order)
//! - No rendering or platform dependencies

pub mod engine;
pub mod physics;
pub mod rng;
pub mod state;

pub use engine::{DropOutcome, SeesawEngine};
pub use physics::{PhysicsResult, compute_physics};
pub use rng::{RandomSource, RngSource, ScriptedSource, SeededSource};
pub use state::{HistoryEntry, PlacedObject, Side, SimulationState};
