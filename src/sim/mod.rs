//! Deterministic simulation module
//!
//! All particle logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable update order (by index)
//! - No rendering or platform dependencies

pub mod particle;
pub mod state;
pub mod tick;

pub use particle::{Bounds, Interaction, Particle, force, wrap_axis};
pub use state::{Polarity, SimParams, Simulation, StepStats};
pub use tick::{TickInput, tick};
