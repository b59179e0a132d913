//! Single simulation tick
//!
//! Applies the per-tick input, then steps the population once.

use super::state::{Polarity, Simulation, StepStats};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Invert every force before stepping
    pub toggle_polarity: bool,
}

/// Advance the simulation by one tick under the given polarity
pub fn tick(sim: &mut Simulation, polarity: &mut Polarity, input: &TickInput) -> StepStats {
    if input.toggle_polarity {
        *polarity = polarity.flipped();
        log::info!("Polarity now {:?} (tick {})", polarity, sim.time_ticks);
    }
    sim.step(polarity.value())
}
