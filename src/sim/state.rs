//! Simulation state and lifecycle
//!
//! The population is created once, mutated in place every tick and never
//! grows or shrinks.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::particle::{Bounds, Particle};
use crate::consts::*;
use crate::error::{Error, Result};

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    pub n_particles: usize,
    pub n_types: u8,
    pub max_velocity: f64,
    pub max_radius: f64,
    pub max_force: f64,
    pub gravitational_constant: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            n_particles: N_PARTICLES,
            n_types: N_TYPES,
            max_velocity: MAX_VELOCITY,
            max_radius: MAX_RADIUS,
            max_force: MAX_FORCE,
            gravitational_constant: GRAVITATIONAL_CONSTANT,
        }
    }
}

impl SimParams {
    pub fn validate(&self) -> Result<()> {
        if self.n_particles == 0 {
            return Err(invalid("n_particles", "must be at least 1"));
        }
        if self.n_types == 0 {
            return Err(invalid("n_types", "must be at least 1"));
        }
        let limits = [
            ("max_velocity", self.max_velocity),
            ("max_radius", self.max_radius),
            ("max_force", self.max_force),
        ];
        for (name, value) in limits {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(name, format!("must be finite and positive, got {value}")));
            }
            // Velocities are drawn from [-value, value); the span must stay finite
            if !(2.0 * value).is_finite() {
                return Err(invalid(name, format!("{value} is too large")));
            }
        }
        if !self.gravitational_constant.is_finite() {
            return Err(invalid("gravitational_constant", "must be finite"));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> Error {
    Error::InvalidParams {
        name,
        reason: reason.into(),
    }
}

/// Global force sign: attraction as tabulated, or every pair inverted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    #[default]
    Normal,
    Inverted,
}

impl Polarity {
    /// Multiplier applied to every force contribution
    #[inline]
    pub fn value(self) -> f64 {
        match self {
            Polarity::Normal => 1.0,
            Polarity::Inverted => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Polarity::Normal => Polarity::Inverted,
            Polarity::Inverted => Polarity::Normal,
        }
    }
}

/// Per-step diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Particles whose velocity was zeroed by the safety net
    pub velocity_resets: usize,
}

/// The particle population and the grid it lives on
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Seed the population was drawn from
    pub seed: u64,
    /// Ticks stepped so far
    pub time_ticks: u64,
    params: SimParams,
    bounds: Bounds,
    particles: Box<[Particle]>,
}

impl Simulation {
    /// Randomly populate a `height x width` grid with `params.n_particles` particles
    pub fn new(params: SimParams, height: usize, width: usize, seed: u64) -> Result<Self> {
        params.validate()?;
        if height == 0 || width == 0 {
            return Err(Error::EmptySurface { height, width });
        }

        let bounds = Bounds::new(height, width);
        let mut rng = Pcg32::seed_from_u64(seed);
        let particles: Box<[Particle]> = (0..params.n_particles)
            .map(|_| Particle::random(&mut rng, &params, bounds))
            .collect();

        log::info!(
            "Simulation initialized: {} particles, {} kinds, {}x{} grid, seed {}",
            particles.len(),
            params.n_types,
            height,
            width,
            seed
        );

        Ok(Self {
            seed,
            time_ticks: 0,
            params,
            bounds,
            particles,
        })
    }

    /// Build a simulation from a hand-placed population
    pub fn from_particles(params: SimParams, bounds: Bounds, particles: Vec<Particle>) -> Result<Self> {
        let params = SimParams {
            n_particles: particles.len(),
            ..params
        };
        params.validate()?;
        if let Some(p) = particles.iter().find(|p| p.kind >= params.n_types) {
            return Err(invalid("n_types", format!("particle kind {} out of range", p.kind)));
        }
        Ok(Self {
            seed: 0,
            time_ticks: 0,
            params,
            bounds,
            particles: particles.into_boxed_slice(),
        })
    }

    /// Advance every particle once, in index order.
    ///
    /// Updates are applied in place: particle `i` sees particles `0..i` at
    /// their new positions for this tick and `i+1..` at last tick's.
    pub fn step(&mut self, flip: f64) -> StepStats {
        let mut stats = StepStats::default();

        for i in 0..self.particles.len() {
            let mut particle = self.particles[i];
            if particle.update(i, &self.particles, flip, &self.params, self.bounds) {
                stats.velocity_resets += 1;
            }
            self.particles[i] = particle;
        }

        self.time_ticks += 1;
        if stats.velocity_resets > 0 {
            log::debug!(
                "Tick {}: velocity safety net reset {} particle(s)",
                self.time_ticks,
                stats.velocity_resets
            );
        }
        stats
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Release the population
    pub fn teardown(self) {
        log::info!(
            "Simulation torn down after {} ticks ({} particles)",
            self.time_ticks,
            self.particles.len()
        );
    }
}
