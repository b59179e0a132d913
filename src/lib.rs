//! Particle Term - typed particles on a toroidal character grid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (particles, affinity table, stepping)
//! - `renderer`: Erase-then-paint diff rendering onto a display surface
//! - `platform`: Input sources (terminal keys, scripted commands)
//! - `app`: Run loop tying input, simulation and rendering together
//! - `settings`: Data-driven configuration

pub mod app;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{App, RunSummary};
pub use error::{Error, Result};
pub use settings::Settings;

use rand::Rng;

/// Simulation configuration constants
pub mod consts {
    /// Population size
    pub const N_PARTICLES: usize = 100;
    /// Number of particle kinds
    pub const N_TYPES: u8 = 5;
    /// Per-axis velocity bound (cells per tick)
    pub const MAX_VELOCITY: f64 = 1.0;
    /// Interaction cutoff distance (cells)
    pub const MAX_RADIUS: f64 = 10.0;
    /// Per-axis bound on the accumulated force
    pub const MAX_FORCE: f64 = 10.0;
    pub const GRAVITATIONAL_CONSTANT: f64 = 1.0;
    /// Stand-in separation for coincident particles
    pub const MIN_RADIUS: f64 = 0.1;
    /// Sleep between ticks (microseconds)
    pub const FRAME_DELAY_US: u64 = 10_000;
}

/// Uniform draw in `[low, high)`. Degenerate ranges yield `low`.
#[inline]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    if high > low {
        rng.random_range(low..high)
    } else {
        low
    }
}

/// Euclidean distance between two points
#[inline]
pub fn distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    (bx - ax).hypot(by - ay)
}

/// `0` for zero, otherwise `±1` matching the sign of `v`
#[inline]
pub fn sign(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else if v > 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Clamp `v` to `[-max, max]`, keeping its sign
#[inline]
pub fn clamp_abs(v: f64, max: f64) -> f64 {
    if v.abs() > max { max * sign(v) } else { v }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_sign() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(3.5), 1.0);
        assert_eq!(sign(-0.25), -1.0);
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(1.0, 1.0, 1.0, 1.0), 0.0);
        assert!((distance(0.0, 0.0, 3.0, 4.0) - 5.0).abs() < 1e-12);
        assert!((distance(3.0, 4.0, 0.0, 0.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_clamp_abs_zero() {
        assert_eq!(clamp_abs(0.0, 2.0), 0.0);
        assert_eq!(clamp_abs(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_uniform_degenerate_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert_eq!(uniform(&mut rng, 4.0, 4.0), 4.0);
        assert_eq!(uniform(&mut rng, 4.0, 1.0), 4.0);
    }

    proptest! {
        #[test]
        fn clamp_abs_keeps_values_in_range(v in -1e6f64..1e6, m in 0.0f64..1e3) {
            let c = clamp_abs(v, m);
            if v.abs() <= m {
                prop_assert_eq!(c, v);
            } else {
                prop_assert_eq!(c, m * sign(v));
                prop_assert_eq!(c.abs(), m);
            }
        }

        #[test]
        fn uniform_stays_in_half_open_range(seed in any::<u64>(), low in -100.0f64..100.0, span in 0.001f64..100.0) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let high = low + span;
            for _ in 0..16 {
                let v = uniform(&mut rng, low, high);
                prop_assert!(v >= low && v < high);
            }
        }
    }
}
