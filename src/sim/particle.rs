//! Particle record and its single-step update rule
//!
//! Axis convention follows the character grid: `x` is the row (bounded by the
//! grid height), `y` is the column (bounded by the grid width).

use glam::DVec2;
use rand::Rng;

use super::state::SimParams;
use crate::consts::MIN_RADIUS;
use crate::{clamp_abs, distance, sign, uniform};

/// Grid extent used for placement and wrapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub height: f64,
    pub width: f64,
}

impl Bounds {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height: height as f64,
            width: width as f64,
        }
    }

    /// Wrap a position onto the torus, each axis independently
    #[inline]
    pub fn wrap(&self, pos: DVec2) -> DVec2 {
        DVec2::new(wrap_axis(pos.x, self.height), wrap_axis(pos.y, self.width))
    }

    /// Whether a position lies in `[0, height] x [0, width]`
    pub fn contains(&self, pos: DVec2) -> bool {
        (0.0..=self.height).contains(&pos.x) && (0.0..=self.width).contains(&pos.y)
    }
}

/// One-sided toroidal wrap: leaving past the upper bound lands on `0`,
/// dropping below `0` lands on `upper`. Overshoot distance is discarded.
#[inline]
pub fn wrap_axis(v: f64, upper: f64) -> f64 {
    if v >= upper {
        0.0
    } else if v < 0.0 {
        upper
    } else {
        v
    }
}

/// Affinity table between two particle kinds.
///
/// Cross-parity pairs repel (`-1`), identical kinds attract (`+1`),
/// everything else (distinct kinds of equal parity) is neutral.
#[inline]
pub fn force(kind_a: u8, kind_b: u8) -> f64 {
    if kind_a % 2 != kind_b % 2 {
        -1.0
    } else if kind_a == kind_b {
        1.0
    } else {
        0.0
    }
}

/// Net pull on one particle from the rest of the population
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interaction {
    /// Accumulated force before clamping
    pub force: DVec2,
    /// `atan` of the last separation visited, in range or not
    pub theta: f64,
}

/// A typed particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Kind in `[0, n_types)`, fixed at creation
    pub kind: u8,
    pub pos: DVec2,
    /// Position before the current tick's move (used for erasure only)
    pub pos_last: DVec2,
    pub vel: DVec2,
    pub mass: f64,
}

impl Particle {
    /// Create a particle at rest with the given kind and position
    pub fn new(kind: u8, pos: DVec2) -> Self {
        Self {
            kind,
            pos,
            pos_last: DVec2::ZERO,
            vel: DVec2::ZERO,
            mass: 1.0,
        }
    }

    /// Create a particle with random kind, position and velocity
    pub fn random<R: Rng + ?Sized>(rng: &mut R, params: &SimParams, bounds: Bounds) -> Self {
        let kind = rng.random_range(0..params.n_types);
        let pos = DVec2::new(
            uniform(rng, 0.0, bounds.height),
            uniform(rng, 0.0, bounds.width),
        );
        let max_vel = params.max_velocity;
        let vel = DVec2::new(
            uniform(rng, -max_vel, max_vel),
            uniform(rng, -max_vel, max_vel),
        );
        Self {
            vel,
            ..Self::new(kind, pos)
        }
    }

    pub fn with_velocity(mut self, vel: DVec2) -> Self {
        self.vel = vel;
        self
    }

    /// Sum the pull of every other particle within `max_radius`.
    ///
    /// `index` is this particle's slot in `population`; that slot is skipped
    /// by identity, so coincident particles still interact.
    pub fn interaction(
        &self,
        index: usize,
        population: &[Particle],
        flip: f64,
        params: &SimParams,
    ) -> Interaction {
        let mut net = DVec2::ZERO;
        let mut theta = 0.0;

        for (i, other) in population.iter().enumerate() {
            if i == index {
                continue;
            }
            let r = distance(self.pos.x, self.pos.y, other.pos.x, other.pos.y);
            theta = r.atan();
            let divisor = if r == 0.0 { MIN_RADIUS } else { r };
            if r <= params.max_radius {
                let magnitude =
                    params.gravitational_constant * force(self.kind, other.kind) * flip / divisor;
                net.x += sign(other.pos.x - self.pos.x) * magnitude;
                net.y += sign(other.pos.y - self.pos.y) * magnitude;
            }
        }

        Interaction { force: net, theta }
    }

    /// Advance this particle one tick against the live population.
    ///
    /// Returns `true` when the velocity safety net zeroed the velocity.
    pub fn update(
        &mut self,
        index: usize,
        population: &[Particle],
        flip: f64,
        params: &SimParams,
        bounds: Bounds,
    ) -> bool {
        self.pos_last = self.pos;
        self.pos = bounds.wrap(self.pos + self.vel);

        let Interaction { force, theta } = self.interaction(index, population, flip, params);
        let force = DVec2::new(
            clamp_abs(force.x, params.max_force),
            clamp_abs(force.y, params.max_force),
        );

        self.vel += force * theta.cos() / self.mass;

        let max_vel = params.max_velocity;
        self.vel = DVec2::new(clamp_abs(self.vel.x, max_vel), clamp_abs(self.vel.y, max_vel));

        // NaN fails every comparison, so test for "not within bounds"
        let bounded = self.vel.x.abs() <= max_vel && self.vel.y.abs() <= max_vel;
        if !bounded {
            self.vel = DVec2::ZERO;
        }
        !bounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MAX_RADIUS, N_TYPES};
    use proptest::prelude::*;

    fn params() -> SimParams {
        SimParams::default()
    }

    fn bounds() -> Bounds {
        Bounds::new(24, 80)
    }

    #[test]
    fn test_force_symmetric_exhaustive() {
        for a in 0..N_TYPES {
            for b in 0..N_TYPES {
                assert_eq!(force(a, b), force(b, a), "force({a}, {b})");
            }
        }
    }

    #[test]
    fn test_force_same_kind_attracts() {
        for t in 0..N_TYPES {
            assert_eq!(force(t, t), 1.0);
        }
    }

    #[test]
    fn test_force_table() {
        assert_eq!(force(0, 1), -1.0);
        assert_eq!(force(3, 4), -1.0);
        assert_eq!(force(0, 2), 0.0);
        assert_eq!(force(1, 3), 0.0);
        assert_eq!(force(2, 4), 0.0);
    }

    #[test]
    fn test_wrap_axis_edges() {
        assert_eq!(wrap_axis(80.0, 80.0), 0.0);
        assert_eq!(wrap_axis(80.5, 80.0), 0.0);
        assert_eq!(wrap_axis(-f64::EPSILON, 80.0), 80.0);
        assert_eq!(wrap_axis(-30.0, 80.0), 80.0);
        assert_eq!(wrap_axis(0.0, 80.0), 0.0);
        assert_eq!(wrap_axis(42.25, 80.0), 42.25);
    }

    #[test]
    fn test_lone_particle_moves_by_velocity() {
        let vel = DVec2::new(0.5, -0.25);
        let mut p = Particle::new(2, DVec2::new(10.0, 10.0)).with_velocity(vel);
        let population = [p];

        let hit = p.update(0, &population, 1.0, &params(), bounds());

        assert!(!hit);
        assert_eq!(p.pos_last, DVec2::new(10.0, 10.0));
        assert_eq!(p.pos, DVec2::new(10.5, 9.75));
        assert_eq!(p.vel, vel);
    }

    #[test]
    fn test_lone_particle_wraps() {
        let mut p = Particle::new(0, DVec2::new(23.8, 0.2)).with_velocity(DVec2::new(0.5, -0.5));
        let population = [p];

        p.update(0, &population, 1.0, &params(), bounds());

        assert_eq!(p.pos, DVec2::new(0.0, 80.0));
        assert_eq!(p.pos_last, DVec2::new(23.8, 0.2));
    }

    #[test]
    fn test_out_of_range_neighbor_has_no_force() {
        let a = Particle::new(1, DVec2::new(5.0, 5.0));
        let b = Particle::new(1, DVec2::new(5.0, 5.0 + MAX_RADIUS + 1.0));
        let hit = a.interaction(0, &[a, b], 1.0, &params());

        assert_eq!(hit.force, DVec2::ZERO);
        // Theta still tracks the last separation visited
        assert!((hit.theta - (MAX_RADIUS + 1.0).atan()).abs() < 1e-12);
    }

    #[test]
    fn test_theta_from_last_neighbor_even_out_of_range() {
        let vel = DVec2::new(0.0, 0.25);
        let a = Particle::new(1, DVec2::new(5.0, 5.0));
        let near = Particle::new(1, DVec2::new(5.0, 6.0));
        let far = Particle::new(1, DVec2::new(5.0, 20.0));
        let population = [a, near, far];

        // Only `near` pulls, but `far` was visited last and sets theta
        let hit = a.interaction(0, &population, 1.0, &params());
        assert_eq!(hit.force, DVec2::new(0.0, 1.0));
        assert_eq!(hit.theta, 15f64.atan());

        // The move step lands exactly on (5, 5), keeping separations at 1 and 15
        let mut moved = Particle::new(1, DVec2::new(5.0, 4.75)).with_velocity(vel);
        moved.update(0, &population, 1.0, &params(), bounds());
        assert_eq!(moved.pos, DVec2::new(5.0, 5.0));
        let expected = vel + DVec2::new(0.0, 1.0) * 15f64.atan().cos();
        assert!((moved.vel - expected).length() < 1e-12);
    }

    #[test]
    fn test_same_kind_pair_attracts() {
        let a = Particle::new(3, DVec2::new(5.0, 5.0));
        let b = Particle::new(3, DVec2::new(6.0, 5.0));
        let population = [a, b];

        let on_a = a.interaction(0, &population, 1.0, &params());
        let on_b = b.interaction(1, &population, 1.0, &params());

        // a is pulled toward +x, b toward -x, no y component
        assert_eq!(on_a.force, DVec2::new(1.0, 0.0));
        assert_eq!(on_b.force, DVec2::new(-1.0, 0.0));
        assert!((on_a.theta - 1.0f64.atan()).abs() < 1e-12);
    }

    #[test]
    fn test_flip_inverts_force() {
        let a = Particle::new(3, DVec2::new(5.0, 5.0));
        let b = Particle::new(3, DVec2::new(6.0, 5.0));
        let population = [a, b];

        let attract = a.interaction(0, &population, 1.0, &params());
        let repel = a.interaction(0, &population, -1.0, &params());
        assert_eq!(repel.force, -attract.force);

        let mut pa = a;
        pa.update(0, &population, 1.0, &params(), bounds());
        assert!(pa.vel.x > 0.0);

        let mut pa = a;
        pa.update(0, &population, -1.0, &params(), bounds());
        assert!(pa.vel.x < 0.0);
    }

    #[test]
    fn test_coincident_particles_use_min_radius() {
        let a = Particle::new(2, DVec2::new(5.0, 5.0));
        let b = Particle::new(2, DVec2::new(5.0, 5.0));
        let hit = a.interaction(0, &[a, b], 1.0, &params());

        // Same coordinates: sign() is zero on both axes, theta is atan(0)
        assert_eq!(hit.force, DVec2::ZERO);
        assert_eq!(hit.theta, 0.0);
    }

    #[test]
    fn test_self_excluded_by_index_not_value() {
        let a = Particle::new(4, DVec2::new(5.0, 5.0));
        let c = Particle::new(4, DVec2::new(5.0, 7.0));
        // Slot 1 is an exact copy of slot 0; only slot 0 is "self"
        let hit = a.interaction(0, &[a, a, c], 1.0, &params());

        assert_eq!(hit.force, DVec2::new(0.0, 0.5));
    }

    #[test]
    fn test_force_is_clamped() {
        let mut p = params();
        p.max_force = 0.5;
        p.max_velocity = 100.0;
        let a = Particle::new(0, DVec2::new(5.0, 5.0));
        let b = Particle::new(0, DVec2::new(5.0, 5.1));
        let mut moved = a;

        moved.update(0, &[a, b], 1.0, &p, bounds());

        let expected = 0.5 * 0.1f64.atan().cos();
        assert!((moved.vel.y - expected).abs() < 1e-12);
    }

    #[test]
    fn test_safety_net_zeroes_non_finite_velocity() {
        let mut p = params();
        p.gravitational_constant = f64::NAN;
        let a = Particle::new(0, DVec2::new(5.0, 5.0)).with_velocity(DVec2::new(0.1, 0.1));
        let b = Particle::new(0, DVec2::new(6.0, 6.0));
        let mut moved = a;

        let hit = moved.update(0, &[a, b], 1.0, &p, bounds());

        assert!(hit);
        assert_eq!(moved.vel, DVec2::ZERO);
    }

    proptest! {
        #[test]
        fn update_keeps_invariants(
            x in 0.0f64..=24.0, y in 0.0f64..=80.0,
            vx in -1.0f64..=1.0, vy in -1.0f64..=1.0,
            ox in 0.0f64..=24.0, oy in 0.0f64..=80.0,
            kind in 0u8..N_TYPES, other in 0u8..N_TYPES,
            flip in prop::sample::select(vec![1.0, -1.0]),
        ) {
            let a = Particle::new(kind, DVec2::new(x, y)).with_velocity(DVec2::new(vx, vy));
            let b = Particle::new(other, DVec2::new(ox, oy));
            let mut moved = a;
            moved.update(0, &[a, b], flip, &params(), bounds());

            prop_assert!(moved.vel.x.abs() <= params().max_velocity);
            prop_assert!(moved.vel.y.abs() <= params().max_velocity);
            prop_assert!(bounds().contains(moved.pos));
            prop_assert_eq!(moved.kind, kind);
        }
    }
}
