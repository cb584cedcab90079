//! Domain containment applied after each integration step
//!
//! - [`WrapBoundary`]: 2D plane, each axis wraps to the opposite bound
//! - [`BottleBoundary`]: 3D cylinder around the y axis, the wall reflects
//!   horizontal velocity and the floor clamps with a restitution bounce

use crate::simulation::params::{BottleParams, PlaneParams};
use crate::simulation::states::{NVec3, Particle, Particle3, PlaneStore, BottleStore};

/// Toroidal wrap of the plane onto `[min, max]^2`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapBoundary {
    pub min: f64,
    pub max: f64,
}

impl WrapBoundary {
    pub fn from_params(params: &PlaneParams) -> Self {
        Self {
            min: params.domain_min,
            max: params.domain_max,
        }
    }

    /// Wrap one coordinate. Strict comparisons, so values sitting exactly on
    /// a bound stay where they are
    pub fn wrap(&self, p: f64) -> f64 {
        if p > self.max {
            self.min
        } else if p < self.min {
            self.max
        } else {
            p
        }
    }

    pub fn apply(&self, particle: &mut Particle) {
        particle.x.x = self.wrap(particle.x.x);
        particle.x.y = self.wrap(particle.x.y);
    }

    pub fn apply_all(&self, store: &mut PlaneStore) {
        for p in store.iter_mut() {
            self.apply(p);
        }
    }
}

impl Default for WrapBoundary {
    fn default() -> Self {
        Self { min: -1.0, max: 1.0 }
    }
}

/// Open-topped cylinder of `radius` around the y axis with its floor at
/// `-height / 2`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BottleBoundary {
    pub radius: f64,
    pub height: f64,
    pub restitution: f64,
}

impl BottleBoundary {
    pub fn from_params(params: &BottleParams) -> Self {
        Self {
            radius: params.bottle_radius,
            height: params.bottle_height,
            restitution: params.restitution,
        }
    }

    pub fn floor(&self) -> f64 {
        -0.5 * self.height
    }

    /// Wall reflection then floor clamp for a single particle
    ///
    /// Outside the wall only the velocity is mirrored about the outward
    /// normal; the position is left outside and the reflected velocity
    /// carries it back on the following frames.
    pub fn apply(&self, particle: &mut Particle3) {
        let (x, z) = (particle.x.x, particle.x.z);
        let r = (x * x + z * z).sqrt();

        if r > self.radius {
            // r > radius > 0, so the normal is well defined
            let n = NVec3::new(x, 0.0, z) / r;
            let v = particle.v;
            let reflected = v - 2.0 * v.dot(&n) * n;
            // n.y == 0 so reflected.y == v.y; only x and z are written back
            particle.v.x = reflected.x;
            particle.v.z = reflected.z;
        }

        let floor = self.floor();
        if particle.x.y < floor {
            particle.x.y = floor;
            particle.v.y *= -self.restitution;
        }
    }

    pub fn apply_all(&self, store: &mut BottleStore) {
        for p in store.iter_mut() {
            self.apply(p);
        }
    }
}
