//! Core state types for the particle simulation.
//!
//! Defines 2D and 3D particle structs and the fixed-size store that owns them:
//! - `Particle`  using `NVec2` (2d plane)
//! - `Particle3` using `NVec3` (3d bottle)
//! - `ParticleStore<P>` holding the particles plus the frame counter
//!
//! The store is built once and never grows or shrinks; callers get by-index
//! access and slices, never the backing `Vec`.

use nalgebra::{Vector2, Vector3};
use rand::Rng;

pub type NVec2 = Vector2<f64>;
pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: NVec2, // position
    pub v: NVec2, // velocity (per-frame displacement in the plane model)
    pub radius: f64, // render radius, unused by the physics
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle3 {
    pub x: NVec3, // 3d position
    pub v: NVec3, // 3d velocity
}

/// Fixed-size, exclusively owned collection of particles
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleStore<P> {
    particles: Vec<P>,
    frame: u64,
}

pub type PlaneStore = ParticleStore<Particle>;
pub type BottleStore = ParticleStore<Particle3>;

impl<P> ParticleStore<P> {
    /// Take ownership of an initial particle set. The count is fixed from here on
    pub fn from_particles(particles: Vec<P>) -> Self {
        Self { particles, frame: 0 }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&P> {
        self.particles.get(i)
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut P> {
        self.particles.get_mut(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, P> {
        self.particles.iter_mut()
    }

    pub fn as_slice(&self) -> &[P] {
        &self.particles
    }

    /// Mutable view; a slice cannot change the particle count
    pub fn as_mut_slice(&mut self) -> &mut [P] {
        &mut self.particles
    }

    /// Number of completed simulation steps
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub(crate) fn advance_frame(&mut self) {
        self.frame += 1;
    }
}

impl PlaneStore {
    /// Uniform random particles: position in [-half_extent, half_extent]^2, velocity in
    /// [-max_speed, max_speed]^2, all sharing `radius`
    pub fn random_plane<R: Rng>(rng: &mut R, n: usize, half_extent: f64, max_speed: f64, radius: f64) -> Self {
        let particles = (0..n)
            .map(|_| {
                // draw order is part of the seed contract: x, y, vx, vy
                let x = rng.gen_range(-half_extent..=half_extent);
                let y = rng.gen_range(-half_extent..=half_extent);
                let vx = rng.gen_range(-max_speed..=max_speed);
                let vy = rng.gen_range(-max_speed..=max_speed);
                Particle {
                    x: NVec2::new(x, y),
                    v: NVec2::new(vx, vy),
                    radius,
                }
            })
            .collect();
        Self::from_particles(particles)
    }

    /// Sum of 1/2 |v|^2 over all particles (unit mass)
    pub fn kinetic_energy(&self) -> f64 {
        self.iter().map(|p| 0.5 * p.v.norm_squared()).sum()
    }

    /// Axis-aligned bounding box of all positions, `None` when empty
    pub fn bounds(&self) -> Option<(NVec2, NVec2)> {
        let first = self.particles.first()?;
        let init = (first.x, first.x);
        Some(self.iter().fold(init, |(lo, hi), p| (lo.inf(&p.x), hi.sup(&p.x))))
    }
}

impl BottleStore {
    /// Particles spread over the cylinder's bounding box, all starting with
    /// the same `initial_velocity`
    pub fn random_bottle<R: Rng>(rng: &mut R, n: usize, radius: f64, height: f64, initial_velocity: NVec3) -> Self {
        let half_h = 0.5 * height;
        let particles = (0..n)
            .map(|_| {
                let x = rng.gen_range(-radius..=radius);
                let y = rng.gen_range(-half_h..=half_h);
                let z = rng.gen_range(-radius..=radius);
                Particle3 {
                    x: NVec3::new(x, y, z),
                    v: initial_velocity,
                }
            })
            .collect();
        Self::from_particles(particles)
    }

    /// Sum of 1/2 |v|^2 over all particles (unit mass)
    pub fn kinetic_energy(&self) -> f64 {
        self.iter().map(|p| 0.5 * p.v.norm_squared()).sum()
    }

    /// Axis-aligned bounding box of all positions, `None` when empty
    pub fn bounds(&self) -> Option<(NVec3, NVec3)> {
        let first = self.particles.first()?;
        let init = (first.x, first.x);
        Some(self.iter().fold(init, |(lo, hi), p| (lo.inf(&p.x), hi.sup(&p.x))))
    }
}
