//! Force contributors for the 2D plane model
//!
//! Defines the pairwise force trait, a set that sums several terms into one
//! accumulator per particle, and the short-range pressure term used by the
//! plane scenario. Everything here is a direct O(n^2) sum.

use crate::simulation::states::{NVec2, PlaneStore};

/// Collection of 2D force terms
/// Each term implements [`PairForce`] and their contributions are summed
/// into a single force vector per particle
pub struct ForceSet {
    terms: Vec<Box<dyn PairForce + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: PairForce + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total forces for all particles in `store`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_forces(&self, store: &PlaneStore, out: &mut [NVec2]) {
        // Zero buffer
        for f in out.iter_mut() {
            *f = NVec2::zeros();
        }
        for term in &self.terms {
            term.force(store, out);
        }
    }
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for 2D force sources operating on a [`PlaneStore`]
/// Implementations add their contribution into `out[i]` for each particle
pub trait PairForce {
    fn force(&self, store: &PlaneStore, out: &mut [NVec2]);
}

/// Short-range neighbour term
///
/// Every neighbour j within `interaction_radius` of particle i adds
/// `pressure_strength` along the unit vector from i to j. Pairs closer than
/// `min_separation` have no usable direction and are skipped.
pub struct NeighborPressure {
    pub interaction_radius: f64,
    pub pressure_strength: f64,
    pub min_separation: f64,
}

impl PairForce for NeighborPressure {
    fn force(&self, store: &PlaneStore, out: &mut [NVec2]) {
        let particles = store.as_slice();
        let n = particles.len();

        // Ordered pairs: (i, j) only feeds particle i, (j, i) is its own visit
        for i in 0..n {
            let xi = particles[i].x;
            let mut acc = NVec2::zeros();

            for (j, pj) in particles.iter().enumerate() {
                if i == j {
                    continue;
                }
                // d points from i to j
                let d = pj.x - xi;
                let dist = d.norm();
                // coincident pairs are skipped whatever min_separation says
                if dist < self.interaction_radius && dist > 0.0 && dist >= self.min_separation {
                    acc += (d / dist) * self.pressure_strength;
                }
            }

            out[i] += acc;
        }
    }
}

/// Turn accumulated forces into velocity: `v_i -= viscosity * f_i`
pub fn apply_viscosity(store: &mut PlaneStore, forces: &[NVec2], viscosity: f64) {
    for (p, f) in store.iter_mut().zip(forces.iter()) {
        p.v -= viscosity * *f;
    }
}
