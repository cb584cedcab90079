//! Numerical and physical parameters for the simulation
//!
//! `PlaneParams` holds the 2D pairwise model constants, `BottleParams` the
//! 3D container constants and `ImpulseParams` the pointer interaction.
//! The `Default` impls carry the stock values used when a scenario file
//! leaves a field out.

use super::states::NVec3;

#[derive(Debug, Clone, PartialEq)]
pub struct PlaneParams {
    pub num_particles: usize, // fixed particle count
    pub interaction_radius: f64, // pairs closer than this interact
    pub pressure_strength: f64, // per-neighbour force scale
    pub viscosity: f64, // force -> velocity factor
    pub particle_radius: f64, // render radius
    pub min_separation: f64, // pairs closer than this are skipped
    pub domain_min: f64, // wrap bounds, same on both axes
    pub domain_max: f64,
    pub initial_speed: f64, // initial velocity drawn from [-s, s]^2
}

impl Default for PlaneParams {
    fn default() -> Self {
        Self {
            num_particles: 100,
            interaction_radius: 0.1,
            pressure_strength: 0.01,
            viscosity: 0.01,
            particle_radius: 0.02,
            min_separation: 1e-12,
            domain_min: -1.0,
            domain_max: 1.0,
            initial_speed: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BottleParams {
    pub num_particles: usize, // fixed particle count
    pub bottle_radius: f64, // cylinder radius around the y axis
    pub bottle_height: f64, // floor sits at -height/2
    pub gravity_accel: f64, // added to v.y every frame
    pub damping: f64, // velocity multiplier every frame
    pub restitution: f64, // floor bounce factor
    pub initial_velocity: NVec3, // shared seed velocity
}

impl Default for BottleParams {
    fn default() -> Self {
        Self {
            num_particles: 10_000,
            bottle_radius: 0.5,
            bottle_height: 1.5,
            gravity_accel: -0.001,
            damping: 0.98,
            restitution: 0.5,
            initial_velocity: NVec3::new(0.0, -0.01, 0.0),
        }
    }
}

impl BottleParams {
    /// y coordinate of the container floor
    pub fn floor(&self) -> f64 {
        -0.5 * self.bottle_height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImpulseParams {
    pub radius: f64, // planar reach of a press, in normalized units
    pub strength: f64, // peak velocity change at the press point
}

impl Default for ImpulseParams {
    fn default() -> Self {
        Self {
            radius: 0.2,
            strength: 0.2,
        }
    }
}
