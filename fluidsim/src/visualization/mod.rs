//! Bevy front ends: the windowed viewers and the headless runner

use bevy::prelude::*;

use crate::simulation::scenario::{Scenario, Scenario3D};

pub mod fluid_vis2d;
pub mod fluid_vis3d;
pub mod headless;

/// Startup system shared by the 2D runners
pub(crate) fn log_scenario_2d(scenario: Res<Scenario>) {
    let p = &scenario.parameters;
    info!(
        "plane scenario: {} particles, seed {}, interaction radius {}, pressure {}, viscosity {}",
        scenario.store.len(), scenario.engine.seed, p.interaction_radius, p.pressure_strength, p.viscosity
    );
}

/// Startup system shared by the 3D runners
pub(crate) fn log_scenario_3d(scenario: Res<Scenario3D>) {
    let p = &scenario.parameters;
    info!(
        "bottle scenario: {} particles, seed {}, radius {}, height {}, gravity {}, damping {}",
        scenario.store.len(), scenario.engine.seed, p.bottle_radius, p.bottle_height, p.gravity_accel, p.damping
    );
}
