//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces runtime bundles
//! (`Scenario` for the 2D plane, `Scenario3D` for the 3D bottle) containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`PlaneParams` / `BottleParams`)
//! - the particle store, seeded from a `StdRng`
//! - the boundary policy and, for 2D, the active force set
//!
//! These scenarios are inserted into Bevy as `Resource`s and stepped once per
//! frame by the visualization or headless runners

use bevy::log::debug;
use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::configuration::config::{ConfigError, ScenarioConfig};
use crate::simulation::boundary::{BottleBoundary, WrapBoundary};
use crate::simulation::engine::Engine;
use crate::simulation::forces::{ForceSet, NeighborPressure};
use crate::simulation::impulse::{ImpulseInjector, PendingPresses, PointerPress};
use crate::simulation::integrator::{bottle_step, plane_step};
use crate::simulation::params::{BottleParams, ImpulseParams, PlaneParams};
use crate::simulation::states::{BottleStore, PlaneStore};

/// Bevy resource representing a fully-initialized 2D plane scenario
#[derive(Resource)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: PlaneParams,
    pub store: PlaneStore,
    pub forces: ForceSet,
    pub boundary: WrapBoundary,
}

impl Scenario {
    pub fn build_scenario(cfg: &ScenarioConfig) -> Result<Self, ConfigError> {
        let parameters = cfg.plane_section()?.to_params();
        let engine = Engine::from_config(&cfg.engine);

        // Particles: uniform over the domain, small random seed velocity
        let mut rng = StdRng::seed_from_u64(engine.seed);
        let half_extent = 0.5 * (parameters.domain_max - parameters.domain_min);
        let centre = 0.5 * (parameters.domain_max + parameters.domain_min);
        let mut store = PlaneStore::random_plane(
            &mut rng,
            parameters.num_particles,
            half_extent,
            parameters.initial_speed,
            parameters.particle_radius,
        );
        if centre != 0.0 {
            for p in store.iter_mut() {
                p.x.add_scalar_mut(centre);
            }
        }

        let mut scenario = Self::with_store(parameters, store);
        scenario.engine = engine;
        Ok(scenario)
    }

    /// Wrap an explicit particle set with the given parameters
    pub fn with_store(parameters: PlaneParams, store: PlaneStore) -> Self {
        // Forces: construct a ForceSet and register the neighbour term
        let forces = ForceSet::new().with(NeighborPressure {
            interaction_radius: parameters.interaction_radius,
            pressure_strength: parameters.pressure_strength,
            min_separation: parameters.min_separation,
        });
        let boundary = WrapBoundary::from_params(&parameters);

        Self {
            engine: Engine { dimension: false, seed: 0 },
            parameters,
            store,
            forces,
            boundary,
        }
    }

    /// Advance one frame
    pub fn step(&mut self) {
        let Scenario {
            store,
            forces,
            boundary,
            parameters,
            ..
        } = self;
        plane_step(store, forces, boundary, parameters);
    }

    pub fn run_frames(&mut self, frames: u64) {
        for _ in 0..frames {
            self.step();
        }
    }
}

// =========================================================================================
// 3d stuff below
// =========================================================================================

/// Bevy resource representing a fully-initialized 3D bottle scenario
///
/// Pointer presses are queued with [`Scenario3D::queue_press`] and applied
/// at the start of the next [`Scenario3D::step`], on the same thread as the
/// integration
#[derive(Resource)]
pub struct Scenario3D {
    pub engine: Engine,
    pub parameters: BottleParams,
    pub store: BottleStore,
    pub boundary: BottleBoundary,
    pub impulse: ImpulseInjector,
    pub pending: PendingPresses,
}

impl Scenario3D {
    pub fn build_scenario_3d(cfg: &ScenarioConfig) -> Result<Self, ConfigError> {
        let bottle = cfg.bottle_section()?;
        let parameters = bottle.to_params();
        let impulse = bottle.to_impulse_params();
        let engine = Engine::from_config(&cfg.engine);

        let mut rng = StdRng::seed_from_u64(engine.seed);
        let store = BottleStore::random_bottle(
            &mut rng,
            parameters.num_particles,
            parameters.bottle_radius,
            parameters.bottle_height,
            parameters.initial_velocity,
        );

        let mut scenario = Self::with_store(parameters, impulse, store);
        scenario.engine = engine;
        Ok(scenario)
    }

    /// Wrap an explicit particle set with the given parameters
    pub fn with_store(parameters: BottleParams, impulse: ImpulseParams, store: BottleStore) -> Self {
        Self {
            engine: Engine { dimension: true, seed: 0 },
            boundary: BottleBoundary::from_params(&parameters),
            impulse: ImpulseInjector::from_params(&impulse),
            parameters,
            store,
            pending: PendingPresses::default(),
        }
    }

    /// Queue a pointer press for the next step
    pub fn queue_press(&mut self, press: PointerPress) {
        self.pending.push(press);
    }

    /// Apply queued presses, then advance one frame
    pub fn step(&mut self) {
        let Scenario3D {
            store,
            boundary,
            impulse,
            pending,
            parameters,
            ..
        } = self;

        for press in pending.drain() {
            let touched = impulse.apply(store, &press);
            debug!("impulse at ({:.1}, {:.1}) touched {} particles", press.px, press.py, touched);
        }

        bottle_step(store, boundary, parameters);
    }

    pub fn run_frames(&mut self, frames: u64) {
        for _ in 0..frames {
            self.step();
        }
    }
}
