use std::time::Instant;

use crate::simulation::boundary::{BottleBoundary, WrapBoundary};
use crate::simulation::forces::{ForceSet, NeighborPressure, PairForce};
use crate::simulation::integrator::{bottle_step, plane_step};
use crate::simulation::params::{BottleParams, PlaneParams};
use crate::simulation::states::{BottleStore, NVec2, NVec3, Particle, Particle3, PlaneStore};

/// Helper to build a deterministic plane store of size `n`
fn make_plane(n: usize) -> PlaneStore {
    let particles = (0..n)
        .map(|i| {
            let i_f = i as f64;
            // deterministic positions, no rand needed
            Particle {
                x: NVec2::new((i_f * 0.37).sin(), (i_f * 0.13).cos()),
                v: NVec2::zeros(),
                radius: 0.02,
            }
        })
        .collect();
    PlaneStore::from_particles(particles)
}

/// Helper to build a deterministic bottle store of size `n`
fn make_bottle(n: usize) -> BottleStore {
    let particles = (0..n)
        .map(|i| {
            let i_f = i as f64;
            Particle3 {
                x: NVec3::new(
                    (i_f * 0.37).sin() * 0.5,
                    (i_f * 0.13).cos() * 0.75,
                    (i_f * 0.07).sin() * 0.5,
                ),
                v: NVec3::new(0.0, -0.01, 0.0),
            }
        })
        .collect();
    BottleStore::from_particles(particles)
}

/// Time the O(n^2) neighbour force pass on its own and a full plane step
pub fn bench_pressure_2d() {
    let ns = [100, 200, 400, 800, 1600, 3200];
    let params = PlaneParams::default();

    for n in ns {
        let store = make_plane(n);
        let mut out = vec![NVec2::zeros(); n];

        let pressure = NeighborPressure {
            interaction_radius: params.interaction_radius,
            pressure_strength: params.pressure_strength,
            min_separation: params.min_separation,
        };

        // Warm up
        pressure.force(&store, &mut out);

        let t0 = Instant::now();
        pressure.force(&store, &mut out);
        let dt_force = t0.elapsed().as_secs_f64();

        let forces = ForceSet::new().with(pressure);
        let boundary = WrapBoundary::from_params(&params);
        let mut stepped = store.clone();

        let t1 = Instant::now();
        plane_step(&mut stepped, &forces, &boundary, &params);
        let dt_step = t1.elapsed().as_secs_f64();

        println!("N = {n:5}, force pass = {:8.6} s, plane step = {:8.6} s", dt_force, dt_step);
    }
}

/// Time full bottle steps; cost is linear in N
pub fn bench_bottle_3d() {
    let ns = [1_000, 10_000, 100_000, 1_000_000];
    let steps = 10;
    let params = BottleParams::default();
    let boundary = BottleBoundary::from_params(&params);

    for n in ns {
        let mut store = make_bottle(n);

        // Warm-up
        bottle_step(&mut store, &boundary, &params);

        let t0 = Instant::now();
        for _ in 0..steps {
            bottle_step(&mut store, &boundary, &params);
        }
        let per_step = t0.elapsed().as_secs_f64() / steps as f64;

        println!("N = {n:7}, bottle step = {:8.6} s", per_step);
    }
}
