use fluidsim::simulation::states::{Particle, Particle3, PlaneStore, BottleStore, NVec2, NVec3};
use fluidsim::simulation::params::{PlaneParams, BottleParams, ImpulseParams};
use fluidsim::simulation::forces::{ForceSet, NeighborPressure};
use fluidsim::simulation::boundary::{WrapBoundary, BottleBoundary};
use fluidsim::simulation::impulse::{ImpulseInjector, PointerPress};
use fluidsim::simulation::scenario::{Scenario, Scenario3D};
use fluidsim::configuration::config::{ConfigError, EngineConfig, PlaneConfig, BottleConfig, ScenarioConfig};

/// Build a plane store from raw positions, all at rest
pub fn plane_store(points: &[(f64, f64)]) -> PlaneStore {
    let particles = points
        .iter()
        .map(|&(x, y)| Particle {
            x: NVec2::new(x, y),
            v: NVec2::zeros(),
            radius: 0.02,
        })
        .collect();
    PlaneStore::from_particles(particles)
}

/// Build a bottle store from (position, velocity) pairs
pub fn bottle_store(particles: &[([f64; 3], [f64; 3])]) -> BottleStore {
    let particles = particles
        .iter()
        .map(|&(x, v)| Particle3 {
            x: x.into(),
            v: v.into(),
        })
        .collect();
    BottleStore::from_particles(particles)
}

/// Neighbour term with the stock constants
pub fn pressure_set(p: &PlaneParams) -> ForceSet {
    ForceSet::new().with(NeighborPressure {
        interaction_radius: p.interaction_radius,
        pressure_strength: p.pressure_strength,
        min_separation: p.min_separation,
    })
}

pub fn plane_config(seed: u64) -> ScenarioConfig {
    ScenarioConfig {
        engine: EngineConfig { dimension: false, seed: Some(seed) },
        plane: Some(PlaneConfig::default()),
        ..Default::default()
    }
}

pub fn bottle_config(seed: u64, n: usize) -> ScenarioConfig {
    ScenarioConfig {
        engine: EngineConfig { dimension: true, seed: Some(seed) },
        bottle: Some(BottleConfig { num_particles: n, ..Default::default() }),
        ..Default::default()
    }
}

fn approx(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

// ==================================================================================
// Store tests
// ==================================================================================

#[test]
fn plane_initial_state_is_within_configured_ranges() {
    let scenario = Scenario::build_scenario(&plane_config(1)).unwrap();
    assert_eq!(scenario.store.len(), 100);
    for p in scenario.store.iter() {
        assert!(p.x.x >= -1.0 && p.x.x <= 1.0);
        assert!(p.x.y >= -1.0 && p.x.y <= 1.0);
        assert!(p.v.x.abs() <= 0.01 && p.v.y.abs() <= 0.01);
        assert_eq!(p.radius, 0.02);
    }
}

#[test]
fn bottle_initial_state_is_within_configured_ranges() {
    let scenario = Scenario3D::build_scenario_3d(&bottle_config(1, 2_000)).unwrap();
    assert_eq!(scenario.store.len(), 2_000);
    for p in scenario.store.iter() {
        assert!(p.x.x.abs() <= 0.5 && p.x.z.abs() <= 0.5);
        assert!(p.x.y.abs() <= 0.75);
        assert_eq!(p.v, NVec3::new(0.0, -0.01, 0.0));
    }
}

#[test]
fn particle_count_never_changes() {
    let mut scenario = Scenario::build_scenario(&plane_config(3)).unwrap();
    scenario.run_frames(25);
    assert_eq!(scenario.store.len(), 100);
    assert_eq!(scenario.store.frame(), 25);

    let mut bottle = Scenario3D::build_scenario_3d(&bottle_config(3, 300)).unwrap();
    bottle.queue_press(PointerPress::new(400.0, 300.0, 800.0, 600.0));
    bottle.run_frames(25);
    assert_eq!(bottle.store.len(), 300);
    assert_eq!(bottle.store.frame(), 25);
}

#[test]
fn building_the_wrong_variant_reports_missing_section() {
    let err = Scenario3D::build_scenario_3d(&plane_config(1)).err().unwrap();
    assert!(matches!(err, ConfigError::MissingSection { section: "bottle", .. }));
}

// ==================================================================================
// Force model tests
// ==================================================================================

#[test]
fn close_pair_feels_equal_and_opposite_force() {
    let p = PlaneParams::default();
    let store = plane_store(&[(0.0, 0.0), (0.05, 0.0)]);
    let forces = pressure_set(&p);

    let mut f = vec![NVec2::zeros(); 2];
    forces.accumulate_forces(&store, &mut f);

    // force on i points from i toward j with magnitude pressure_strength
    assert!(approx(f[0].x, 0.01, 1e-15) && f[0].y == 0.0, "got {:?}", f[0]);
    assert!(approx(f[1].x, -0.01, 1e-15) && f[1].y == 0.0, "got {:?}", f[1]);
}

#[test]
fn pair_outside_interaction_radius_feels_nothing() {
    let p = PlaneParams::default();
    let store = plane_store(&[(0.0, 0.0), (0.2, 0.0), (0.0, 0.1)]);
    let forces = pressure_set(&p);

    let mut f = vec![NVec2::zeros(); 3];
    forces.accumulate_forces(&store, &mut f);

    // 0.1 is not strictly inside the radius either
    for fi in f {
        assert_eq!(fi, NVec2::zeros());
    }
}

#[test]
fn close_pair_separation_changes_by_two_viscous_displacements() {
    let p = PlaneParams::default();
    let mut scenario = Scenario::with_store(p.clone(), plane_store(&[(0.0, 0.0), (0.05, 0.0)]));

    scenario.step();
    // positions untouched on the first frame (both at rest), displacement
    // for the next frame is -viscosity * force
    let expected = p.viscosity * p.pressure_strength;
    let v0 = scenario.store.get(0).unwrap().v;
    let v1 = scenario.store.get(1).unwrap().v;
    assert!(approx(v0.norm(), expected, 1e-18));
    assert!(approx(v1.norm(), expected, 1e-18));
    assert!(approx(v0.x, -expected, 1e-18) && approx(v1.x, expected, 1e-18));

    scenario.step();
    let x0 = scenario.store.get(0).unwrap().x;
    let x1 = scenario.store.get(1).unwrap().x;
    let separation = (x1 - x0).norm();
    assert!(approx(separation, 0.05 + 2.0 * expected, 1e-12), "separation {separation}");
}

#[test]
fn coincident_particles_stay_finite() {
    let p = PlaneParams::default();
    let mut scenario = Scenario::with_store(p, plane_store(&[(0.3, 0.3), (0.3, 0.3), (0.35, 0.3)]));

    scenario.run_frames(10);

    for q in scenario.store.iter() {
        assert!(q.x.iter().all(|c| c.is_finite()), "position {:?}", q.x);
        assert!(q.v.iter().all(|c| c.is_finite()), "velocity {:?}", q.v);
    }
    // the coincident pair only feels the third particle, identically
    assert_eq!(scenario.store.get(0).unwrap().x, scenario.store.get(1).unwrap().x);
}

#[test]
fn coincident_pair_is_skipped_even_without_separation_guard() {
    let p = PlaneParams { min_separation: 0.0, ..Default::default() };
    let mut scenario = Scenario::with_store(p, plane_store(&[(0.3, 0.3), (0.3, 0.3)]));

    scenario.step();

    for q in scenario.store.iter() {
        assert_eq!(q.v, NVec2::zeros());
        assert_eq!(q.x, NVec2::new(0.3, 0.3));
    }
}

// ==================================================================================
// Integrator and boundary tests
// ==================================================================================

#[test]
fn plane_velocity_is_consumed_each_frame() {
    let mut store = plane_store(&[(0.0, 0.0)]);
    store.get_mut(0).unwrap().v = NVec2::new(0.01, -0.02);
    let mut scenario = Scenario::with_store(PlaneParams::default(), store);

    scenario.step();
    let q = scenario.store.get(0).unwrap();
    assert_eq!(q.x, NVec2::new(0.01, -0.02));
    assert_eq!(q.v, NVec2::zeros());

    // no neighbours, no displacement
    scenario.step();
    assert_eq!(scenario.store.get(0).unwrap().x, NVec2::new(0.01, -0.02));
}

#[test]
fn wrap_uses_strict_comparisons() {
    let w = WrapBoundary::default();
    assert_eq!(w.wrap(1.0), 1.0);
    assert_eq!(w.wrap(-1.0), -1.0);
    assert_eq!(w.wrap(1.0 + 1e-9), -1.0);
    assert_eq!(w.wrap(-1.5), 1.0);
    assert_eq!(w.wrap(0.25), 0.25);
}

#[test]
fn plane_positions_stay_in_domain_every_frame() {
    let mut scenario = Scenario::build_scenario(&plane_config(11)).unwrap();
    // speed things up so wrapping actually happens
    for q in scenario.store.iter_mut() {
        q.v *= 20.0;
    }

    for _ in 0..200 {
        scenario.step();
        for q in scenario.store.iter() {
            assert!(q.x.x >= -1.0 && q.x.x <= 1.0, "x out of domain: {}", q.x.x);
            assert!(q.x.y >= -1.0 && q.x.y <= 1.0, "y out of domain: {}", q.x.y);
        }
    }
}

#[test]
fn bottle_step_applies_gravity_then_damping() {
    let params = BottleParams::default();
    let store = bottle_store(&[([0.0, 0.0, 0.0], [0.0, 0.0, 0.0])]);
    let mut scenario = Scenario3D::with_store(params, ImpulseParams::default(), store);

    scenario.step();
    let q = scenario.store.get(0).unwrap();
    let vy = -0.001 * 0.98;
    assert!(approx(q.v.y, vy, 1e-18));
    assert!(approx(q.x.y, vy, 1e-18));

    scenario.step();
    let q = scenario.store.get(0).unwrap();
    let vy2 = (vy - 0.001) * 0.98;
    assert!(approx(q.v.y, vy2, 1e-15));
    assert!(approx(q.x.y, vy + vy2, 1e-15));
}

#[test]
fn wall_reflects_head_on_velocity() {
    let b = BottleBoundary::from_params(&BottleParams::default());
    let mut q = Particle3 {
        x: NVec3::new(0.6, 0.0, 0.0),
        v: NVec3::new(0.1, 0.0, 0.0),
    };

    b.apply(&mut q);

    assert!(approx(q.v.x, -0.1, 1e-15) && q.v.y == 0.0 && q.v.z == 0.0, "got {:?}", q.v);
    // position is not pulled back inside
    assert_eq!(q.x, NVec3::new(0.6, 0.0, 0.0));
}

#[test]
fn wall_reflection_negates_normal_component_only() {
    let b = BottleBoundary::from_params(&BottleParams::default());
    let cases = [
        ([0.4, 0.1, 0.4], [0.03, -0.02, 0.01]),
        ([-0.5, 0.0, 0.3], [-0.01, 0.05, 0.02]),
        ([0.0, -0.2, -0.7], [0.02, 0.0, -0.04]),
    ];

    for (x, v) in cases {
        let mut q = Particle3 { x: x.into(), v: v.into() };
        let r = (q.x.x * q.x.x + q.x.z * q.x.z).sqrt();
        assert!(r > 0.5);
        let n = NVec3::new(q.x.x, 0.0, q.x.z) / r;
        let before = q.v;

        b.apply(&mut q);

        assert!(approx(q.v.dot(&n), -before.dot(&n), 1e-15));
        assert_eq!(q.v.y, before.y);
        // tangential part unchanged
        let t_before = before - before.dot(&n) * n;
        let t_after = q.v - q.v.dot(&n) * n;
        assert!((t_before - t_after).norm() < 1e-15);
    }
}

#[test]
fn inside_the_wall_velocity_is_untouched() {
    let b = BottleBoundary::from_params(&BottleParams::default());
    let mut q = Particle3 {
        x: NVec3::new(0.5, 0.0, 0.0),
        v: NVec3::new(0.1, 0.0, 0.0),
    };
    b.apply(&mut q);
    assert_eq!(q.v, NVec3::new(0.1, 0.0, 0.0));
}

#[test]
fn floor_clamps_and_bounces_with_restitution() {
    let b = BottleBoundary::from_params(&BottleParams::default());
    let mut q = Particle3 {
        x: NVec3::new(0.0, -0.8, 0.0),
        v: NVec3::new(0.0, -0.02, 0.0),
    };

    b.apply(&mut q);

    assert_eq!(q.x.y, -0.75);
    assert!(approx(q.v.y, 0.01, 1e-18));
}

#[test]
fn no_particle_below_floor_at_frame_start() {
    let mut scenario = Scenario3D::build_scenario_3d(&bottle_config(5, 2_000)).unwrap();
    let floor = scenario.parameters.floor();

    for _ in 0..300 {
        for q in scenario.store.iter() {
            assert!(q.x.y >= floor, "below floor: {}", q.x.y);
        }
        scenario.step();
    }
}

// ==================================================================================
// Impulse tests
// ==================================================================================

#[test]
fn press_is_normalized_to_device_coordinates() {
    assert_eq!(PointerPress::new(400.0, 300.0, 800.0, 600.0).normalized(), NVec2::new(0.0, 0.0));
    assert_eq!(PointerPress::new(0.0, 0.0, 800.0, 600.0).normalized(), NVec2::new(-1.0, 1.0));
    assert_eq!(PointerPress::new(800.0, 600.0, 800.0, 600.0).normalized(), NVec2::new(1.0, -1.0));
}

#[test]
fn impulse_only_touches_particles_strictly_inside_radius() {
    let injector = ImpulseInjector::from_params(&ImpulseParams::default());
    let mut store = bottle_store(&[
        ([0.1, 0.0, 0.3], [0.0, 0.0, 0.0]),  // inside, half way out
        ([0.2, 0.0, 0.0], [0.0, 0.0, 0.0]),  // exactly on the radius
        ([0.0, -0.3, 0.0], [0.0, 0.0, 0.0]), // outside
        ([0.0, 0.0, -0.4], [0.0, 0.0, 0.0]), // right under the press, z ignored
    ]);

    let touched = injector.apply_at(&mut store, NVec2::zeros());

    assert_eq!(touched, 2);
    // magnitude (1 - 0.1 / 0.2) * 0.2 = 0.1 along -x
    let v0 = store.get(0).unwrap().v;
    assert!(approx(v0.x, -0.1, 1e-15) && v0.y == 0.0 && v0.z == 0.0, "got {:?}", v0);
    assert_eq!(store.get(1).unwrap().v, NVec3::zeros());
    assert_eq!(store.get(2).unwrap().v, NVec3::zeros());
    // zero distance gives no direction and no NaN
    assert_eq!(store.get(3).unwrap().v, NVec3::zeros());
}

#[test]
fn press_on_zero_sized_viewport_touches_nothing() {
    let injector = ImpulseInjector::from_params(&ImpulseParams::default());
    let mut store = bottle_store(&[([0.9, 0.5, 0.0], [0.01, -0.02, 0.0])]);

    let touched = injector.apply(&mut store, &PointerPress::new(0.0, 0.0, 0.0, 0.0));

    assert_eq!(touched, 0);
    assert_eq!(store.get(0).unwrap().v, NVec3::new(0.01, -0.02, 0.0));
}

#[test]
fn queued_press_is_applied_on_next_step() {
    let store = bottle_store(&[([0.1, 0.0, 0.0], [0.0, 0.0, 0.0])]);
    let mut scenario = Scenario3D::with_store(BottleParams::default(), ImpulseParams::default(), store);

    scenario.queue_press(PointerPress::new(400.0, 300.0, 800.0, 600.0));
    assert_eq!(scenario.pending.len(), 1);
    assert_eq!(scenario.store.get(0).unwrap().v, NVec3::zeros());

    scenario.step();
    assert!(scenario.pending.is_empty());

    let q = scenario.store.get(0).unwrap();
    assert!(approx(q.v.x, -0.1 * 0.98, 1e-15));
    assert!(approx(q.v.y, -0.001 * 0.98, 1e-18));
    assert!(approx(q.x.x, 0.1 - 0.1 * 0.98, 1e-15));

    // one shot: the next step only damps
    scenario.step();
    let q = scenario.store.get(0).unwrap();
    assert!(approx(q.v.x, -0.1 * 0.98 * 0.98, 1e-15));
}

// ==================================================================================
// Determinism tests
// ==================================================================================

#[test]
fn plane_runs_are_reproducible_from_seed() {
    let mut a = Scenario::build_scenario(&plane_config(42)).unwrap();
    let mut b = Scenario::build_scenario(&plane_config(42)).unwrap();
    assert_eq!(a.store, b.store);

    a.run_frames(100);
    b.run_frames(100);
    assert_eq!(a.store, b.store);

    let c = Scenario::build_scenario(&plane_config(43)).unwrap();
    assert_ne!(c.store.as_slice(), Scenario::build_scenario(&plane_config(42)).unwrap().store.as_slice());
}

#[test]
fn bottle_runs_are_reproducible_from_seed() {
    let mut a = Scenario3D::build_scenario_3d(&bottle_config(9, 500)).unwrap();
    let mut b = Scenario3D::build_scenario_3d(&bottle_config(9, 500)).unwrap();

    for frame in 0..100 {
        if frame % 25 == 0 {
            let press = PointerPress::new(380.0, 320.0, 800.0, 600.0);
            a.queue_press(press);
            b.queue_press(press);
        }
        a.step();
        b.step();
    }
    assert_eq!(a.store, b.store);
}

#[test]
fn engine_keeps_the_seed_the_scenario_was_built_from() {
    let plane = Scenario::build_scenario(&plane_config(42)).unwrap();
    assert_eq!(plane.engine.seed, 42);
    assert!(!plane.engine.dimension);

    let bottle = Scenario3D::build_scenario_3d(&bottle_config(7, 10)).unwrap();
    assert_eq!(bottle.engine.seed, 7);
    assert!(bottle.engine.dimension);
}

#[test]
fn kinetic_energy_and_bounds_report_state() {
    let mut store = plane_store(&[(-0.5, 0.25), (0.75, -0.1)]);
    store.get_mut(0).unwrap().v = NVec2::new(0.3, 0.4);
    assert!(approx(store.kinetic_energy(), 0.125, 1e-15));

    let (lo, hi) = store.bounds().unwrap();
    assert_eq!(lo, NVec2::new(-0.5, -0.1));
    assert_eq!(hi, NVec2::new(0.75, 0.25));

    assert!(PlaneStore::from_particles(Vec::new()).bounds().is_none());
}
