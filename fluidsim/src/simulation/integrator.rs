//! Fixed-step frame integrators
//!
//! One call advances the store by exactly one frame. There is no `dt`: both
//! models treat velocity as displacement per frame.
//!
//! Plane (2D):  drift -> wrap -> velocity reset -> forces -> viscosity
//! Bottle (3D): gravity -> damping -> drift -> wall/floor

use super::boundary::{BottleBoundary, WrapBoundary};
use super::forces::{apply_viscosity, ForceSet};
use super::params::{BottleParams, PlaneParams};
use super::states::{BottleStore, NVec2, PlaneStore};

/// Drift every particle by its velocity, wrap, and zero the velocity
/// Afterwards the velocity field holds nothing until the next force pass
pub fn drift_and_reset(store: &mut PlaneStore, boundary: &WrapBoundary) {
    for p in store.iter_mut() {
        // x_n+1 = x_n + v_n
        p.x += p.v;
        boundary.apply(p);
        p.v = NVec2::zeros();
    }
}

/// Advance the 2D plane by one frame
///
/// Positions move by the displacement computed at the end of the previous
/// frame (or the seed velocity on the first frame). The new displacement is
/// then computed from the post-wrap positions and left in `v`.
pub fn plane_step(store: &mut PlaneStore, forces: &ForceSet, boundary: &WrapBoundary, params: &PlaneParams) {
    let n = store.len();
    if n == 0 { // no particles, nothing to do
        store.advance_frame();
        return;
    }

    drift_and_reset(store, boundary);

    // Forces are taken from one consistent snapshot of positions before
    // any velocity is touched
    let mut f = vec![NVec2::zeros(); n];
    forces.accumulate_forces(&*store, &mut f);

    apply_viscosity(store, &f, params.viscosity);

    store.advance_frame();
}

// =========================================================================================
// 3d stuff below
// =========================================================================================

/// Gravity, damping and drift for every particle, no containment
pub fn bottle_drift(store: &mut BottleStore, params: &BottleParams) {
    for p in store.iter_mut() {
        // momentum carries over: v_n+1 = (v_n + g) * damping
        p.v.y += params.gravity_accel;
        p.v *= params.damping;
        p.x += p.v;
    }
}

/// Advance the 3D bottle by one frame: integrate, then wall and floor
pub fn bottle_step(store: &mut BottleStore, boundary: &BottleBoundary, params: &BottleParams) {
    bottle_drift(store, params);
    boundary.apply_all(store);
    store.advance_frame();
}
