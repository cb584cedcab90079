//! Windowless runs
//!
//! Steps a scenario a fixed number of frames inside a `MinimalPlugins` app
//! with Bevy logging, then logs a summary and exits.

use bevy::app::AppExit;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use crate::simulation::scenario::{Scenario, Scenario3D};
use crate::visualization::{log_scenario_2d, log_scenario_3d};

/// Frames left before the app exits
#[derive(Resource)]
struct FrameBudget {
    remaining: u64,
}

pub fn run_headless_2d(scenario: Scenario, frames: u64) -> AppExit {
    App::new()
        .add_plugins((MinimalPlugins, LogPlugin::default()))
        .insert_resource(scenario)
        .insert_resource(FrameBudget { remaining: frames })
        .add_systems(Startup, log_scenario_2d)
        .add_systems(Update, headless_step_2d)
        .run()
}

pub fn run_headless_3d(scenario: Scenario3D, frames: u64) -> AppExit {
    App::new()
        .add_plugins((MinimalPlugins, LogPlugin::default()))
        .insert_resource(scenario)
        .insert_resource(FrameBudget { remaining: frames })
        .add_systems(Startup, log_scenario_3d)
        .add_systems(Update, headless_step_3d)
        .run()
}

fn headless_step_2d(mut scenario: ResMut<Scenario>, mut budget: ResMut<FrameBudget>, mut exit: EventWriter<AppExit>) {
    if budget.remaining > 0 {
        scenario.step();
        budget.remaining -= 1;
        return;
    }

    let store = &scenario.store;
    if let Some((lo, hi)) = store.bounds() {
        info!(
            "plane done after {} frames: bounds [{:.3}, {:.3}] x [{:.3}, {:.3}], kinetic energy {:.3e}",
            store.frame(), lo.x, hi.x, lo.y, hi.y, store.kinetic_energy()
        );
    }
    exit.send(AppExit::Success);
}

fn headless_step_3d(mut scenario: ResMut<Scenario3D>, mut budget: ResMut<FrameBudget>, mut exit: EventWriter<AppExit>) {
    if budget.remaining > 0 {
        scenario.step();
        budget.remaining -= 1;
        return;
    }

    let store = &scenario.store;
    if let Some((lo, hi)) = store.bounds() {
        let mean_speed = store.iter().map(|p| p.v.norm()).sum::<f64>() / store.len() as f64;
        info!(
            "bottle done after {} frames: y in [{:.3}, {:.3}], |x|,|z| <= {:.3}, mean speed {:.3e}",
            store.frame(),
            lo.y,
            hi.y,
            lo.x.abs().max(hi.x.abs()).max(lo.z.abs()).max(hi.z.abs()),
            mean_speed
        );
    }
    exit.send(AppExit::Success);
}
