use bevy::prelude::*;
use bevy::math::primitives::Sphere;
use bevy::render::camera::ScalingMode;
use bevy::window::{PrimaryWindow, WindowResolution};

use crate::configuration::config::WindowConfig;
use crate::simulation::impulse::PointerPress;
use crate::simulation::scenario::Scenario3D;
use crate::visualization::log_scenario_3d;

/// Component tagging each point with its index into Scenario3D.store
#[derive(Component)]
struct ParticleIndex3(pub usize);

/// World-space radius of the sphere drawn for each particle
const POINT_RADIUS: f32 = 0.004;

/// Distance of the camera from the origin along +Z
const CAMERA_DISTANCE: f32 = 5.0;

const PARTICLE_COLOR: Color = Color::srgb(0.0, 0.0, 1.0);

/// Open the 3D viewer and run until the window closes
pub fn run_3d(scenario: Scenario3D, window: &WindowConfig) -> AppExit {
    App::new()
        .insert_resource(scenario)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: window.title.clone(),
                resolution: WindowResolution::new(window.width as f32, window.height as f32),
                ..default()
            }),
            ..default()
        }))
        .add_systems(Startup, (log_scenario_3d, setup_3d))
        // input -> physics -> draw, one after the other every frame
        .add_systems(Update, (pointer_input_3d, physics_step_3d, sync_transforms_3d).chain())
        .run()
}

/// Startup system: spawn the camera and one point per particle
fn setup_3d(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scenario: Res<Scenario3D>,
) {
    // Orthographic camera looking down -Z. The visible x/y range is exactly
    // [-1, 1], the same space pointer presses are normalized into
    commands.spawn(Camera3dBundle {
        projection: Projection::Orthographic(OrthographicProjection {
            scaling_mode: ScalingMode::Fixed { width: 2.0, height: 2.0 },
            ..Default::default()
        }),
        transform: Transform::from_xyz(0.0, 0.0, CAMERA_DISTANCE)
            .looking_at(Vec3::ZERO, Vec3::Y),
        ..Default::default()
    });

    let mesh = meshes.add(Sphere::new(POINT_RADIUS).mesh().uv(6, 4));
    let material = materials.add(StandardMaterial {
        base_color: PARTICLE_COLOR,
        unlit: true,
        ..Default::default()
    });

    for (i, b) in scenario.store.iter().enumerate() {
        commands.spawn((
            PbrBundle {
                mesh: mesh.clone(),
                material: material.clone(),
                transform: Transform::from_xyz(b.x.x as f32, b.x.y as f32, b.x.z as f32),
                ..Default::default()
            },
            ParticleIndex3(i),
        ));
    }
}

/// Left clicks become queued presses in window pixels (origin top-left)
fn pointer_input_3d(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut scenario: ResMut<Scenario3D>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    // a minimized window has no viewport to normalize against
    if window.width() <= 0.0 || window.height() <= 0.0 {
        debug!("ignoring press on a zero-sized window");
        return;
    }
    if let Some(cursor) = window.cursor_position() {
        scenario.queue_press(PointerPress::new(
            cursor.x as f64,
            cursor.y as f64,
            window.width() as f64,
            window.height() as f64,
        ));
    }
}

/// Per-frame physics update for the 3D scenario
fn physics_step_3d(mut scenario: ResMut<Scenario3D>) {
    scenario.step();
}

fn sync_transforms_3d(scenario: Res<Scenario3D>, mut query: Query<(&ParticleIndex3, &mut Transform)>) {
    for (ParticleIndex3(i), mut transform) in &mut query {
        if let Some(b) = scenario.store.get(*i) {
            transform.translation = Vec3::new(b.x.x as f32, b.x.y as f32, b.x.z as f32);
        }
    }
}
