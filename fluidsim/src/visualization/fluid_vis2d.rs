use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::Circle;
use bevy::window::{PrimaryWindow, WindowResolution};

use crate::configuration::config::WindowConfig;
use crate::simulation::scenario::Scenario;
use crate::visualization::log_scenario_2d;

#[derive(Component)]
struct ParticleIndex(pub usize);

/// Segments used to tessellate each particle's circle
const CIRCLE_SEGMENTS: usize = 50;

const BACKGROUND: Color = Color::srgb(0.870, 0.905, 0.937);
const PARTICLE_COLOR: Color = Color::srgb(0.0, 0.0, 1.0);

pub fn run_2d(scenario: Scenario, window: &WindowConfig) -> AppExit {
    App::new()
        .insert_resource(scenario)
        .insert_resource(ClearColor(BACKGROUND))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: window.title.clone(),
                resolution: WindowResolution::new(window.width as f32, window.height as f32),
                ..default()
            }),
            ..default()
        }))
        .add_systems(Startup, (log_scenario_2d, setup_particles_system))
        .add_systems(Update, (physics_step_system, sync_transforms_system).chain())
        .run()
}

/// Map a domain coordinate onto window pixels, the domain filling the window
/// on each axis independently
fn to_screen(p: f64, lo: f64, hi: f64, half_pixels: f32) -> f32 {
    let t = (p - lo) / (hi - lo); // 0..1 across the domain
    ((t * 2.0 - 1.0) as f32) * half_pixels
}

fn setup_particles_system(
    mut commands: Commands,
    scenario: Res<Scenario>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    // 2D camera
    commands.spawn(Camera2dBundle::default());

    let (half_w, half_h) = match windows.get_single() {
        Ok(w) => (0.5 * w.width(), 0.5 * w.height()),
        Err(e) => {
            warn!("no primary window at startup, particles not spawned: {e}");
            return;
        }
    };
    let p = &scenario.parameters;
    let span = (p.domain_max - p.domain_min) as f32;

    // All particles share one radius, so one mesh and one material
    let radius = scenario.store.iter().next().map_or(p.particle_radius, |b| b.radius);
    let radius_screen = (radius as f32) * 2.0 / span * half_w.min(half_h);
    let mesh = Mesh2dHandle(meshes.add(Circle::new(radius_screen).mesh().resolution(CIRCLE_SEGMENTS)));
    let material = materials.add(ColorMaterial::from(PARTICLE_COLOR));

    for (i, particle) in scenario.store.iter().enumerate() {
        let x = to_screen(particle.x.x, p.domain_min, p.domain_max, half_w);
        let y = to_screen(particle.x.y, p.domain_min, p.domain_max, half_h);

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: mesh.clone(),
                material: material.clone(),
                transform: Transform::from_xyz(x, y, 0.0),
                ..Default::default()
            },
            ParticleIndex(i),
        ));
    }
}

fn physics_step_system(mut scenario: ResMut<Scenario>) {
    scenario.step();
}

fn sync_transforms_system(
    scenario: Res<Scenario>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut query: Query<(&ParticleIndex, &mut Transform)>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let (half_w, half_h) = (0.5 * window.width(), 0.5 * window.height());
    let p = &scenario.parameters;

    for (ParticleIndex(i), mut transform) in &mut query {
        if let Some(b) = scenario.store.get(*i) {
            transform.translation.x = to_screen(b.x.x, p.domain_min, p.domain_max, half_w);
            transform.translation.y = to_screen(b.x.y, p.domain_min, p.domain_max, half_h);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    use crate::simulation::params::PlaneParams;
    use crate::simulation::states::{NVec2, Particle, PlaneStore};

    #[test]
    fn setup_without_a_window_spawns_no_particles() {
        let particle = Particle { x: NVec2::new(0.1, 0.2), v: NVec2::zeros(), radius: 0.02 };
        let store = PlaneStore::from_particles(vec![particle; 3]);

        let mut world = World::new();
        world.init_resource::<Assets<Mesh>>();
        world.init_resource::<Assets<ColorMaterial>>();
        world.insert_resource(Scenario::with_store(PlaneParams::default(), store));

        world.run_system_once(setup_particles_system);

        assert_eq!(world.query::<&ParticleIndex>().iter(&world).count(), 0);
        assert!(world.resource::<Assets<Mesh>>().is_empty());
    }
}
