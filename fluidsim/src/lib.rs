pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Particle, Particle3, ParticleStore, PlaneStore, BottleStore, NVec2, NVec3};
pub use simulation::params::{PlaneParams, BottleParams, ImpulseParams};
pub use simulation::forces::{PairForce, ForceSet, NeighborPressure, apply_viscosity};
pub use simulation::integrator::{plane_step, bottle_step};
pub use simulation::boundary::{WrapBoundary, BottleBoundary};
pub use simulation::impulse::{ImpulseInjector, PointerPress, PendingPresses};
pub use simulation::scenario::{Scenario, Scenario3D};

pub use configuration::config::{ConfigError, EngineConfig, PlaneConfig, BottleConfig, WindowConfig, ScenarioConfig};

pub use visualization::{fluid_vis2d::run_2d, fluid_vis3d::run_3d};
pub use visualization::headless::{run_headless_2d, run_headless_3d};

pub use benchmark::benchmark::{bench_pressure_2d, bench_bottle_3d};
