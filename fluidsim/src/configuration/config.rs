//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`] – variant selection and RNG seed
//! - [`PlaneConfig`]  – constants of the 2D pairwise model
//! - [`BottleConfig`] – constants of the 3D container and pointer impulse
//! - [`WindowConfig`] – title and size of the viewer window
//! - [`ScenarioConfig`] – top-level wrapper used to load a scenario from YAML
//!
//! Every numeric field is optional in the file and falls back to the stock
//! constants of the model.
//!
//! # YAML format
//! An example 2D scenario:
//!
//! ```yaml
//! engine:
//!   dimension: false        # false -> 2D plane, true -> 3D bottle
//!   seed: 42                # omit for a fresh random start every run
//!
//! plane:
//!   num_particles: 100
//!   interaction_radius: 0.1
//!   pressure_strength: 0.01
//!   viscosity: 0.01
//!   particle_radius: 0.02
//!
//! window:
//!   title: "Fluid Simulation"
//!   width: 640
//!   height: 480
//! ```
//!
//! A 3D scenario replaces `plane` with a `bottle` section
//! (`bottle_radius`, `bottle_height`, `gravity_accel`, `damping`,
//! `restitution`, `initial_velocity`, `impulse_radius`, `impulse_strength`).

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::simulation::params::{BottleParams, ImpulseParams, PlaneParams};
use crate::simulation::states::NVec3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid scenario yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("engine.dimension selects the {variant} variant but the `{section}` section is missing")]
    MissingSection {
        variant: &'static str,
        section: &'static str,
    },

    #[error("{field} must be greater than zero, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("plane domain is empty: domain_min {min} >= domain_max {max}")]
    InvertedDomain { min: f64, max: f64 },
}

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub dimension: bool, // `false` - 2D plane, `true` - 3D bottle
    pub seed: Option<u64>, // deterministic seed to make runs reproducible
}

/// 2D plane model constants
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PlaneConfig {
    pub num_particles: usize,
    pub interaction_radius: f64,
    pub pressure_strength: f64,
    pub viscosity: f64,
    pub particle_radius: f64, // render only
    pub min_separation: f64, // zero-distance guard
    pub domain_min: f64,
    pub domain_max: f64,
    pub initial_speed: f64,
}

impl Default for PlaneConfig {
    fn default() -> Self {
        let p = PlaneParams::default();
        Self {
            num_particles: p.num_particles,
            interaction_radius: p.interaction_radius,
            pressure_strength: p.pressure_strength,
            viscosity: p.viscosity,
            particle_radius: p.particle_radius,
            min_separation: p.min_separation,
            domain_min: p.domain_min,
            domain_max: p.domain_max,
            initial_speed: p.initial_speed,
        }
    }
}

impl PlaneConfig {
    pub fn to_params(&self) -> PlaneParams {
        PlaneParams {
            num_particles: self.num_particles,
            interaction_radius: self.interaction_radius,
            pressure_strength: self.pressure_strength,
            viscosity: self.viscosity,
            particle_radius: self.particle_radius,
            min_separation: self.min_separation,
            domain_min: self.domain_min,
            domain_max: self.domain_max,
            initial_speed: self.initial_speed,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        positive("plane.num_particles", self.num_particles as f64)?;
        positive("plane.interaction_radius", self.interaction_radius)?;
        positive("plane.min_separation", self.min_separation)?;
        finite("plane.pressure_strength", self.pressure_strength)?;
        finite("plane.viscosity", self.viscosity)?;
        non_negative("plane.initial_speed", self.initial_speed)?;
        if self.domain_min >= self.domain_max {
            return Err(ConfigError::InvertedDomain {
                min: self.domain_min,
                max: self.domain_max,
            });
        }
        Ok(())
    }
}

/// 3D bottle constants, including the pointer impulse
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BottleConfig {
    pub num_particles: usize,
    pub bottle_radius: f64,
    pub bottle_height: f64,
    pub gravity_accel: f64, // per-frame change of v.y, negative is down
    pub damping: f64, // per-frame velocity multiplier in [0, 1]
    pub restitution: f64, // floor bounce factor
    pub initial_velocity: [f64; 3],
    pub impulse_radius: f64,
    pub impulse_strength: f64,
}

impl Default for BottleConfig {
    fn default() -> Self {
        let b = BottleParams::default();
        let i = ImpulseParams::default();
        Self {
            num_particles: b.num_particles,
            bottle_radius: b.bottle_radius,
            bottle_height: b.bottle_height,
            gravity_accel: b.gravity_accel,
            damping: b.damping,
            restitution: b.restitution,
            initial_velocity: [b.initial_velocity.x, b.initial_velocity.y, b.initial_velocity.z],
            impulse_radius: i.radius,
            impulse_strength: i.strength,
        }
    }
}

impl BottleConfig {
    pub fn to_params(&self) -> BottleParams {
        let [vx, vy, vz] = self.initial_velocity;
        BottleParams {
            num_particles: self.num_particles,
            bottle_radius: self.bottle_radius,
            bottle_height: self.bottle_height,
            gravity_accel: self.gravity_accel,
            damping: self.damping,
            restitution: self.restitution,
            initial_velocity: NVec3::new(vx, vy, vz),
        }
    }

    pub fn to_impulse_params(&self) -> ImpulseParams {
        ImpulseParams {
            radius: self.impulse_radius,
            strength: self.impulse_strength,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        positive("bottle.num_particles", self.num_particles as f64)?;
        positive("bottle.bottle_radius", self.bottle_radius)?;
        positive("bottle.bottle_height", self.bottle_height)?;
        positive("bottle.impulse_radius", self.impulse_radius)?;
        within("bottle.damping", self.damping, 0.0, 1.0)?;
        non_negative("bottle.restitution", self.restitution)?;
        finite("bottle.gravity_accel", self.gravity_accel)?;
        finite("bottle.impulse_strength", self.impulse_strength)?;
        for v in self.initial_velocity {
            finite("bottle.initial_velocity", v)?;
        }
        Ok(())
    }
}

/// Viewer window settings
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Fluid Simulation".to_string(),
            width: 640,
            height: 480,
        }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig, // variant and seed
    #[serde(default)]
    pub plane: Option<PlaneConfig>, // required when engine.dimension is false
    #[serde(default)]
    pub bottle: Option<BottleConfig>, // required when engine.dimension is true
    #[serde(default)]
    pub window: WindowConfig,
}

impl ScenarioConfig {
    /// Parse and validate a scenario from YAML text
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: ScenarioConfig = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a scenario file
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Check the section needed by `engine.dimension` is present and sane
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.dimension {
            self.bottle_section()?.validate()?;
        } else {
            self.plane_section()?.validate()?;
        }
        positive("window.width", self.window.width as f64)?;
        positive("window.height", self.window.height as f64)?;
        Ok(())
    }

    pub fn plane_section(&self) -> Result<&PlaneConfig, ConfigError> {
        self.plane.as_ref().ok_or(ConfigError::MissingSection {
            variant: "2d plane",
            section: "plane",
        })
    }

    pub fn bottle_section(&self) -> Result<&BottleConfig, ConfigError> {
        self.bottle.as_ref().ok_or(ConfigError::MissingSection {
            variant: "3d bottle",
            section: "bottle",
        })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    // written as !(> 0) so NaN is rejected too
    if !(value > 0.0) {
        return Err(ConfigError::NonPositive { field, value });
    }
    Ok(())
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field, value });
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    within(field, value, 0.0, f64::INFINITY)
}

fn within(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ConfigError> {
    if !(value >= min && value <= max) {
        return Err(ConfigError::OutOfRange { field, value, min, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_plane_section_uses_stock_constants() {
        let cfg = ScenarioConfig::from_yaml_str("engine:\n  dimension: false\nplane: {}\n").unwrap();
        let p = cfg.plane_section().unwrap().to_params();
        assert_eq!(p, PlaneParams::default());
        assert_eq!(p.num_particles, 100);
        assert_eq!(p.interaction_radius, 0.1);
        assert_eq!(p.pressure_strength, 0.01);
        assert_eq!(p.viscosity, 0.01);
        assert_eq!(cfg.window.title, "Fluid Simulation");
    }

    #[test]
    fn bottle_section_overrides_fields() {
        let yaml = "\
engine:
  dimension: true
  seed: 7
bottle:
  num_particles: 500
  damping: 0.9
  initial_velocity: [0.0, 0.0, 0.0]
  impulse_strength: 0.5
";
        let cfg = ScenarioConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.engine.seed, Some(7));
        let bottle = cfg.bottle_section().unwrap();
        let b = bottle.to_params();
        assert_eq!(b.num_particles, 500);
        assert_eq!(b.damping, 0.9);
        assert_eq!(b.bottle_radius, 0.5);
        assert_eq!(b.initial_velocity, NVec3::zeros());
        let i = bottle.to_impulse_params();
        assert_eq!(i.radius, 0.2);
        assert_eq!(i.strength, 0.5);
    }

    #[test]
    fn missing_section_for_dimension_is_rejected() {
        let err = ScenarioConfig::from_yaml_str("engine:\n  dimension: true\nplane: {}\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingSection { section: "bottle", .. }));
    }

    #[test]
    fn bad_values_are_rejected() {
        let err = ScenarioConfig::from_yaml_str("plane:\n  num_particles: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { field: "plane.num_particles", .. }));

        let err = ScenarioConfig::from_yaml_str("plane:\n  domain_min: 1.0\n  domain_max: -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvertedDomain { .. }));

        let err = ScenarioConfig::from_yaml_str("engine:\n  dimension: true\nbottle:\n  damping: 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "bottle.damping", .. }));

        let err = ScenarioConfig::from_yaml_str("plane:\n  min_separation: 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { field: "plane.min_separation", .. }));

        let err = ScenarioConfig::from_yaml_str("plane:\n  viscosity: .nan\n").unwrap_err();
        assert!(matches!(err, ConfigError::NotFinite { field: "plane.viscosity", .. }));

        let err = ScenarioConfig::from_yaml_str("plane:\n  pressure_strength: .inf\n").unwrap_err();
        assert!(matches!(err, ConfigError::NotFinite { field: "plane.pressure_strength", .. }));
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        let err = ScenarioConfig::from_yaml_str("plane: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }
}
