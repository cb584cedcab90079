//! High-level runtime engine settings
//!
//! Selects the variant (2D plane / 3D bottle) and holds the RNG seed the
//! scenario was actually built from

use crate::configuration::config::EngineConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    pub dimension: bool, // false = 2D plane, true = 3D bottle
    pub seed: u64, // resolved seed, logged at start-up so a run can be replayed
}

impl Engine {
    /// Take the configured seed, or draw a fresh one from OS entropy
    pub fn from_config(cfg: &EngineConfig) -> Self {
        Self {
            dimension: cfg.dimension,
            seed: cfg.seed.unwrap_or_else(rand::random),
        }
    }
}
