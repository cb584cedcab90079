//! Pointer-driven impulses for the 3D bottle
//!
//! A press arrives in device pixels (origin top-left, y down) together with
//! the viewport size. It is mapped to normalized `[-1, 1]` coordinates and
//! compared against each particle's x/y; z plays no part.

use std::collections::VecDeque;

use crate::simulation::params::ImpulseParams;
use crate::simulation::states::{BottleStore, NVec2};

/// One pointer press in device space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPress {
    pub px: f64,
    pub py: f64,
    pub width: f64,
    pub height: f64,
}

impl PointerPress {
    pub fn new(px: f64, py: f64, width: f64, height: f64) -> Self {
        Self { px, py, width, height }
    }

    /// Normalized device coordinates, x right and y up, both in [-1, 1]
    pub fn normalized(&self) -> NVec2 {
        NVec2::new(
            (self.px / self.width) * 2.0 - 1.0,
            1.0 - (self.py / self.height) * 2.0,
        )
    }
}

/// Presses waiting for the next physics step
#[derive(Debug, Clone, Default)]
pub struct PendingPresses {
    queue: VecDeque<PointerPress>,
}

impl PendingPresses {
    pub fn push(&mut self, press: PointerPress) {
        self.queue.push_back(press);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = PointerPress> + '_ {
        self.queue.drain(..)
    }
}

/// Radial velocity kick around a press point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpulseInjector {
    pub radius: f64,
    pub strength: f64,
}

impl ImpulseInjector {
    pub fn from_params(params: &ImpulseParams) -> Self {
        Self {
            radius: params.radius,
            strength: params.strength,
        }
    }

    /// Apply a press already in normalized coordinates. Returns how many
    /// particles were inside the radius
    pub fn apply_at(&self, store: &mut BottleStore, origin: NVec2) -> usize {
        let mut touched = 0;

        for p in store.iter_mut() {
            let d = NVec2::new(p.x.x - origin.x, p.x.y - origin.y);
            let distance = d.norm();
            // written as !(<) so a NaN distance from a degenerate press is skipped
            if !(distance < self.radius) {
                continue;
            }

            // a particle exactly under the pointer gets no direction
            let dir = if distance == 0.0 { NVec2::zeros() } else { d / distance };
            let magnitude = (1.0 - distance / self.radius) * self.strength;

            p.v.x -= dir.x * magnitude;
            p.v.y -= dir.y * magnitude;
            touched += 1;
        }

        touched
    }

    pub fn apply(&self, store: &mut BottleStore, press: &PointerPress) -> usize {
        self.apply_at(store, press.normalized())
    }
}
