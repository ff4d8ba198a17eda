//! Target spawning
//!
//! One Bernoulli trial per frame decides whether a cube appears. New cubes land
//! on a ring around the anchor, lifted slightly off the surface.

use rand::Rng;

use super::state::{Anchor, Target};
use crate::ground_offset;
use crate::settings::Settings;

/// Spawn tunables, extracted from [`Settings`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnParams {
    pub probability: f32,
    pub max_targets: usize,
    pub ring_min_radius: f32,
    pub ring_span: f32,
    pub height: f32,
}

impl From<&Settings> for SpawnParams {
    fn from(s: &Settings) -> Self {
        Self {
            probability: s.spawn_probability,
            max_targets: s.max_targets,
            ring_min_radius: s.ring_min_radius,
            ring_span: s.ring_span,
            height: s.target_height,
        }
    }
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

/// Creates targets with session-unique ids
#[derive(Debug, Clone)]
pub struct Spawner {
    next_id: u32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spawner {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Roll for a spawn this frame.
    ///
    /// Always consumes exactly one roll from `rng`, even at capacity, so the
    /// random stream does not depend on how many targets are alive. Placement
    /// consumes two more rolls only when a target is actually created.
    pub fn maybe_spawn<R: Rng>(
        &mut self,
        anchor: &Anchor,
        targets: &[Target],
        params: &SpawnParams,
        rng: &mut R,
    ) -> Option<Target> {
        let roll: f32 = rng.random();
        if roll >= params.probability || targets.len() >= params.max_targets {
            return None;
        }

        let theta = rng.random_range(0.0..std::f32::consts::TAU);
        let r = params.ring_min_radius + rng.random::<f32>() * params.ring_span;
        let mut pos = anchor.pos + ground_offset(theta, r);
        pos.y = anchor.pos.y + params.height;

        let id = self.next_id;
        self.next_id += 1;
        Some(Target { id, pos })
    }
}
