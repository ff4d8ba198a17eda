//! Game state and core simulation types
//!
//! Everything one AR session owns lives in [`GameState`]; nothing is global.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn::Spawner;

/// Fixed point on the detected surface where play happens
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub pos: Vec3,
}

/// The player-controlled hole
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collector {
    pub pos: Vec3,
    pub capture_radius: f32,
}

impl Collector {
    pub fn new(pos: Vec3, capture_radius: f32) -> Self {
        Self {
            pos,
            capture_radius,
        }
    }

    /// Strictly inside the capture radius (a target exactly on the rim is not captured)
    #[inline]
    pub fn captures(&self, point: Vec3) -> bool {
        self.pos.distance_squared(point) < self.capture_radius * self.capture_radius
    }
}

/// A collectible cube
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub pos: Vec3,
}

/// Whether gameplay has started
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollectorState {
    /// Waiting for the first surface detection; no movement, spawning or capture
    Unanchored,
    /// Anchor fixed for the rest of the session
    Anchored { anchor: Anchor, collector: Collector },
}

/// Notifications for the presentation layer, drained once per frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    AnchorResolved { pos: Vec3 },
    TargetSpawned { id: u32, pos: Vec3 },
    TargetsCaptured { ids: Vec<u32> },
    ScoreChanged { score: u64 },
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Simulation RNG, seeded from `seed`
    pub rng: Pcg32,
    /// Anchoring phase and, once anchored, the collector
    pub collector_state: CollectorState,
    /// Live targets in spawn order
    pub targets: Vec<Target>,
    /// Cumulative score (never decreases)
    pub score: u64,
    /// Frames ticked
    pub time_ticks: u64,
    /// Target factory
    pub spawner: Spawner,
    /// Pending events for the presenter
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new, unanchored session
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            collector_state: CollectorState::Unanchored,
            targets: Vec::new(),
            score: 0,
            time_ticks: 0,
            spawner: Spawner::new(),
            events: Vec::new(),
        }
    }

    /// Accept the first detected surface pose; later ones are ignored.
    ///
    /// Returns true if this call anchored the session.
    pub fn resolve_anchor(&mut self, pos: Vec3, capture_radius: f32) -> bool {
        if !pos.is_finite() {
            log::warn!("Ignoring non-finite surface pose {:?}", pos);
            return false;
        }
        match self.collector_state {
            CollectorState::Unanchored => {
                self.collector_state = CollectorState::Anchored {
                    anchor: Anchor { pos },
                    collector: Collector::new(pos, capture_radius),
                };
                self.events.push(GameEvent::AnchorResolved { pos });
                log::info!("Anchor resolved at {:?}", pos);
                true
            }
            CollectorState::Anchored { .. } => {
                log::debug!("Surface already anchored, ignoring {:?}", pos);
                false
            }
        }
    }

    pub fn is_anchored(&self) -> bool {
        matches!(self.collector_state, CollectorState::Anchored { .. })
    }

    pub fn anchor(&self) -> Option<Anchor> {
        match self.collector_state {
            CollectorState::Anchored { anchor, .. } => Some(anchor),
            CollectorState::Unanchored => None,
        }
    }

    /// The collector, absent until anchored
    pub fn collector(&self) -> Option<&Collector> {
        match &self.collector_state {
            CollectorState::Anchored { collector, .. } => Some(collector),
            CollectorState::Unanchored => None,
        }
    }

    pub fn collector_mut(&mut self) -> Option<&mut Collector> {
        match &mut self.collector_state {
            CollectorState::Anchored { collector, .. } => Some(collector),
            CollectorState::Unanchored => None,
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events in emission order
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop every live target (session end)
    pub fn discard_targets(&mut self) {
        self.targets.clear();
    }
}

/// Borrowed view of what a renderer needs each frame
#[derive(Debug, Serialize)]
pub struct RenderSnapshot<'a> {
    pub targets: &'a [Target],
    pub collector: Option<&'a Collector>,
    pub score: u64,
}

impl<'a> From<&'a GameState> for RenderSnapshot<'a> {
    fn from(state: &'a GameState) -> Self {
        Self {
            targets: &state.targets,
            collector: state.collector(),
            score: state.score,
        }
    }
}
