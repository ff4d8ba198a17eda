//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per rendered frame
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, AR or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CaptureReport, capture_targets};
pub use spawn::{SpawnParams, Spawner};
pub use state::{
    Anchor, Collector, CollectorState, GameEvent, GameState, RenderSnapshot, Target,
};
pub use tick::{TickInput, ground_motion, tick};
