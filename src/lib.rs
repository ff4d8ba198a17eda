//! Hole Rush - an AR "swallow the cubes" arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, capture, game state)
//! - `platform`: Joystick input and AR session lifecycle
//! - `frontend`: Presentation adapters (headless log, browser DOM)
//! - `settings`: Data-driven tunables and their persistence

pub mod error;
pub mod frontend;
pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, SessionError, UnsupportedReason};
pub use game::Game;
pub use settings::{AxisSigns, Settings, SpawnScale};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Chance per frame that a new target spawns (Bernoulli trial, not a timer)
    pub const SPAWN_PROBABILITY: f32 = 0.02;
    /// Maximum number of live targets
    pub const MAX_TARGETS: usize = 20;

    /// Collector ("hole") capture radius in world units
    pub const CAPTURE_RADIUS: f32 = 0.2;
    /// Targets float this far above the surface to avoid z-fighting
    pub const TARGET_HEIGHT: f32 = 0.05;
    /// Edge length of a target cube (render hint only)
    pub const TARGET_SIZE: f32 = 0.1;

    /// Joystick knob travel in device pixels before clamping
    pub const JOYSTICK_MAX_RADIUS: f32 = 30.0;
}

/// Point on the horizontal (y-up) plane at angle `theta` and distance `r` from the origin
#[inline]
pub fn ground_offset(theta: f32, r: f32) -> Vec3 {
    Vec3::new(theta.cos() * r, 0.0, theta.sin() * r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_ground_offset_stays_on_plane() {
        let p = ground_offset(PI / 3.0, 2.5);
        assert_eq!(p.y, 0.0);
        assert!((p.length() - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_ground_offset_axes() {
        let east = ground_offset(0.0, 1.0);
        assert!((east.x - 1.0).abs() < 1e-6 && east.z.abs() < 1e-6);
        let south = ground_offset(PI / 2.0, 1.0);
        assert!(south.x.abs() < 1e-6 && (south.z - 1.0).abs() < 1e-6);
    }
}
