//! Presentation adapters
//!
//! The simulation knows nothing about meshes, materials or the DOM. Each
//! frame the driver pushes targets, the collector and notifications through a
//! [`Presenter`]; one implementation exists per host environment.

mod log_presenter;
#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use log_presenter::LogPresenter;

use glam::{Vec2, Vec3};

use crate::platform::SessionPhase;
use crate::sim::{Collector, Target};

pub trait Presenter {
    /// Live targets, in spawn order.
    ///
    /// Called before [`Presenter::render_collector`] on every running frame.
    fn render_targets(&mut self, targets: &[Target]);

    /// The hole, or `None` while waiting for a surface.
    ///
    /// Always the last call of a running frame; adapters that draw once per
    /// frame flush here using the targets received just before.
    fn render_collector(&mut self, collector: Option<&Collector>);

    /// The session anchored on its first detected surface
    fn on_anchor_found(&mut self, pos: Vec3);

    /// Joystick vector sampled for this frame
    fn on_input_vector(&mut self, vector: Vec2);

    /// Cumulative score. Called when it changes and once when a session
    /// enters the running phase, so a restarted session shows 0.
    fn on_score(&mut self, score: u64);

    /// A target appeared this frame
    fn on_target_spawned(&mut self, _id: u32, _pos: Vec3) {}

    /// Targets swallowed by the hole this frame
    fn on_targets_captured(&mut self, _ids: &[u32]) {}

    /// AR session phase changed; `status` is the user-facing text for it
    fn on_session_changed(&mut self, _phase: SessionPhase, _status: &str) {}
}
