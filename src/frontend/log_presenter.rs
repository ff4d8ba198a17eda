//! Headless presenter that logs and keeps the latest frame

use glam::{Vec2, Vec3};

use super::Presenter;
use crate::platform::SessionPhase;
use crate::sim::{Collector, Target};

#[derive(Debug, Default)]
pub struct LogPresenter {
    /// Frames rendered
    pub frames: u64,
    pub targets: Vec<Target>,
    pub collector: Option<Collector>,
    pub anchor: Option<Vec3>,
    pub input: Vec2,
    /// Every score reported, in order
    pub scores: Vec<u64>,
    /// Targets spawned so far
    pub spawned: u64,
    /// Ids of captured targets, in capture order
    pub captured: Vec<u32>,
    pub phase: Option<SessionPhase>,
    pub status: String,
}

impl LogPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text a score display would show
    pub fn score_text(&self) -> String {
        format!("Score: {}", self.scores.last().copied().unwrap_or(0))
    }
}

impl Presenter for LogPresenter {
    fn render_targets(&mut self, targets: &[Target]) {
        self.targets.clear();
        self.targets.extend_from_slice(targets);
    }

    fn render_collector(&mut self, collector: Option<&Collector>) {
        self.collector = collector.copied();
        self.frames += 1;
        log::trace!(
            "Frame {}: {} target(s), hole at {:?}",
            self.frames,
            self.targets.len(),
            self.collector.map(|c| c.pos)
        );
    }

    fn on_anchor_found(&mut self, pos: Vec3) {
        log::info!("Hole placed at {:?}", pos);
        self.anchor = Some(pos);
    }

    fn on_input_vector(&mut self, vector: Vec2) {
        self.input = vector;
    }

    fn on_score(&mut self, score: u64) {
        self.scores.push(score);
        log::info!("Score: {}", score);
    }

    fn on_target_spawned(&mut self, id: u32, pos: Vec3) {
        log::debug!("Target {} spawned at {:?}", id, pos);
        self.spawned += 1;
    }

    fn on_targets_captured(&mut self, ids: &[u32]) {
        log::debug!("Captured {:?}", ids);
        self.captured.extend_from_slice(ids);
    }

    fn on_session_changed(&mut self, phase: SessionPhase, status: &str) {
        log::info!("Session {:?} ({})", phase, status);
        self.phase = Some(phase);
        self.status = status.to_string();
    }
}
