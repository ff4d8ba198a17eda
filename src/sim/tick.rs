//! Per-frame simulation tick
//!
//! Order within a frame: collector move, spawn roll, capture scan, scoring.
//! Nothing happens until the session has been anchored.

use glam::{Vec2, Vec3};

use super::collision::{CaptureReport, capture_targets};
use super::spawn::SpawnParams;
use super::state::{CollectorState, GameEvent, GameState};
use crate::settings::Settings;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Joystick vector, each axis in [-1, 1]
    pub move_vector: Vec2,
}

impl TickInput {
    pub fn new(move_vector: Vec2) -> Self {
        Self { move_vector }
    }
}

/// Map a joystick vector onto a ground-plane displacement for one frame
pub fn ground_motion(move_vector: Vec2, settings: &Settings) -> Vec3 {
    if !move_vector.is_finite() {
        return Vec3::ZERO;
    }
    let v = move_vector.clamp(Vec2::NEG_ONE, Vec2::ONE);
    Vec3::new(
        v.x * settings.axis_signs.x,
        0.0,
        v.y * settings.axis_signs.z,
    ) * settings.move_speed
}

/// Advance the session by one frame, returning what was captured
pub fn tick(state: &mut GameState, input: &TickInput, settings: &Settings) -> CaptureReport {
    state.time_ticks += 1;

    let (anchor, collector) = match &mut state.collector_state {
        CollectorState::Unanchored => return CaptureReport::default(),
        CollectorState::Anchored { anchor, collector } => {
            collector.pos += ground_motion(input.move_vector, settings);
            (*anchor, *collector)
        }
    };

    let params = SpawnParams::from(settings);
    if let Some(target) =
        state
            .spawner
            .maybe_spawn(&anchor, &state.targets, &params, &mut state.rng)
    {
        log::debug!("Spawned target {} at {:?}", target.id, target.pos);
        state.targets.push(target);
        state.push_event(GameEvent::TargetSpawned {
            id: target.id,
            pos: target.pos,
        });
    }
    debug_assert!(
        state.targets.len() <= params.max_targets,
        "target cap exceeded: {} > {}",
        state.targets.len(),
        params.max_targets
    );

    let report = capture_targets(&collector, &mut state.targets);
    if report.score_delta > 0 {
        state.score += report.score_delta;
        log::debug!(
            "Captured {} target(s), score {}",
            report.score_delta,
            state.score
        );
        state.push_event(GameEvent::TargetsCaptured {
            ids: report.removed.iter().map(|t| t.id).collect(),
        });
        state.push_event(GameEvent::ScoreChanged { score: state.score });
    }

    report
}
