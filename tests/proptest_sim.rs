//! Property tests for the simulation core.
//!
//! Random anchor poses, input sequences and joystick drags are generated with
//! `proptest`; the session invariants must hold after every frame.

use glam::{Vec2, Vec3};
use hole_rush::Settings;
use hole_rush::platform::Joystick;
use hole_rush::sim::{GameState, Target, TickInput, tick};
use proptest::prelude::*;

/// Strategy that generates finite f32 values in [-range, range].
fn finite_f32(range: f32) -> impl Strategy<Value = f32> {
    (-1_000_000i32..1_000_000i32).prop_map(move |v| v as f32 / 1_000_000.0 * range)
}

fn vec2(range: f32) -> impl Strategy<Value = Vec2> {
    (finite_f32(range), finite_f32(range)).prop_map(|(x, y)| Vec2::new(x, y))
}

fn vec3(range: f32) -> impl Strategy<Value = Vec3> {
    (finite_f32(range), finite_f32(range), finite_f32(range))
        .prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

/// One frame of host activity
#[derive(Debug, Clone)]
enum FrameOp {
    /// Joystick vector for the frame (may be out of range)
    Move(Vec2),
    /// Surface found this frame
    Surface(Vec3),
    /// Drop a target right under the hole
    PlantUnderHole,
}

fn frame_op_strategy() -> impl Strategy<Value = FrameOp> {
    prop_oneof![
        6 => vec2(1.5).prop_map(FrameOp::Move),
        1 => vec3(5.0).prop_map(FrameOp::Surface),
        1 => Just(FrameOp::PlantUnderHole),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn session_invariants_hold(
        seed in any::<u64>(),
        probability in 0.0f32..=1.0,
        ops in prop::collection::vec(frame_op_strategy(), 1..300),
    ) {
        let settings = Settings {
            spawn_probability: probability,
            ..Settings::default()
        };
        let mut state = GameState::new(seed);
        let mut last_score = 0;
        let mut first_anchor: Option<Vec3> = None;
        let mut captured_ids: Vec<u32> = Vec::new();
        let mut next_planted = 1_000_000;

        for op in ops {
            let input = match op {
                FrameOp::Move(v) => TickInput::new(v),
                FrameOp::Surface(pos) => {
                    if state.resolve_anchor(pos, settings.capture_radius) {
                        prop_assert!(first_anchor.is_none());
                        first_anchor = Some(pos);
                    }
                    TickInput::default()
                }
                FrameOp::PlantUnderHole => {
                    if let Some(c) = state.collector() {
                        if state.targets.len() < settings.max_targets {
                            let pos = c.pos;
                            state.targets.push(Target { id: next_planted, pos });
                            next_planted += 1;
                        }
                    }
                    TickInput::default()
                }
            };

            let before = state.collector().map(|c| c.pos);
            let report = tick(&mut state, &input, &settings);

            prop_assert!(state.targets.len() <= settings.max_targets);
            prop_assert!(state.score >= last_score);
            prop_assert_eq!(state.score - last_score, report.score_delta);
            last_score = state.score;

            // Unanchored: nothing moves, spawns or scores
            if first_anchor.is_none() {
                prop_assert!(state.collector().is_none());
                prop_assert!(state.targets.is_empty());
                prop_assert_eq!(report.score_delta, 0);
            }
            prop_assert_eq!(state.anchor().map(|a| a.pos), first_anchor);

            // Hole stays on the anchor's plane and moves at most one step per frame
            if let (Some(before), Some(after)) = (before, state.collector().map(|c| c.pos)) {
                prop_assert_eq!(after.y, before.y);
                let max_step = settings.move_speed * std::f32::consts::SQRT_2 + 1e-5;
                prop_assert!(before.distance(after) <= max_step);
            }

            // Captured targets never come back
            for t in &report.removed {
                prop_assert!(!captured_ids.contains(&t.id));
                captured_ids.push(t.id);
            }
            for t in &state.targets {
                prop_assert!(!captured_ids.contains(&t.id));
            }
        }
    }

    #[test]
    fn joystick_vector_stays_in_unit_square(
        max_radius in 1.0f32..200.0,
        start in vec2(2000.0),
        moves in prop::collection::vec(vec2(2000.0), 1..50),
    ) {
        let mut joystick = Joystick::new(max_radius);
        joystick.on_drag_start(start);
        for point in moves {
            let v = joystick.on_drag_move(point);
            prop_assert!(v.x.abs() <= 1.0 && v.y.abs() <= 1.0);
            prop_assert!(v.length() <= 1.0 + 1e-5);
            prop_assert!(joystick.handle_offset().length() <= max_radius * (1.0 + 1e-5));
        }
        prop_assert_eq!(joystick.on_drag_end(), Vec2::ZERO);
    }

    #[test]
    fn moves_after_release_are_ignored(
        moves in prop::collection::vec(vec2(500.0), 1..20),
    ) {
        let mut joystick = Joystick::default();
        joystick.on_drag_start(Vec2::ZERO);
        joystick.on_drag_end();
        for point in moves {
            prop_assert_eq!(joystick.on_drag_move(point), Vec2::ZERO);
        }
        prop_assert!(!joystick.is_active());
    }
}
