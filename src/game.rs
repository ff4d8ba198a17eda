//! Frame driver
//!
//! Owns one AR session's worth of state and advances it once per rendered
//! frame. Host callbacks (pointer events, surface detection, session
//! notifications) only record what happened; all game-state mutation happens
//! inside [`Game::frame`].

use glam::{Vec2, Vec3};

use crate::error::SessionError;
use crate::frontend::Presenter;
use crate::platform::{Joystick, PermissionState, SessionLifecycle, SessionPhase, SupportCheck};
use crate::settings::Settings;
use crate::sim::{CaptureReport, GameEvent, GameState, RenderSnapshot, TickInput, tick};

pub struct Game {
    settings: Settings,
    lifecycle: SessionLifecycle,
    joystick: Joystick,
    /// Current (or most recently ended) session
    state: Option<GameState>,
    /// Phase last reported to the presenter
    last_phase: Option<SessionPhase>,
}

impl Game {
    pub fn new(settings: Settings) -> Self {
        let joystick = Joystick::new(settings.joystick_max_radius);
        Self {
            settings,
            lifecycle: SessionLifecycle::new(),
            joystick,
            state: None,
            last_phase: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> SessionPhase {
        self.lifecycle.phase()
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn score(&self) -> u64 {
        self.state.as_ref().map_or(0, |s| s.score)
    }

    pub fn joystick(&self) -> &Joystick {
        &self.joystick
    }

    // === Session lifecycle ===

    pub fn on_permission(&mut self, permission: PermissionState) -> Result<(), SessionError> {
        self.lifecycle.on_permission(permission)
    }

    pub fn on_support_checked(&mut self, check: SupportCheck) -> Result<(), SessionError> {
        self.lifecycle.on_support_checked(check)
    }

    /// The user asked to enter AR
    pub fn start_session(&mut self) -> Result<(), SessionError> {
        self.lifecycle.request_start()
    }

    /// The AR runtime is live: begin a fresh, unanchored session.
    ///
    /// `seed` is used unless the settings pin one.
    pub fn on_session_started(&mut self, seed: u64) -> bool {
        if !self.lifecycle.on_started() {
            return false;
        }
        let seed = self.settings.seed.unwrap_or(seed);
        log::info!("Session initialized with seed: {}", seed);
        self.state = Some(GameState::new(seed));
        self.joystick.on_drag_end();
        true
    }

    pub fn on_session_start_failed(&mut self, message: impl Into<String>) -> SessionError {
        self.lifecycle.on_start_failed(message)
    }

    /// Stop ticking and drop live targets; the final score stays readable
    pub fn end_session(&mut self) {
        self.lifecycle.on_ended();
        self.joystick.on_drag_end();
        if let Some(state) = &mut self.state {
            state.discard_targets();
            log::info!("Session over, final score {}", state.score);
        }
    }

    /// Surface detected by the AR runtime; only the first one per session counts
    pub fn on_surface_found(&mut self, pos: Vec3) -> bool {
        if !self.lifecycle.is_running() {
            return false;
        }
        let capture_radius = self.settings.capture_radius;
        self.state
            .as_mut()
            .is_some_and(|s| s.resolve_anchor(pos, capture_radius))
    }

    // === Input (joystick state only) ===

    pub fn on_pointer_down(&mut self, point: Vec2) {
        self.joystick.on_drag_start(point);
    }

    pub fn on_pointer_move(&mut self, point: Vec2) -> Vec2 {
        self.joystick.on_drag_move(point)
    }

    pub fn on_pointer_up(&mut self) -> Vec2 {
        self.joystick.on_drag_end()
    }

    // === Frame ===

    /// Report the session phase to `presenter` if it changed since the last report.
    ///
    /// Hosts call this after lifecycle notifications, since frames only run
    /// while a session is live. Entering the running phase also reports the
    /// fresh session's score. Returns true if a change was reported.
    pub fn sync_presenter<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> bool {
        let phase = self.lifecycle.phase();
        if self.last_phase == Some(phase) {
            return false;
        }
        presenter.on_session_changed(phase, self.lifecycle.status_text());
        self.last_phase = Some(phase);
        if let (SessionPhase::Running, Some(state)) = (phase, &self.state) {
            presenter.on_score(state.score);
        }
        true
    }

    /// Run one frame and push the result to `presenter`.
    ///
    /// Events are forwarded first, then `render_targets` and finally
    /// `render_collector`, which closes the frame. Returns the capture report,
    /// or `None` when no session is running.
    pub fn frame<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> Option<CaptureReport> {
        self.sync_presenter(presenter);
        if !self.lifecycle.is_running() {
            return None;
        }

        let state = self.state.as_mut()?;

        let input = TickInput::new(self.joystick.vector());
        presenter.on_input_vector(input.move_vector);

        let report = tick(state, &input, &self.settings);

        for event in state.drain_events() {
            match event {
                GameEvent::AnchorResolved { pos } => presenter.on_anchor_found(pos),
                GameEvent::ScoreChanged { score } => presenter.on_score(score),
                GameEvent::TargetSpawned { id, pos } => presenter.on_target_spawned(id, pos),
                GameEvent::TargetsCaptured { ids } => presenter.on_targets_captured(&ids),
            }
        }

        presenter.render_targets(&state.targets);
        presenter.render_collector(state.collector());
        Some(report)
    }

    /// Targets, collector and score as JSON for the host's renderer
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        match &self.state {
            Some(state) => serde_json::to_string(&RenderSnapshot::from(state)),
            None => Ok(String::from("null")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::LogPresenter;
    use crate::sim::Target;

    fn running_game(settings: Settings) -> Game {
        let mut game = Game::new(settings);
        game.on_permission(PermissionState::Granted).unwrap();
        game.on_support_checked(SupportCheck::Supported).unwrap();
        game.start_session().unwrap();
        assert!(game.on_session_started(7));
        game
    }

    #[test]
    fn test_frame_idle_before_running() {
        let mut game = Game::new(Settings::default());
        let mut presenter = LogPresenter::new();
        assert!(game.frame(&mut presenter).is_none());
        assert_eq!(presenter.phase, Some(SessionPhase::AwaitingPermission));
        assert_eq!(presenter.frames, 0);
    }

    #[test]
    fn test_phase_reaches_presenter_without_frames() {
        let mut game = Game::new(Settings::default());
        let mut presenter = LogPresenter::new();
        assert!(game.sync_presenter(&mut presenter));
        assert!(!game.sync_presenter(&mut presenter));

        let _ = game.on_permission(PermissionState::Denied);
        assert!(game.sync_presenter(&mut presenter));
        assert!(matches!(presenter.phase, Some(SessionPhase::Blocked(_))));
        assert_eq!(presenter.status, "Motion sensor permission is required for AR");
        assert_eq!(presenter.frames, 0);
    }

    #[test]
    fn test_started_session_reports_score_before_first_frame() {
        let mut game = running_game(Settings::default());
        let mut presenter = LogPresenter::new();
        game.sync_presenter(&mut presenter);
        assert_eq!(presenter.phase, Some(SessionPhase::Running));
        assert_eq!(presenter.scores, vec![0]);

        game.frame(&mut presenter);
        assert_eq!(presenter.scores, vec![0]);
        assert_eq!(presenter.frames, 1);
    }

    #[test]
    fn test_ended_session_restores_start_button() {
        let mut game = running_game(Settings::default());
        let mut presenter = LogPresenter::new();
        game.frame(&mut presenter);
        assert_eq!(presenter.phase, Some(SessionPhase::Running));

        game.end_session();
        game.sync_presenter(&mut presenter);
        assert_eq!(presenter.phase, Some(SessionPhase::Ready));
        assert_eq!(presenter.status, "Start AR");

        game.start_session().unwrap();
        game.sync_presenter(&mut presenter);
        assert_eq!(presenter.status, "Starting AR...");
        let _ = game.on_session_start_failed("NotAllowedError");
        assert!(game.sync_presenter(&mut presenter));
        assert_eq!(presenter.phase, Some(SessionPhase::Ready));
        assert_eq!(presenter.status, "Start AR");
    }

    #[test]
    fn test_spawn_and_capture_reach_presenter() {
        let mut game = running_game(Settings {
            spawn_probability: 1.0,
            ..Settings::default()
        });
        let mut presenter = LogPresenter::new();
        game.on_surface_found(Vec3::ZERO);
        game.frame(&mut presenter);
        assert_eq!(presenter.spawned, 1);

        if let Some(state) = &mut game.state {
            state.targets.push(Target {
                id: 900,
                pos: Vec3::ZERO,
            });
        }
        game.frame(&mut presenter);
        assert_eq!(presenter.captured, vec![900]);
    }

    #[test]
    fn test_frames_wait_for_surface() {
        let mut game = running_game(Settings {
            spawn_probability: 1.0,
            ..Settings::default()
        });
        let mut presenter = LogPresenter::new();

        for _ in 0..10 {
            game.frame(&mut presenter);
        }
        assert!(presenter.collector.is_none());
        assert!(presenter.targets.is_empty());

        assert!(game.on_surface_found(Vec3::new(0.0, -1.0, -1.0)));
        assert!(!game.on_surface_found(Vec3::ZERO));
        game.frame(&mut presenter);
        assert_eq!(presenter.anchor, Some(Vec3::new(0.0, -1.0, -1.0)));
        assert_eq!(presenter.targets.len(), 1);
        assert!(presenter.collector.is_some());
    }

    #[test]
    fn test_joystick_drives_collector() {
        let mut game = running_game(Settings {
            spawn_probability: 0.0,
            ..Settings::default()
        });
        let mut presenter = LogPresenter::new();
        game.on_surface_found(Vec3::ZERO);

        game.on_pointer_down(Vec2::new(50.0, 50.0));
        game.on_pointer_move(Vec2::new(200.0, 50.0));
        for _ in 0..10 {
            game.frame(&mut presenter);
        }
        assert_eq!(presenter.input, Vec2::new(1.0, 0.0));
        assert!((presenter.collector.unwrap().pos.x - 0.1).abs() < 1e-5);

        game.on_pointer_up();
        game.frame(&mut presenter);
        assert_eq!(presenter.input, Vec2::ZERO);
    }

    #[test]
    fn test_score_reported_on_capture() {
        let mut game = running_game(Settings {
            spawn_probability: 0.0,
            ..Settings::default()
        });
        let mut presenter = LogPresenter::new();
        game.on_surface_found(Vec3::ZERO);
        game.frame(&mut presenter);
        assert_eq!(presenter.scores, vec![0]);

        if let Some(state) = &mut game.state {
            state.targets.push(Target {
                id: 500,
                pos: Vec3::new(0.05, 0.05, 0.0),
            });
        }
        let report = game.frame(&mut presenter).unwrap();
        assert_eq!(report.score_delta, 1);
        assert_eq!(presenter.scores, vec![0, 1]);
        assert_eq!(presenter.score_text(), "Score: 1");

        // No capture, no new score report
        game.frame(&mut presenter);
        assert_eq!(presenter.scores, vec![0, 1]);
    }

    #[test]
    fn test_end_session_stops_and_discards() {
        let mut game = running_game(Settings {
            spawn_probability: 1.0,
            ..Settings::default()
        });
        let mut presenter = LogPresenter::new();
        game.on_surface_found(Vec3::ZERO);
        for _ in 0..5 {
            game.frame(&mut presenter);
        }
        assert_eq!(game.state().unwrap().targets.len(), 5);

        game.end_session();
        assert!(game.frame(&mut presenter).is_none());
        assert!(game.state().unwrap().targets.is_empty());
        assert_eq!(presenter.phase, Some(SessionPhase::Ready));
        assert_eq!(presenter.status, "Start AR");
        assert!(!game.on_surface_found(Vec3::ZERO));
    }

    #[test]
    fn test_restart_is_a_fresh_session() {
        let mut game = running_game(Settings::default());
        game.on_surface_found(Vec3::ZERO);
        game.end_session();

        game.start_session().unwrap();
        assert!(game.on_session_started(8));
        let state = game.state().unwrap();
        assert!(!state.is_anchored());
        assert_eq!(state.score, 0);
        assert!(game.on_surface_found(Vec3::new(1.0, 0.0, 1.0)));
    }

    #[test]
    fn test_pinned_seed() {
        let mut game = running_game(Settings {
            seed: Some(1234),
            ..Settings::default()
        });
        assert_eq!(game.state().unwrap().seed, 1234);
        game.end_session();
    }

    #[test]
    fn test_snapshot_json() {
        let mut game = Game::new(Settings::default());
        assert_eq!(game.snapshot_json().unwrap(), "null");

        game = running_game(Settings::default());
        game.on_surface_found(Vec3::ZERO);
        let json = game.snapshot_json().unwrap();
        assert!(json.contains("\"score\":0"));
        assert!(json.contains("\"collector\":{"));
    }
}
