//! AR session lifecycle
//!
//! The AR runtime (permission prompt, support query, session start/end) is
//! external; this state machine only records what it reported and decides
//! whether the frame tick should run.
//!
//! ```text
//! AwaitingPermission -> Checking -> Ready -> Starting -> Running
//!          |               |          ^         |           |
//!          v               v          +---------+-----------+
//!       Blocked         Blocked       (start failed / session ended)
//! ```

use crate::error::{SessionError, UnsupportedReason};

/// Outcome of the motion sensor permission prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    Denied,
    /// The prompt errored or was dismissed
    Failed,
    /// Platform has no permission prompt
    NotRequired,
}

impl PermissionState {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "granted" => Some(PermissionState::Granted),
            "denied" => Some(PermissionState::Denied),
            "failed" | "error" => Some(PermissionState::Failed),
            "not-required" | "notrequired" | "none" => Some(PermissionState::NotRequired),
            _ => None,
        }
    }
}

/// Outcome of the immersive AR support query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportCheck {
    Supported,
    NoXrApi,
    Unsupported,
    Failed,
}

impl SupportCheck {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "supported" => Some(SupportCheck::Supported),
            "no-xr" | "noxr" => Some(SupportCheck::NoXrApi),
            "unsupported" => Some(SupportCheck::Unsupported),
            "failed" | "error" => Some(SupportCheck::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    AwaitingPermission,
    Checking,
    Ready,
    Starting,
    Running,
    /// Terminal: the game never starts on this device
    Blocked(UnsupportedReason),
}

#[derive(Debug, Clone)]
pub struct SessionLifecycle {
    phase: SessionPhase,
}

impl Default for SessionLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionLifecycle {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::AwaitingPermission,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    fn block(&mut self, reason: UnsupportedReason) -> Result<(), SessionError> {
        log::error!("AR unavailable: {}", reason);
        self.phase = SessionPhase::Blocked(reason);
        Err(SessionError::Unsupported(reason))
    }

    /// Record the permission prompt result
    pub fn on_permission(&mut self, permission: PermissionState) -> Result<(), SessionError> {
        if self.phase != SessionPhase::AwaitingPermission {
            log::debug!("Permission result {:?} ignored in {:?}", permission, self.phase);
            return Ok(());
        }
        match permission {
            PermissionState::Granted | PermissionState::NotRequired => {
                self.phase = SessionPhase::Checking;
                Ok(())
            }
            PermissionState::Denied => self.block(UnsupportedReason::MotionPermissionDenied),
            PermissionState::Failed => self.block(UnsupportedReason::MotionPermissionFailed),
        }
    }

    /// Record the AR support query result
    pub fn on_support_checked(&mut self, check: SupportCheck) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Checking {
            log::debug!("Support result {:?} ignored in {:?}", check, self.phase);
            return Ok(());
        }
        match check {
            SupportCheck::Supported => {
                log::info!("Immersive AR supported");
                self.phase = SessionPhase::Ready;
                Ok(())
            }
            SupportCheck::NoXrApi => self.block(UnsupportedReason::NoXrApi),
            SupportCheck::Unsupported => self.block(UnsupportedReason::ImmersiveArUnsupported),
            SupportCheck::Failed => self.block(UnsupportedReason::SupportCheckFailed),
        }
    }

    /// The user pressed start
    pub fn request_start(&mut self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Ready => {
                self.phase = SessionPhase::Starting;
                Ok(())
            }
            SessionPhase::Blocked(reason) => Err(SessionError::Unsupported(reason)),
            _ => Err(SessionError::NotReady),
        }
    }

    /// The AR runtime reports the session is live.
    ///
    /// Returns true if the session transitioned into `Running`.
    pub fn on_started(&mut self) -> bool {
        match self.phase {
            // Some runtimes start the session from their own button
            SessionPhase::Ready | SessionPhase::Starting => {
                log::info!("AR session started");
                self.phase = SessionPhase::Running;
                true
            }
            _ => false,
        }
    }

    /// The AR runtime failed to start; back to `Ready` for a retry
    pub fn on_start_failed(&mut self, message: impl Into<String>) -> SessionError {
        let message = message.into();
        log::error!("AR session failed to start: {}", message);
        if self.phase == SessionPhase::Starting {
            self.phase = SessionPhase::Ready;
        }
        SessionError::StartFailed(message)
    }

    /// The AR session ended (user exit or runtime shutdown)
    pub fn on_ended(&mut self) {
        if matches!(self.phase, SessionPhase::Running | SessionPhase::Starting) {
            log::info!("AR session ended");
            self.phase = SessionPhase::Ready;
        }
    }

    /// Text for the start button / status line
    pub fn status_text(&self) -> &'static str {
        match self.phase {
            SessionPhase::AwaitingPermission => "Allow motion sensors to begin",
            SessionPhase::Checking => "Checking AR support...",
            SessionPhase::Ready => "Start AR",
            SessionPhase::Starting => "Starting AR...",
            SessionPhase::Running => "",
            SessionPhase::Blocked(reason) => reason.message(),
        }
    }
}
