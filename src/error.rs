//! Error types
//!
//! The simulation itself never fails. Errors only come from the environment
//! around it (AR support, permissions, session start) and from settings.
//! Malformed pointer/touch events are dropped, never turned into errors.

use thiserror::Error;

/// Why the game can never start on this device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedReason {
    /// The browser exposes no WebXR API
    NoXrApi,
    /// WebXR exists but immersive AR sessions are not supported
    ImmersiveArUnsupported,
    /// The support query itself failed
    SupportCheckFailed,
    /// The user denied the motion sensor permission
    MotionPermissionDenied,
    /// The motion permission request failed or was dismissed
    MotionPermissionFailed,
}

impl UnsupportedReason {
    /// User-facing message shown in place of the start button
    pub fn message(&self) -> &'static str {
        match self {
            UnsupportedReason::NoXrApi => "WebXR API is not available",
            UnsupportedReason::ImmersiveArUnsupported => "This device does not support AR",
            UnsupportedReason::SupportCheckFailed => "Error while checking AR support",
            UnsupportedReason::MotionPermissionDenied => {
                "Motion sensor permission is required for AR"
            }
            UnsupportedReason::MotionPermissionFailed => {
                "Could not obtain motion sensor permission"
            }
        }
    }
}

impl std::fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// AR session errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Blocking: the game never starts and nothing is retried
    #[error("environment unsupported: {0}")]
    Unsupported(UnsupportedReason),
    /// Reported once; the lifecycle returns to `Ready` so the user can retry
    #[error("failed to start AR session: {0}")]
    StartFailed(String),
    /// A start was requested while the session could not be started
    #[error("session is not ready to start")]
    NotReady,
}

/// Settings errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}
