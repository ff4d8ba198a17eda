//! Platform abstraction layer
//!
//! Handles the parts of the host environment the simulation reacts to:
//! - Joystick input from pointer/touch drags
//! - AR permission, support and session lifecycle

pub mod input;
pub mod session;

pub use input::{Joystick, first_point};
pub use session::{PermissionState, SessionLifecycle, SessionPhase, SupportCheck};
