//! Game settings and tunables
//!
//! Persisted in LocalStorage on the web; read from a JSON file natively.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Physical scale the game is played at
///
/// Room-scale play anchors on a detected floor; marker-scale play anchors on a
/// small printed marker and keeps everything within its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpawnScale {
    #[default]
    Room,
    Marker,
}

impl SpawnScale {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnScale::Room => "Room",
            SpawnScale::Marker => "Marker",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "room" | "floor" => Some(SpawnScale::Room),
            "marker" => Some(SpawnScale::Marker),
            _ => None,
        }
    }

    /// Inner radius of the spawn ring around the anchor
    pub fn ring_min_radius(&self) -> f32 {
        match self {
            SpawnScale::Room => 1.0,
            SpawnScale::Marker => 0.3,
        }
    }

    /// Width of the spawn ring
    pub fn ring_span(&self) -> f32 {
        match self {
            SpawnScale::Room => 2.0,
            SpawnScale::Marker => 0.5,
        }
    }

    /// Collector speed in units per frame at full joystick deflection
    pub fn move_speed(&self) -> f32 {
        match self {
            SpawnScale::Room => 0.01,
            SpawnScale::Marker => 0.005,
        }
    }
}

/// Sign applied to each joystick axis when mapping onto the ground plane
///
/// Joystick x drives world x and joystick y (screen down is positive) drives
/// world z. With the default `(+1, +1)`, pulling the knob toward the bottom of
/// the screen moves the hole toward +z, i.e. toward the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSigns {
    pub x: f32,
    pub z: f32,
}

impl Default for AxisSigns {
    fn default() -> Self {
        Self { x: 1.0, z: 1.0 }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Physical scale preset the ring/speed values were derived from
    pub scale: SpawnScale,

    // === Spawning ===
    /// Per-frame spawn chance
    pub spawn_probability: f32,
    /// Live target cap
    pub max_targets: usize,
    /// Inner radius of the spawn ring
    pub ring_min_radius: f32,
    /// Ring width (targets land in [min, min + span])
    pub ring_span: f32,
    /// Height of targets above the anchor
    pub target_height: f32,

    // === Collector ===
    /// Capture radius
    pub capture_radius: f32,
    /// Units per frame at full deflection
    pub move_speed: f32,
    /// Joystick axis to ground axis signs
    pub axis_signs: AxisSigns,

    // === Input ===
    /// Joystick travel in device pixels
    pub joystick_max_radius: f32,

    /// Fixed RNG seed (random per session when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_preset(SpawnScale::default())
    }
}

impl Settings {
    /// Create settings from a scale preset
    pub fn from_preset(scale: SpawnScale) -> Self {
        Self {
            scale,
            spawn_probability: SPAWN_PROBABILITY,
            max_targets: MAX_TARGETS,
            ring_min_radius: scale.ring_min_radius(),
            ring_span: scale.ring_span(),
            target_height: TARGET_HEIGHT,
            capture_radius: CAPTURE_RADIUS,
            move_speed: scale.move_speed(),
            axis_signs: AxisSigns::default(),
            joystick_max_radius: JOYSTICK_MAX_RADIUS,
            seed: None,
        }
    }

    /// Apply a scale preset (updates the scale-dependent values only)
    pub fn apply_preset(&mut self, scale: SpawnScale) {
        self.scale = scale;
        self.ring_min_radius = scale.ring_min_radius();
        self.ring_span = scale.ring_span();
        self.move_speed = scale.move_speed();
    }

    /// Check that every tunable is usable by the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, v: f32) -> Result<(), ConfigError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be finite and positive",
                })
            }
        }

        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(ConfigError::Invalid {
                field: "spawn_probability",
                reason: "must be within [0, 1]",
            });
        }
        if self.max_targets == 0 {
            return Err(ConfigError::Invalid {
                field: "max_targets",
                reason: "must be at least 1",
            });
        }
        positive("ring_min_radius", self.ring_min_radius)?;
        if !(self.ring_span.is_finite() && self.ring_span >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "ring_span",
                reason: "must be finite and non-negative",
            });
        }
        positive("capture_radius", self.capture_radius)?;
        // Targets must sit inside the capture sphere of a hole on the same plane
        if !(self.target_height > 0.0 && self.target_height < self.capture_radius) {
            return Err(ConfigError::Invalid {
                field: "target_height",
                reason: "must be positive and below capture_radius",
            });
        }
        positive("move_speed", self.move_speed)?;
        positive("joystick_max_radius", self.joystick_max_radius)?;

        let unit = |v: f32| v == 1.0 || v == -1.0;
        if !unit(self.axis_signs.x) || !unit(self.axis_signs.z) {
            return Err(ConfigError::Invalid {
                field: "axis_signs",
                reason: "each sign must be +1 or -1",
            });
        }
        Ok(())
    }

    /// Parse and validate settings JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse stored JSON, falling back to defaults on any problem
    fn from_stored(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "hole_rush_settings";

    /// Environment variable naming a settings file (native only)
    pub const SETTINGS_ENV: &'static str = "HOLE_RUSH_SETTINGS";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_stored(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from the file named by `HOLE_RUSH_SETTINGS`, if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::SETTINGS_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path);
                Self::from_stored(&json)
            }
            Err(e) => {
                log::warn!("Could not read settings file {}: {}", path, e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
