//! Simulation settings
//!
//! Every tunable the physics core accepts, with JSON load/save. Missing
//! fields fall back to the defaults, so a settings file only needs the
//! values it changes.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{SettingsError, SimError};
use crate::sim::geometry::{inradius, regular_polygon_vertices};

/// Named starting configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Hexagon standing still, ball dropped from the center
    Calm,
    /// Hexagon spinning at a steady clip
    #[default]
    Spinning,
    /// No gravity, no spin, no energy loss
    Elastic,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Calm => "Calm",
            Preset::Spinning => "Spinning",
            Preset::Elastic => "Elastic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "calm" => Some(Preset::Calm),
            "spinning" | "spin" => Some(Preset::Spinning),
            "elastic" => Some(Preset::Elastic),
            _ => None,
        }
    }
}

/// Physics configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Container ===
    /// Rotation center of the polygon
    pub center: Vec2,
    /// Center-to-vertex distance
    pub circumradius: f32,
    /// Number of polygon sides (3 or more)
    pub sides: u32,
    /// Starting rotation (radians)
    pub initial_rotation: f32,
    /// Spin rate (radians per second)
    pub angular_velocity: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Starting position, relative to `center`
    pub ball_start: Vec2,
    /// Starting velocity
    pub ball_velocity: Vec2,

    // === Forces ===
    /// Downward acceleration (+y is down)
    pub gravity: f32,
    /// Fraction of normal relative speed kept on a bounce (0..=1)
    pub restitution: f32,
    /// Per-second linear drag; 0 disables
    pub drag: f32,

    // === Kicks ===
    /// Smallest random kick impulse
    pub kick_min: f32,
    /// Largest random kick impulse
    pub kick_max: f32,
    /// Seed for the kick RNG
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            circumradius: DEFAULT_CIRCUMRADIUS,
            sides: DEFAULT_SIDES,
            initial_rotation: 0.0,
            angular_velocity: DEFAULT_ANGULAR_VELOCITY,

            ball_radius: DEFAULT_BALL_RADIUS,
            ball_start: Vec2::ZERO,
            ball_velocity: Vec2::ZERO,

            gravity: DEFAULT_GRAVITY,
            restitution: DEFAULT_RESTITUTION,
            drag: 0.0,

            kick_min: DEFAULT_KICK_MIN,
            kick_max: DEFAULT_KICK_MAX,
            seed: 0x5eed,
        }
    }
}

impl Settings {
    /// Create settings from a preset
    pub fn from_preset(preset: Preset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Overwrite the physics values a preset controls
    pub fn apply_preset(&mut self, preset: Preset) {
        match preset {
            Preset::Calm => {
                self.angular_velocity = 0.0;
                self.gravity = DEFAULT_GRAVITY;
                self.restitution = DEFAULT_RESTITUTION;
                self.ball_velocity = Vec2::ZERO;
            }
            Preset::Spinning => {
                self.angular_velocity = 1.5;
                self.gravity = DEFAULT_GRAVITY;
                self.restitution = DEFAULT_RESTITUTION;
                self.ball_velocity = Vec2::new(200.0, 0.0);
            }
            Preset::Elastic => {
                self.angular_velocity = 0.0;
                self.gravity = 0.0;
                self.restitution = 1.0;
                self.drag = 0.0;
                self.ball_velocity = Vec2::new(300.0, 0.0);
            }
        }
    }

    /// Distance from center to the middle of each edge
    pub fn inradius(&self) -> f32 {
        inradius(self.circumradius, self.sides)
    }

    /// Reject configurations that cannot hold the ball stably
    pub fn validate(&self) -> Result<(), SimError> {
        regular_polygon_vertices(self.center, self.circumradius, self.initial_rotation, self.sides)?;

        if !self.ball_radius.is_finite() || self.ball_radius <= 0.0 {
            return Err(SimError::geometry(format!(
                "ball radius must be positive and finite, got {}",
                self.ball_radius
            )));
        }
        let inradius = self.inradius();
        if self.ball_radius >= inradius {
            return Err(SimError::geometry(format!(
                "ball radius {} does not fit inside polygon inradius {}",
                self.ball_radius, inradius
            )));
        }
        if self.ball_start.length() + self.ball_radius > inradius {
            return Err(SimError::geometry(format!(
                "ball start {:?} places the ball outside the container",
                self.ball_start
            )));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(SimError::geometry(format!(
                "restitution must be within [0, 1], got {}",
                self.restitution
            )));
        }
        if !self.drag.is_finite() || self.drag < 0.0 {
            return Err(SimError::geometry(format!(
                "drag must be non-negative, got {}",
                self.drag
            )));
        }
        if !self.gravity.is_finite()
            || !self.angular_velocity.is_finite()
            || !self.ball_velocity.is_finite()
        {
            return Err(SimError::geometry(
                "gravity, angular velocity and ball velocity must be finite",
            ));
        }
        if !(0.0..=self.kick_max).contains(&self.kick_min) || !self.kick_max.is_finite() {
            return Err(SimError::geometry(format!(
                "kick range [{}, {}] is invalid",
                self.kick_min, self.kick_max
            )));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
        for preset in [Preset::Calm, Preset::Spinning, Preset::Elastic] {
            assert!(Settings::from_preset(preset).validate().is_ok());
        }
    }

    #[test]
    fn test_preset_names_round_trip() {
        for preset in [Preset::Calm, Preset::Spinning, Preset::Elastic] {
            assert_eq!(Preset::from_str(preset.as_str()), Some(preset));
        }
        assert_eq!(Preset::from_str("SPIN"), Some(Preset::Spinning));
        assert_eq!(Preset::from_str("wobbly"), None);
    }

    #[test]
    fn test_ball_must_fit_inside_inradius() {
        let settings = Settings {
            circumradius: 100.0,
            sides: 4,
            ball_radius: 71.0, // inradius ≈ 70.7
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SimError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad = [
            Settings { sides: 2, ..Settings::default() },
            Settings { circumradius: 0.0, ..Settings::default() },
            Settings { ball_radius: 0.0, ..Settings::default() },
            Settings { restitution: 1.2, ..Settings::default() },
            Settings { drag: -0.1, ..Settings::default() },
            Settings { gravity: f32::NAN, ..Settings::default() },
            Settings { kick_min: 10.0, kick_max: 5.0, ..Settings::default() },
            Settings { ball_start: Vec2::new(190.0, 0.0), ..Settings::default() },
        ];
        for settings in bad {
            assert!(settings.validate().is_err(), "{settings:?}");
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "sides": 5, "restitution": 0.5 }"#).unwrap();
        assert_eq!(settings.sides, 5);
        assert_eq!(settings.restitution, 0.5);
        assert_eq!(settings.circumradius, DEFAULT_CIRCUMRADIUS);
    }

    #[test]
    fn test_from_json_reports_parse_and_geometry_errors() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "sides": 1 }"#),
            Err(SettingsError::Invalid(SimError::InvalidGeometry { .. }))
        ));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("roto_bounce_settings_{}.json", std::process::id()));
        let settings = Settings {
            sides: 7,
            angular_velocity: -0.75,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Settings::load("/nonexistent/roto_bounce.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
