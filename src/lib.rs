//! Roto Bounce - a ball bouncing inside a spinning convex polygon
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, container, ball, collisions, tick)
//! - `settings`: Physics configuration with JSON load/save
//! - `error`: Error taxonomy for invalid geometry and settings I/O

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{SettingsError, SimError};
pub use settings::{Preset, Settings};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz keeps per-tick travel well under the ball radius)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame time accepted by the stepper (seconds); longer stalls are clamped
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Resolver passes per tick (one contact per pass)
    pub const MAX_RESOLVE_PASSES: u32 = 4;
    /// Allowed overlap (units) before a contact counts as unresolved
    pub const PENETRATION_SLOP: f32 = 1e-3;
    /// Shortest edge accepted as non-degenerate
    pub const MIN_EDGE_LENGTH: f32 = 1e-4;

    /// Container defaults
    pub const DEFAULT_CIRCUMRADIUS: f32 = 200.0;
    pub const DEFAULT_SIDES: u32 = 6;
    pub const DEFAULT_ANGULAR_VELOCITY: f32 = 0.5; // radians per second

    /// Ball defaults
    pub const DEFAULT_BALL_RADIUS: f32 = 15.0;
    /// Downward acceleration (units/s², +y is down as on screen)
    pub const DEFAULT_GRAVITY: f32 = 500.0;
    pub const DEFAULT_RESTITUTION: f32 = 0.9;

    /// Random kick magnitude range (units/s)
    pub const DEFAULT_KICK_MIN: f32 = 150.0;
    pub const DEFAULT_KICK_MAX: f32 = 450.0;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
