//! The spinning polygon that holds the ball

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{inradius, regular_polygon_vertices, vertex_ring};
use crate::error::SimError;
use crate::wrap_angle;

/// A regular polygon rotating rigidly about its own center
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotatingContainer {
    center: Vec2,
    circumradius: f32,
    sides: u32,
    /// Current rotation (radians, kept in [0, 2π))
    rotation: f32,
    /// Spin rate (radians per second, positive is counter-clockwise in math orientation)
    pub angular_velocity: f32,
}

impl RotatingContainer {
    pub fn new(
        center: Vec2,
        circumradius: f32,
        sides: u32,
        rotation: f32,
        angular_velocity: f32,
    ) -> Result<Self, SimError> {
        // Validates sides, radius, finiteness and edge length in one place
        regular_polygon_vertices(center, circumradius, rotation, sides)?;
        if !angular_velocity.is_finite() {
            return Err(SimError::geometry(format!(
                "angular velocity must be finite, got {angular_velocity}"
            )));
        }
        Ok(Self {
            center,
            circumradius,
            sides,
            rotation: wrap_angle(rotation),
            angular_velocity,
        })
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn circumradius(&self) -> f32 {
        self.circumradius
    }

    #[inline]
    pub fn sides(&self) -> u32 {
        self.sides
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Distance from center to the middle of each edge
    #[inline]
    pub fn inradius(&self) -> f32 {
        inradius(self.circumradius, self.sides)
    }

    /// Rotate by the current angular velocity over `dt`
    pub fn advance(&mut self, dt: f32) {
        if self.angular_velocity != 0.0 {
            self.rotation = wrap_angle(self.rotation + self.angular_velocity * dt);
        }
    }

    /// Current vertex positions, counter-clockwise
    pub fn vertices(&self) -> Vec<Vec2> {
        vertex_ring(self.center, self.circumradius, self.rotation, self.sides)
    }

    /// Velocity of the container material at `point` due to rotation: ω × (point - center)
    #[inline]
    pub fn wall_velocity_at(&self, point: Vec2) -> Vec2 {
        self.angular_velocity * (point - self.center).perp()
    }
}
