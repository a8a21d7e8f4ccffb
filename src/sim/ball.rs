//! The ball: a rigid circle under gravity

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A ball entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Semi-implicit Euler step: gravity (+y is down) into velocity, then velocity into position
    ///
    /// `drag` is a per-second linear coefficient; 0 disables it.
    pub fn integrate(&mut self, dt: f32, gravity: f32, drag: f32) {
        self.vel.y += gravity * dt;
        if drag > 0.0 {
            self.vel *= (1.0 - drag * dt).max(0.0);
        }
        self.pos += self.vel * dt;
    }

    /// Add an instantaneous velocity change
    #[inline]
    pub fn apply_impulse(&mut self, delta_v: Vec2) {
        self.vel += delta_v;
    }

    /// Kinetic energy for unit mass
    #[inline]
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.vel.length_squared()
    }

    /// Kinetic energy for unit mass, measured in a frame moving at `frame_vel`
    #[inline]
    pub fn relative_kinetic_energy(&self, frame_vel: Vec2) -> f32 {
        0.5 * (self.vel - frame_vel).length_squared()
    }
}
