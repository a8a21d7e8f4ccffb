//! Read-only snapshot handed to renderers after each tick

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::SimState;

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    /// Container rotation (radians)
    pub rotation: f32,
    /// Container vertices, counter-clockwise
    pub vertices: Vec<Vec2>,
    pub ball_pos: Vec2,
    pub ball_vel: Vec2,
    pub ball_radius: f32,
}

impl Frame {
    pub fn capture(state: &SimState) -> Self {
        Self {
            tick: state.time_ticks,
            rotation: state.container.rotation(),
            vertices: state.vertices(),
            ball_pos: state.ball.pos,
            ball_vel: state.ball.vel,
            ball_radius: state.ball.radius,
        }
    }

    /// Single-line JSON, for streaming to an external renderer
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
