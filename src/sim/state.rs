//! Simulation state
//!
//! The whole world lives in one owned `SimState`, passed by `&mut` into
//! each tick. Nothing here is global.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::collision::edge_contact;
use super::container::RotatingContainer;
use super::frame::Frame;
use super::geometry::edges;
use crate::error::SimError;
use crate::settings::Settings;

/// Whether ticks advance physics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    Running,
    Paused,
}

/// RNG state wrapper for serialization
///
/// Each draw reseeds from `(seed, draws)`, so a saved state replays the same
/// kick sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub draws: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, draws: 0 }
    }

    /// RNG for the next draw
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::new(self.seed, self.draws.wrapping_mul(2).wrapping_add(1));
        self.draws += 1;
        rng
    }
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    /// Validated configuration this state was built from
    pub settings: Settings,
    pub container: RotatingContainer,
    pub ball: Ball,
    pub phase: SimPhase,
    /// Physics ticks run since start or last reset
    pub time_ticks: u64,
    pub rng_state: RngState,
    initial_container: RotatingContainer,
    initial_ball: Ball,
}

impl SimState {
    /// Build a simulation, rejecting settings that cannot hold the ball
    pub fn new(settings: Settings) -> Result<Self, SimError> {
        settings.validate()?;

        let container = RotatingContainer::new(
            settings.center,
            settings.circumradius,
            settings.sides,
            settings.initial_rotation,
            settings.angular_velocity,
        )?;
        let ball = Ball::new(
            settings.center + settings.ball_start,
            settings.ball_velocity,
            settings.ball_radius,
        );

        log::info!(
            "Simulation created: {}-gon r={} ω={} ball r={} e={}",
            settings.sides,
            settings.circumradius,
            settings.angular_velocity,
            settings.ball_radius,
            settings.restitution
        );

        Ok(Self {
            rng_state: RngState::new(settings.seed),
            settings,
            initial_container: container.clone(),
            initial_ball: ball,
            container,
            ball,
            phase: SimPhase::Running,
            time_ticks: 0,
        })
    }

    /// Restore ball and container to their starting configuration
    pub fn reset(&mut self) {
        self.container = self.initial_container.clone();
        self.ball = self.initial_ball;
        self.time_ticks = 0;
        self.rng_state = RngState::new(self.settings.seed);
        log::info!("Simulation reset");
    }

    /// Replace the settings and restart; on error the current state is untouched
    pub fn reconfigure(&mut self, settings: Settings) -> Result<(), SimError> {
        let phase = self.phase;
        *self = Self::new(settings)?;
        self.phase = phase;
        log::info!("Simulation reconfigured");
        Ok(())
    }

    /// Random velocity change: uniform direction, magnitude within the kick range
    pub fn random_kick(&mut self) -> Vec2 {
        let mut rng = self.rng_state.next_rng();
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let magnitude = rng.random_range(self.settings.kick_min..=self.settings.kick_max);
        Vec2::new(angle.cos(), angle.sin()) * magnitude
    }

    /// Current container vertices
    pub fn vertices(&self) -> Vec<Vec2> {
        self.container.vertices()
    }

    /// Deepest overlap between the ball and any wall (0 when clear)
    pub fn max_penetration(&self) -> f32 {
        let vertices = self.vertices();
        edges(&vertices)
            .filter_map(|edge| edge_contact(&self.ball, &edge, &self.container))
            .map(|contact| contact.penetration)
            .fold(0.0, f32::max)
    }

    /// Read-only snapshot for renderers
    pub fn frame(&self) -> Frame {
        Frame::capture(self)
    }
}
