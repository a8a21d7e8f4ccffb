//! Simulation tick
//!
//! One tick, strictly in order: apply between-tick input, rotate the
//! container, integrate the ball, then resolve contacts against the freshly
//! rotated vertices. Resolving against last tick's vertices would reintroduce
//! the stationary-wall error.

use glam::Vec2;

use super::collision::{Resolution, resolve};
use super::state::{SimPhase, SimState};

/// Input commands applied at the start of a tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Set container spin (radians per second)
    pub angular_velocity: Option<f32>,
    /// Add to container spin
    pub spin_delta: f32,
    /// Velocity impulse for the ball
    pub impulse: Option<Vec2>,
    /// Random impulse from the seeded RNG
    pub kick: bool,
    /// Restore the starting configuration
    pub reset: bool,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    /// Clear inputs that must only apply once
    pub fn clear_one_shots(&mut self) {
        self.spin_delta = 0.0;
        self.impulse = None;
        self.kick = false;
        self.reset = false;
        self.pause = false;
    }
}

/// Advance the simulation by `dt` seconds
///
/// Returns the contact report, or `None` when no physics ran (paused, or a
/// `dt` that is not positive and finite).
pub fn tick(state: &mut SimState, input: &TickInput, dt: f32) -> Option<Resolution> {
    if input.pause {
        state.phase = match state.phase {
            SimPhase::Running => SimPhase::Paused,
            SimPhase::Paused => SimPhase::Running,
        };
        log::info!("Simulation {:?}", state.phase);
    }

    if input.reset {
        state.reset();
    }

    apply_input(state, input);

    if state.phase == SimPhase::Paused {
        return None;
    }
    if !dt.is_finite() || dt <= 0.0 {
        log::debug!("Skipping tick with dt={dt}");
        return None;
    }

    state.time_ticks += 1;

    state.container.advance(dt);
    state
        .ball
        .integrate(dt, state.settings.gravity, state.settings.drag);

    let vertices = state.container.vertices();
    let resolution = resolve(
        &mut state.ball,
        &vertices,
        &state.container,
        state.settings.restitution,
    );
    Some(resolution)
}

fn apply_input(state: &mut SimState, input: &TickInput) {
    let container = &mut state.container;
    if let Some(omega) = input.angular_velocity {
        if omega.is_finite() {
            container.angular_velocity = omega;
        } else {
            log::warn!("Ignoring non-finite angular velocity {omega}");
        }
    }
    if input.spin_delta != 0.0 && input.spin_delta.is_finite() {
        container.angular_velocity += input.spin_delta;
        log::info!("Container spin: {:.2} rad/s", container.angular_velocity);
    }

    if let Some(impulse) = input.impulse.filter(|i| i.is_finite()) {
        state.ball.apply_impulse(impulse);
    }
    if input.kick {
        let kick = state.random_kick();
        state.ball.apply_impulse(kick);
        log::debug!("Kick {kick:?}");
    }
}
