//! Fixed-timestep driver
//!
//! Turns variable wall-clock frame times into whole `SIM_DT` ticks, the way
//! a render loop feeds the simulation.

use super::state::SimState;
use super::tick::{TickInput, tick};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Accumulates frame time and runs fixed ticks
#[derive(Debug, Clone)]
pub struct FixedStepper {
    accumulator: f32,
    pub dt: f32,
    pub max_substeps: u32,
}

impl Default for FixedStepper {
    fn default() -> Self {
        Self {
            accumulator: 0.0,
            dt: SIM_DT,
            max_substeps: MAX_SUBSTEPS,
        }
    }
}

impl FixedStepper {
    /// Feed one frame's elapsed time and run the ticks it covers
    ///
    /// One-shot inputs are consumed by the first tick. Returns the number of
    /// ticks run.
    pub fn advance(&mut self, state: &mut SimState, input: &mut TickInput, frame_dt: f32) -> u32 {
        let frame_dt = if frame_dt.is_finite() { frame_dt.max(0.0) } else { 0.0 };
        if frame_dt > MAX_FRAME_DT {
            log::debug!("Clamping frame time {frame_dt:.3}s to {MAX_FRAME_DT}s");
        }
        self.accumulator += frame_dt.min(MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < self.max_substeps {
            tick(state, input, self.dt);
            self.accumulator -= self.dt;
            substeps += 1;

            // Clear one-shot inputs after processing
            input.clear_one_shots();
        }

        if self.accumulator >= self.dt {
            log::debug!(
                "Dropping {:.3}s of simulation time after {} substeps",
                self.accumulator,
                substeps
            );
            self.accumulator %= self.dt;
        }
        substeps
    }

    /// Fraction of a tick left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }
}
