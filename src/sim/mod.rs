//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Explicit owned state, passed into each tick
//! - Seeded RNG only
//! - Fixed pass bounds in the resolver
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod container;
pub mod frame;
pub mod geometry;
pub mod state;
pub mod stepper;
pub mod tick;

pub use ball::Ball;
pub use collision::{Contact, Resolution, apply_contact, detect_contact, resolve};
pub use container::RotatingContainer;
pub use frame::Frame;
pub use geometry::{Edge, closest_point_on_segment, regular_polygon_vertices};
pub use state::{RngState, SimPhase, SimState};
pub use stepper::FixedStepper;
pub use tick::{TickInput, tick};
