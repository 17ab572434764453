//! # Dynamics - simplified rigid-body integrator
//!
//! Advances the vehicle's kinematic state one tick at a time from actuator commands,
//! gravity, quadratic drag and an externally supplied wind vector.
//!
//! ## Frame
//!
//! World frame is y-up. Orientation is kept as Euler angles (pitch about x, yaw about y,
//! roll about z); pitch and roll are limited to `max_tilt`, yaw rotates freely.
//!
//! ## Guarantees
//!
//! - `Integrator::advance` is deterministic and never fails
//! - the time step is clamped to `DynamicsConfig::max_dt` before any computation
//! - altitude stays within `[floor, ceiling]` and horizontal position within
//!   `±half_extent`

mod config;
mod error;
mod integrator;
mod state;

pub use config::DynamicsConfig;
pub use error::{DynamicsError, DynamicsResult};
pub use integrator::{Actuators, Integrator};
pub use state::KinematicState;
