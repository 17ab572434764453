//! Attitude control and the simulation session built around it.
//!
//! [`AttitudeController`] runs four PID loops (pitch, roll, yaw, altitude) over the
//! measured [`Attitude`]. [`Simulation`] owns a controller together with the vehicle
//! state, the integrator and the wind sources, and is what a host ticks.

mod attitude;
mod config;
mod control;
mod controller;
mod error;
mod simulation;

pub use attitude::Attitude;
pub use config::SimConfig;
pub use control::ControlInput;
pub use controller::{AttitudeController, ControllerConfig};
pub use error::SimulationError;
pub use simulation::Simulation;

pub use dynamics::{Actuators, DynamicsConfig, KinematicState};
pub use pid::{Axis, GainField, GainSet, Gains, PIDError};
pub use tuning::{CompileError, ParseError, Telemetry};
pub use wind::{Variability, WindSource, WindSourceId};
