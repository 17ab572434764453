use nalgebra as na;
use serde::{Deserialize, Serialize};

use crate::config::DynamicsConfig;
use crate::error::DynamicsResult;
use crate::state::KinematicState;

/// Actuator commands for one tick, as produced by the attitude controller
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actuators {
    pub pitch: f32,
    pub roll: f32,
    pub yaw: f32,
    pub throttle: f32,
}

impl Actuators {
    pub fn new(pitch: f32, roll: f32, yaw: f32, throttle: f32) -> Self {
        Self { pitch, roll, yaw, throttle }
    }

    /// Replace non-finite commands with zero
    fn sanitized(self) -> Self {
        Self {
            pitch: finite_or_zero(self.pitch),
            roll: finite_or_zero(self.roll),
            yaw: finite_or_zero(self.yaw),
            throttle: finite_or_zero(self.throttle),
        }
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Semi-implicit Euler integrator for the simplified rigid body
#[derive(Debug, Clone)]
pub struct Integrator {
    config: DynamicsConfig,
}

impl Integrator {
    pub fn new(config: DynamicsConfig) -> DynamicsResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DynamicsConfig {
        &self.config
    }

    /// State at session start and after a reset
    pub fn initial_state(&self) -> KinematicState {
        KinematicState::at_altitude(self.config.initial_altitude)
    }

    /// Time step actually integrated for a caller-supplied elapsed time
    pub fn effective_dt(&self, dt: f32) -> f32 {
        if dt.is_finite() && dt > 0.0 {
            dt.min(self.config.max_dt)
        } else {
            0.0
        }
    }

    /// Advance `state` by one tick.
    ///
    /// Deterministic and total: `dt` is clamped to `max_dt`, a non-positive or non-finite
    /// `dt` returns the state unchanged, and non-finite commands or wind components are
    /// treated as zero.
    pub fn advance(
        &self,
        state: KinematicState,
        commands: &Actuators,
        wind: &na::Vector3<f32>,
        dt: f32,
    ) -> KinematicState {
        let dt = self.effective_dt(dt);
        if dt == 0.0 {
            return state;
        }

        let cfg = &self.config;
        let commands = commands.sanitized();
        let wind = wind.map(finite_or_zero);
        let mut next = state;

        // Angular: (pitch, yaw, roll) commands drive the matching rates
        let angular_acceleration =
            na::Vector3::new(commands.pitch, commands.yaw, commands.roll) * cfg.angular_gain;
        next.angular_velocity = (next.angular_velocity + angular_acceleration * dt) * cfg.angular_damping;
        next.orientation += next.angular_velocity * dt;
        self.limit_tilt(&mut next);

        // Linear
        let gravity = na::Vector3::new(0.0, -cfg.gravity * cfg.mass, 0.0);
        let thrust_magnitude = cfg.thrust_gain * (commands.throttle + cfg.thrust_baseline).max(0.0);
        let thrust = next.up() * thrust_magnitude;
        let drag = -next.velocity * next.velocity.norm() * cfg.drag_coefficient;
        let wind_force = wind * cfg.wind_coupling;

        let acceleration = (gravity + thrust + drag + wind_force) / cfg.mass;
        next.velocity += acceleration * dt;
        next.position += next.velocity * dt;

        self.limit_altitude(&mut next);
        self.limit_horizontal(&mut next);
        next
    }

    fn limit_tilt(&self, state: &mut KinematicState) {
        let max_tilt = self.config.max_tilt;
        // x = pitch, z = roll; yaw (y) rotates freely
        for axis in [0, 2] {
            let angle = state.orientation[axis];
            if angle.abs() > max_tilt {
                state.orientation[axis] = angle.clamp(-max_tilt, max_tilt);
                state.angular_velocity[axis] = 0.0;
            }
        }
    }

    fn limit_altitude(&self, state: &mut KinematicState) {
        let cfg = &self.config;
        if state.position.y < cfg.floor {
            // Soft contact: settle on the floor instead of bouncing
            state.position.y = cfg.floor;
            state.velocity.y = state.velocity.y.max(0.0);
            state.velocity *= cfg.ground_damping;
            state.angular_velocity *= cfg.ground_damping;
        } else if state.position.y > cfg.ceiling {
            state.position.y = cfg.ceiling;
            state.velocity.y = state.velocity.y.min(0.0);
        }
    }

    fn limit_horizontal(&self, state: &mut KinematicState) {
        let half_extent = self.config.half_extent;
        for axis in [0, 2] {
            let coordinate = state.position[axis];
            if coordinate > half_extent {
                state.position[axis] = half_extent;
                state.velocity[axis] = state.velocity[axis].min(0.0);
            } else if coordinate < -half_extent {
                state.position[axis] = -half_extent;
                state.velocity[axis] = state.velocity[axis].max(0.0);
            }
        }
    }
}
