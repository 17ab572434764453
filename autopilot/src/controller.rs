use dynamics::Actuators;
use pid::{GainSet, PIDError, DEFAULT_MAX_INTEGRAL, DEFAULT_MAX_OUTPUT, PID};
use serde::{Deserialize, Serialize};

use crate::{Attitude, ControlInput};

/// Limits shared by all four loops
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub max_output: f32,
    pub max_integral: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            max_output: DEFAULT_MAX_OUTPUT,
            max_integral: DEFAULT_MAX_INTEGRAL,
        }
    }
}

/// Four independent PID loops turning setpoints into actuator commands.
///
/// Pitch, roll and yaw close on the measured angle. The altitude loop is fed the
/// throttle setpoint directly as its error, so it shapes the pilot's throttle rather
/// than holding a target altitude.
#[derive(Debug, Clone)]
pub struct AttitudeController {
    pitch: PID,
    roll: PID,
    yaw: PID,
    altitude: PID,
}

impl Default for AttitudeController {
    fn default() -> Self {
        Self::with_gains(&GainSet::default())
    }
}

impl AttitudeController {
    pub fn new(gains: &GainSet, config: &ControllerConfig) -> Result<Self, PIDError> {
        gains.validate()?;
        let build = |gains| PID::with_limits(gains, config.max_integral, config.max_output);
        Ok(Self {
            pitch: build(gains.pitch)?,
            roll: build(gains.roll)?,
            yaw: build(gains.yaw)?,
            altitude: build(gains.altitude)?,
        })
    }

    fn with_gains(gains: &GainSet) -> Self {
        Self {
            pitch: PID::new(gains.pitch),
            roll: PID::new(gains.roll),
            yaw: PID::new(gains.yaw),
            altitude: PID::new(gains.altitude),
        }
    }

    /// Run all four loops for one tick.
    ///
    /// Setpoints are sanitized first. A non-finite measurement makes that axis output 0.
    pub fn update(&mut self, attitude: &Attitude, input: &ControlInput, dt: f32) -> Actuators {
        let input = input.sanitized();

        Actuators {
            pitch: self.pitch.update(input.pitch - attitude.pitch, dt),
            roll: self.roll.update(input.roll - attitude.roll, dt),
            yaw: self.yaw.update(input.yaw - attitude.yaw, dt),
            throttle: self.altitude.update(input.throttle, dt),
        }
    }

    /// Swap in a new gain set without touching loop history.
    ///
    /// The whole set is validated first; on error nothing changes.
    pub fn update_gains(&mut self, gains: &GainSet) -> Result<(), PIDError> {
        gains.validate()?;

        self.pitch.set_gains(gains.pitch);
        self.roll.set_gains(gains.roll);
        self.yaw.set_gains(gains.yaw);
        self.altitude.set_gains(gains.altitude);
        log::debug!("gains updated: {gains:?}");
        Ok(())
    }

    pub fn gains(&self) -> GainSet {
        GainSet {
            pitch: self.pitch.gains(),
            roll: self.roll.gains(),
            yaw: self.yaw.gains(),
            altitude: self.altitude.gains(),
        }
    }

    /// Zero the integral and previous error of every loop.
    pub fn reset(&mut self) {
        self.pitch.reset();
        self.roll.reset();
        self.yaw.reset();
        self.altitude.reset();
    }

    /// Integral term of each loop, in (pitch, roll, yaw, altitude) order
    pub fn integrals(&self) -> [f32; 4] {
        [
            self.pitch.integral(),
            self.roll.integral(),
            self.yaw.integral(),
            self.altitude.integral(),
        ]
    }
}
