use core::f32::consts::{FRAC_PI_2, FRAC_PI_4};

use serde::{Deserialize, Serialize};

use crate::error::{check_range, DynamicsError, DynamicsResult};

/// Physical constants and limits of the simplified rigid body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicsConfig {
    /// Vehicle mass in kg
    pub mass: f32,

    /// Gravitational acceleration in m/s^2
    pub gravity: f32,

    /// Quadratic drag coefficient, drag = -coef * v * |v|
    pub drag_coefficient: f32,

    /// Thrust in N per unit of throttle command
    pub thrust_gain: f32,

    /// Offset added to the throttle command before scaling by `thrust_gain`
    pub thrust_baseline: f32,

    /// Angular acceleration in rad/s^2 per unit of attitude command
    pub angular_gain: f32,

    /// Multiplier applied to angular velocity every tick
    pub angular_damping: f32,

    /// Largest pitch/roll magnitude in radians
    pub max_tilt: f32,

    /// Lowest altitude (hover floor) in meters
    pub floor: f32,

    /// Highest altitude in meters
    pub ceiling: f32,

    /// Half side of the square horizontal flight area, centred on the origin
    pub half_extent: f32,

    /// Largest time step in seconds; longer steps are shortened to this
    pub max_dt: f32,

    /// Scale from wind vector to applied force
    pub wind_coupling: f32,

    /// Velocity multiplier applied on ground contact
    pub ground_damping: f32,

    /// Altitude at session start and after a reset
    pub initial_altitude: f32,
}

impl Default for DynamicsConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            gravity: 9.81,
            drag_coefficient: 0.05,
            thrust_gain: 20.0,
            thrust_baseline: 0.0,
            angular_gain: 4.0,
            angular_damping: 0.98,
            max_tilt: FRAC_PI_4,
            floor: 0.5,
            ceiling: 100.0,
            half_extent: 50.0,
            max_dt: 0.05,
            wind_coupling: 0.5,
            ground_damping: 0.8,
            initial_altitude: 5.0,
        }
    }
}

impl DynamicsConfig {
    /// Smallest accepted `max_dt`
    pub const MIN_STEP: f32 = 0.02;
    /// Largest accepted `max_dt`
    pub const MAX_STEP: f32 = 0.1;

    pub fn validate(&self) -> DynamicsResult<()> {
        check_range("mass", self.mass, f32::MIN_POSITIVE, f32::MAX)?;
        check_range("gravity", self.gravity, 0.0, 100.0)?;
        check_range("drag_coefficient", self.drag_coefficient, 0.0, 10.0)?;
        check_range("thrust_gain", self.thrust_gain, 0.0, 10_000.0)?;
        check_range("thrust_baseline", self.thrust_baseline, -1.0, 1.0)?;
        check_range("angular_gain", self.angular_gain, 0.0, 100.0)?;
        check_range("angular_damping", self.angular_damping, 0.0, 1.0)?;
        check_range("max_tilt", self.max_tilt, f32::MIN_POSITIVE, FRAC_PI_2)?;
        check_range("floor", self.floor, -10_000.0, 10_000.0)?;
        check_range("ceiling", self.ceiling, -10_000.0, 10_000.0)?;
        check_range("half_extent", self.half_extent, f32::MIN_POSITIVE, 100_000.0)?;
        check_range("max_dt", self.max_dt, Self::MIN_STEP, Self::MAX_STEP)?;
        check_range("wind_coupling", self.wind_coupling, 0.0, 10.0)?;
        check_range("ground_damping", self.ground_damping, 0.0, 1.0)?;

        if self.floor >= self.ceiling {
            return Err(DynamicsError::InvalidAltitudeBand {
                floor: self.floor,
                ceiling: self.ceiling,
            });
        }
        check_range("initial_altitude", self.initial_altitude, self.floor, self.ceiling)
    }

    /// Throttle command that balances gravity when level
    pub fn hover_throttle(&self) -> f32 {
        if self.thrust_gain > 0.0 {
            self.mass * self.gravity / self.thrust_gain - self.thrust_baseline
        } else {
            f32::INFINITY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(DynamicsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = DynamicsConfig { mass: 0.0, ..Default::default() };
        assert!(matches!(config.validate(), Err(DynamicsError::OutOfRange { parameter: "mass", .. })));

        let config = DynamicsConfig { max_dt: 0.5, ..Default::default() };
        assert!(matches!(config.validate(), Err(DynamicsError::OutOfRange { parameter: "max_dt", .. })));

        let config = DynamicsConfig { drag_coefficient: f32::NAN, ..Default::default() };
        assert!(matches!(config.validate(), Err(DynamicsError::NonFinite { parameter: "drag_coefficient", .. })));

        let config = DynamicsConfig { floor: 10.0, ceiling: 5.0, initial_altitude: 7.0, ..Default::default() };
        assert_eq!(
            config.validate(),
            Err(DynamicsError::InvalidAltitudeBand { floor: 10.0, ceiling: 5.0 })
        );

        let config = DynamicsConfig { initial_altitude: 0.0, ..Default::default() };
        assert!(config.validate().is_err(), "initial altitude below the floor should be rejected");
    }

    #[test]
    fn test_hover_throttle() {
        let config = DynamicsConfig::default();
        let hover = config.hover_throttle();
        assert!((hover * config.thrust_gain - config.mass * config.gravity).abs() < 1e-4);
    }
}
