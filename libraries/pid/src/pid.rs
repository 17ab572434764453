// Single-axis PID loop with clamped integral and bounded output
use thiserror::Error;

use crate::gains::{Axis, GainField, Gains};

/// Smallest time step used for the integral and derivative terms.
pub const MIN_DT: f32 = 1e-3;
/// Largest time step used for the integral and derivative terms. Longer frame gaps are
/// treated as this value so a stalled host does not produce a derivative spike.
pub const MAX_DT: f32 = 0.1;
/// Default symmetric bound on the accumulated error integral.
pub const DEFAULT_MAX_INTEGRAL: f32 = 10.0;
/// Default symmetric bound on the loop output.
pub const DEFAULT_MAX_OUTPUT: f32 = 2.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PIDError {
    #[error("{axis}.{field} value {value} is not a valid number")]
    NonFiniteGain {
        axis: Axis,
        field: GainField,
        value: f32,
    },

    #[error("{axis}.{field} value {value} is outside [{min}, {max}]")]
    GainOutOfRange {
        axis: Axis,
        field: GainField,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("Invalid max value: {0} must be positive")]
    InvalidMaxValue(String),
}

#[derive(Debug, Clone)]
pub struct PID {
    gains: Gains,

    last_error: f32,
    integral: f32,
    max_output: f32,
    max_integral: f32,
}

impl Default for PID {
    fn default() -> Self {
        Self::new(Gains::default())
    }
}

impl PID {
    /// Create a new PID loop with the given gains and the default limits
    /// (output ±2, integral ±10).
    pub fn new(gains: Gains) -> Self {
        Self {
            gains,
            last_error: 0.0,
            integral: 0.0,
            max_output: DEFAULT_MAX_OUTPUT,
            max_integral: DEFAULT_MAX_INTEGRAL,
        }
    }

    /// Create a PID loop with explicit output and integral bounds.
    ///
    /// # Arguments
    ///
    /// * `gains` - Proportional, integral and derivative gains
    /// * `max_integral` - Symmetric bound on the accumulated error integral
    /// * `max_output` - Symmetric bound on the output
    pub fn with_limits(gains: Gains, max_integral: f32, max_output: f32) -> Result<Self, PIDError> {
        let mut pid = Self::new(gains);
        pid.set_max_integral(max_integral)?;
        pid.set_max_output(max_output)?;
        Ok(pid)
    }

    pub fn gains(&self) -> Gains {
        self.gains
    }

    pub fn integral(&self) -> f32 {
        self.integral
    }

    pub fn last_error(&self) -> f32 {
        self.last_error
    }

    pub fn max_output(&self) -> f32 {
        self.max_output
    }

    pub fn max_integral(&self) -> f32 {
        self.max_integral
    }

    /// Replace the gains, keeping the integral and previous error (bumpless transfer).
    pub fn set_gains(&mut self, gains: Gains) {
        self.gains = gains;
    }

    pub fn set_max_output(&mut self, max_output: f32) -> Result<&mut Self, PIDError> {
        if !max_output.is_finite() || max_output <= 0.0 {
            return Err(PIDError::InvalidMaxValue(format!("max_output value {max_output}")));
        }

        self.max_output = max_output;
        Ok(self)
    }

    pub fn set_max_integral(&mut self, max_integral: f32) -> Result<&mut Self, PIDError> {
        if !max_integral.is_finite() || max_integral <= 0.0 {
            return Err(PIDError::InvalidMaxValue(format!("max_integral value {max_integral}")));
        }

        self.max_integral = max_integral;
        // Keep the invariant when the bound shrinks
        self.integral = self.integral.clamp(-max_integral, max_integral);
        Ok(self)
    }

    /// Advance the loop by one tick and return the bounded output.
    ///
    /// A non-finite `error` or `dt` returns 0.0 and leaves the loop state untouched.
    pub fn update(&mut self, error: f32, dt: f32) -> f32 {
        if !error.is_finite() || !dt.is_finite() {
            return 0.0;
        }

        let dt = dt.clamp(MIN_DT, MAX_DT);
        let Gains { kp, ki, kd } = self.gains;

        self.integral = (self.integral + error * dt).clamp(-self.max_integral, self.max_integral);
        let derivative = (error - self.last_error) / dt;
        self.last_error = error;

        let output = kp * error + ki * self.integral + kd * derivative;
        output.clamp(-self.max_output, self.max_output)
    }

    pub fn reset(&mut self) {
        self.last_error = 0.0;
        self.integral = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pid() {
        let mut pid = PID::new(Gains::new(1.0, 0.1, 0.01));
        // p = 1.0, i = 0.1 * 0.1 = 0.01, d = 0.01 * 1.0 / 0.1 = 0.1
        let output = pid.update(1.0, 0.1);
        assert_relative_eq!(output, 1.11, epsilon = 1e-5);
    }

    #[test]
    fn test_pid_reset() {
        let mut pid = PID::new(Gains::new(1.0, 0.1, 0.01));
        pid.update(1.0, 0.1);
        pid.reset();
        assert_eq!(pid.last_error(), 0.0);
        assert_eq!(pid.integral(), 0.0);
    }

    #[test]
    fn test_integral_is_clamped() {
        let mut pid = PID::new(Gains::new(0.0, 1.0, 0.0));
        for _ in 0..10_000 {
            pid.update(5.0, 0.1);
            assert!(pid.integral() <= DEFAULT_MAX_INTEGRAL, "integral {} escaped", pid.integral());
        }
        assert_eq!(pid.integral(), DEFAULT_MAX_INTEGRAL);

        for _ in 0..10_000 {
            pid.update(-5.0, 0.1);
        }
        assert_eq!(pid.integral(), -DEFAULT_MAX_INTEGRAL);
    }

    #[test]
    fn test_output_is_clamped() {
        let mut pid = PID::new(Gains::new(100.0, 10.0, 10.0));
        assert_eq!(pid.update(1.0, 0.01), DEFAULT_MAX_OUTPUT);
        pid.reset();
        assert_eq!(pid.update(-1.0, 0.01), -DEFAULT_MAX_OUTPUT);
    }

    #[test]
    fn test_dt_is_capped() {
        // A 5 second frame gap integrates as 0.1 s
        let mut pid = PID::new(Gains::new(0.0, 1.0, 0.0));
        let output = pid.update(1.0, 5.0);
        assert_relative_eq!(output, 0.1, epsilon = 1e-6);

        // A zero dt is floored instead of dividing by zero
        let mut pid = PID::new(Gains::new(0.0, 0.0, 0.001));
        let output = pid.update(1.0, 0.0);
        assert!(output.is_finite());
        assert_relative_eq!(output, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_steady_state_holds_integral() {
        let mut pid = PID::new(Gains::new(2.0, 0.5, 0.1));
        for _ in 0..20 {
            pid.update(1.0, 0.05);
        }
        let held = pid.integral();

        // Error is exactly zero from here on: the integral stops moving and the output
        // settles on the integral contribution alone
        pid.update(0.0, 0.05);
        let mut output = 0.0;
        for _ in 0..50 {
            output = pid.update(0.0, 0.05);
            assert_eq!(pid.integral(), held);
        }
        assert_relative_eq!(output, 0.5 * held, epsilon = 1e-6);
    }

    #[test]
    fn test_set_gains_is_bumpless() {
        let mut pid = PID::new(Gains::new(1.0, 1.0, 0.0));
        for _ in 0..5 {
            pid.update(1.0, 0.1);
        }
        let integral = pid.integral();
        let last_error = pid.last_error();

        pid.set_gains(Gains::new(3.0, 0.2, 0.4));
        assert_eq!(pid.integral(), integral, "set_gains must keep the integral");
        assert_eq!(pid.last_error(), last_error, "set_gains must keep the previous error");
        assert_eq!(pid.gains(), Gains::new(3.0, 0.2, 0.4));
    }

    #[test]
    fn test_invalid_update_inputs() {
        let mut pid = PID::new(Gains::new(1.0, 0.1, 0.01));

        let output = pid.update(f32::NAN, 0.1);
        assert_eq!(output, 0.0, "Output should be 0.0 with NaN error");

        let output = pid.update(1.0, f32::INFINITY);
        assert_eq!(output, 0.0, "Output should be 0.0 with infinite dt");
        assert_eq!(pid.integral(), 0.0, "Rejected input must not touch the integral");

        let output = pid.update(1.0, 0.1);
        assert!(output > 0.0, "Output should be positive with valid inputs");
    }

    #[test]
    fn test_limits() {
        let mut pid = PID::with_limits(Gains::new(1.0, 1.0, 0.0), 2.0, 3.0)
            .expect("Valid limits should not cause an error");
        assert_eq!(pid.max_integral(), 2.0);
        assert_eq!(pid.max_output(), 3.0);

        for _ in 0..100 {
            pid.update(1.0, 0.1);
        }
        assert_eq!(pid.integral(), 2.0);
        assert_eq!(pid.update(1.0, 0.1), 3.0);

        pid.set_max_integral(1.0).expect("Valid max_integral should not cause an error");
        assert_eq!(pid.integral(), 1.0, "Shrinking the bound clamps the integral");

        assert!(pid.set_max_output(-1.0).is_err(), "Negative max_output should return error");
        assert!(pid.set_max_integral(f32::NAN).is_err(), "NaN max_integral should return error");
        assert!(PID::with_limits(Gains::default(), 0.0, 2.0).is_err());
    }
}
