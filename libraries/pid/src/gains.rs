use core::fmt;
use core::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::pid::PIDError;

/// Accepted proportional gain range
pub const KP_RANGE: RangeInclusive<f32> = 0.0..=100.0;
/// Accepted integral gain range
pub const KI_RANGE: RangeInclusive<f32> = 0.0..=10.0;
/// Accepted derivative gain range
pub const KD_RANGE: RangeInclusive<f32> = 0.0..=10.0;

/// One of the four independently controlled axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Pitch,
    Roll,
    Yaw,
    Altitude,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Pitch, Axis::Roll, Axis::Yaw, Axis::Altitude];

    pub fn name(self) -> &'static str {
        match self {
            Axis::Pitch => "pitch",
            Axis::Roll => "roll",
            Axis::Yaw => "yaw",
            Axis::Altitude => "altitude",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|axis| axis.name() == name)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the three gains of a loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GainField {
    Kp,
    Ki,
    Kd,
}

impl GainField {
    pub const ALL: [GainField; 3] = [GainField::Kp, GainField::Ki, GainField::Kd];

    pub fn name(self) -> &'static str {
        match self {
            GainField::Kp => "kp",
            GainField::Ki => "ki",
            GainField::Kd => "kd",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            GainField::Kp => KP_RANGE,
            GainField::Ki => KI_RANGE,
            GainField::Kd => KD_RANGE,
        }
    }
}

impl fmt::Display for GainField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Proportional, integral and derivative gains of a single loop
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Gains {
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
}

impl Gains {
    pub const fn new(kp: f32, ki: f32, kd: f32) -> Self {
        Self { kp, ki, kd }
    }

    pub fn get(&self, field: GainField) -> f32 {
        match field {
            GainField::Kp => self.kp,
            GainField::Ki => self.ki,
            GainField::Kd => self.kd,
        }
    }

    pub fn set(&mut self, field: GainField, value: f32) {
        match field {
            GainField::Kp => self.kp = value,
            GainField::Ki => self.ki = value,
            GainField::Kd => self.kd = value,
        }
    }

    /// Check every gain is finite and inside its accepted range.
    pub fn validate(&self, axis: Axis) -> Result<(), PIDError> {
        for field in GainField::ALL {
            let value = self.get(field);
            if !value.is_finite() {
                return Err(PIDError::NonFiniteGain { axis, field, value });
            }
            let range = field.range();
            if !range.contains(&value) {
                return Err(PIDError::GainOutOfRange {
                    axis,
                    field,
                    value,
                    min: *range.start(),
                    max: *range.end(),
                });
            }
        }
        Ok(())
    }
}

/// Gains for all four axes. Always replaced as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GainSet {
    pub pitch: Gains,
    pub roll: Gains,
    pub yaw: Gains,
    pub altitude: Gains,
}

impl Default for GainSet {
    /// | axis     | kp  | ki  | kd   |
    /// |----------|-----|-----|------|
    /// | pitch    | 2.5 | 0.1 | 0.05 |
    /// | roll     | 2.5 | 0.1 | 0.05 |
    /// | yaw      | 2.0 | 0.0 | 0.1  |
    /// | altitude | 5.0 | 1.0 | 1.0  |
    fn default() -> Self {
        Self {
            pitch: Gains::new(2.5, 0.1, 0.05),
            roll: Gains::new(2.5, 0.1, 0.05),
            yaw: Gains::new(2.0, 0.0, 0.1),
            altitude: Gains::new(5.0, 1.0, 1.0),
        }
    }
}

impl GainSet {
    pub fn axis(&self, axis: Axis) -> &Gains {
        match axis {
            Axis::Pitch => &self.pitch,
            Axis::Roll => &self.roll,
            Axis::Yaw => &self.yaw,
            Axis::Altitude => &self.altitude,
        }
    }

    pub fn axis_mut(&mut self, axis: Axis) -> &mut Gains {
        match axis {
            Axis::Pitch => &mut self.pitch,
            Axis::Roll => &mut self.roll,
            Axis::Yaw => &mut self.yaw,
            Axis::Altitude => &mut self.altitude,
        }
    }

    /// Validate all four axes, reporting the first offending axis and field.
    pub fn validate(&self) -> Result<(), PIDError> {
        Axis::ALL
            .into_iter()
            .try_for_each(|axis| self.axis(axis).validate(axis))
    }

    /// Render the set as `axis_field = value` lines, one per gain.
    pub fn to_script(&self) -> String {
        let mut script = String::new();
        for axis in Axis::ALL {
            let gains = self.axis(axis);
            for field in GainField::ALL {
                script.push_str(&format!("{axis}_{field} = {}\n", gains.get(field)));
            }
        }
        script
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GainSet::default().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_axis_and_field() {
        let mut set = GainSet::default();
        set.roll.kd = 12.0;
        match set.validate() {
            Err(PIDError::GainOutOfRange { axis, field, value, min, max }) => {
                assert_eq!(axis, Axis::Roll);
                assert_eq!(field, GainField::Kd);
                assert_eq!(value, 12.0);
                assert_eq!((min, max), (0.0, 10.0));
            }
            other => panic!("Expected GainOutOfRange, got {:?}", other),
        }

        let mut set = GainSet::default();
        set.altitude.kp = f32::NAN;
        assert!(matches!(
            set.validate(),
            Err(PIDError::NonFiniteGain { axis: Axis::Altitude, field: GainField::Kp, .. })
        ));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let gains = Gains::new(100.0, 10.0, 10.0);
        assert!(gains.validate(Axis::Pitch).is_ok());
        let gains = Gains::new(0.0, 0.0, 0.0);
        assert!(gains.validate(Axis::Pitch).is_ok());
        let gains = Gains::new(-0.1, 0.0, 0.0);
        assert!(gains.validate(Axis::Pitch).is_err());
    }

    #[test]
    fn test_error_message_names_axis_and_field() {
        let err = Gains::new(150.0, 0.0, 0.0).validate(Axis::Yaw).unwrap_err();
        assert_eq!(err.to_string(), "yaw.kp value 150 is outside [0, 100]");
    }

    #[test]
    fn test_names() {
        assert_eq!(Axis::from_name("altitude"), Some(Axis::Altitude));
        assert_eq!(Axis::from_name("throttle"), None);
        assert_eq!(GainField::from_name("ki"), Some(GainField::Ki));
        assert_eq!(GainField::from_name("kf"), None);
    }

    #[test]
    fn test_to_script_lists_every_gain() {
        let script = GainSet::default().to_script();
        assert_eq!(script.lines().count(), 12);
        assert!(script.starts_with("pitch_kp = 2.5\n"));
        assert!(script.contains("altitude_kd = 1\n"));
    }
}
