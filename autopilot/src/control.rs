use serde::{Deserialize, Serialize};

/// Normalized setpoints for one tick, each in [-1, 1]
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlInput {
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub throttle: f32,
}

impl ControlInput {
    pub fn new(roll: f32, pitch: f32, yaw: f32, throttle: f32) -> Self {
        ControlInput {
            roll,
            pitch,
            yaw,
            throttle,
        }
    }

    /// Clamp every setpoint into [-1, 1]; non-finite values become 0
    pub fn sanitized(&self) -> Self {
        ControlInput {
            roll: Self::normalize(self.roll),
            pitch: Self::normalize(self.pitch),
            yaw: Self::normalize(self.yaw),
            throttle: Self::normalize(self.throttle),
        }
    }

    fn normalize(value: f32) -> f32 {
        if value.is_finite() {
            value.clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized() {
        let input = ControlInput::new(3.0, -7.0, f32::NAN, 0.25).sanitized();
        assert_eq!(input, ControlInput::new(1.0, -1.0, 0.0, 0.25));
    }
}
