use serde::{Deserialize, Serialize};

/// Read-only snapshot of the vehicle that scripts may refer to by name
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    /// Meters above the world origin
    pub altitude: f32,
    /// Magnitude of the linear velocity, m/s
    pub speed: f32,
    /// Radians
    pub pitch: f32,
    /// Radians
    pub roll: f32,
    /// Radians
    pub yaw: f32,
    /// Last throttle setpoint, [-1, 1]
    pub throttle: f32,
}

impl Telemetry {
    /// Names scripts can read
    pub const VARIABLES: [&'static str; 6] = ["altitude", "speed", "pitch", "roll", "yaw", "throttle"];

    pub fn get(&self, name: &str) -> Option<f32> {
        match name {
            "altitude" => Some(self.altitude),
            "speed" => Some(self.speed),
            "pitch" => Some(self.pitch),
            "roll" => Some(self.roll),
            "yaw" => Some(self.yaw),
            "throttle" => Some(self.throttle),
            _ => None,
        }
    }

    pub fn is_variable(name: &str) -> bool {
        Self::VARIABLES.contains(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variable_resolves() {
        let telemetry = Telemetry { altitude: 1.0, speed: 2.0, pitch: 3.0, roll: 4.0, yaw: 5.0, throttle: 6.0 };
        let values: Vec<f32> = Telemetry::VARIABLES.iter().filter_map(|name| telemetry.get(name)).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(telemetry.get("battery"), None);
        assert!(!Telemetry::is_variable("pitch_kp"));
    }
}
