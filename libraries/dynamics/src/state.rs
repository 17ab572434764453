use nalgebra as na;
use serde::{Deserialize, Serialize};

/// Kinematic state of the vehicle in a y-up world frame.
///
/// Angular quantities are stored with x = pitch (about world x), y = yaw (about world y)
/// and z = roll (about world z).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicState {
    /// Position in meters
    pub position: na::Vector3<f32>,

    /// Euler angles (pitch, yaw, roll) in radians
    pub orientation: na::Vector3<f32>,

    /// Linear velocity in meters per second
    pub velocity: na::Vector3<f32>,

    /// Angular velocity (pitch, yaw, roll rates) in radians per second
    pub angular_velocity: na::Vector3<f32>,
}

impl Default for KinematicState {
    fn default() -> Self {
        Self::at_altitude(0.0)
    }
}

impl KinematicState {
    /// Level and at rest above the origin
    pub fn at_altitude(altitude: f32) -> Self {
        Self {
            position: na::Vector3::new(0.0, altitude, 0.0),
            orientation: na::Vector3::zeros(),
            velocity: na::Vector3::zeros(),
            angular_velocity: na::Vector3::zeros(),
        }
    }

    pub fn altitude(&self) -> f32 {
        self.position.y
    }

    pub fn pitch(&self) -> f32 {
        self.orientation.x
    }

    pub fn yaw(&self) -> f32 {
        self.orientation.y
    }

    pub fn roll(&self) -> f32 {
        self.orientation.z
    }

    /// Magnitude of the linear velocity
    pub fn speed(&self) -> f32 {
        self.velocity.norm()
    }

    /// Rotation from body to world frame, applied yaw, then pitch, then roll
    pub fn rotation(&self) -> na::Rotation3<f32> {
        na::Rotation3::from_axis_angle(&na::Vector3::y_axis(), self.yaw())
            * na::Rotation3::from_axis_angle(&na::Vector3::x_axis(), self.pitch())
            * na::Rotation3::from_axis_angle(&na::Vector3::z_axis(), self.roll())
    }

    /// Body "up" expressed in the world frame
    pub fn up(&self) -> na::Vector3<f32> {
        self.rotation() * na::Vector3::y()
    }

    /// Check the state contains only finite values
    pub fn is_valid(&self) -> bool {
        [self.position, self.orientation, self.velocity, self.angular_velocity]
            .iter()
            .all(|v| v.iter().all(|c| c.is_finite()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use core::f32::consts::FRAC_PI_2;

    #[test]
    fn test_level_up_is_world_up() {
        let state = KinematicState::at_altitude(3.0);
        assert_eq!(state.altitude(), 3.0);
        assert_relative_eq!(state.up(), na::Vector3::y(), epsilon = 1e-6);
    }

    #[test]
    fn test_tilt_moves_up_vector() {
        let mut state = KinematicState::default();

        // Pitch rotates up toward -z/+z, roll toward -x/+x; both keep it unit length
        state.orientation = na::Vector3::new(0.3, 0.0, 0.0);
        let up = state.up();
        assert_relative_eq!(up.norm(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(up.y, 0.3f32.cos(), epsilon = 1e-6);
        assert_eq!(up.x, 0.0);

        state.orientation = na::Vector3::new(0.0, 0.0, 0.3);
        let up = state.up();
        assert_relative_eq!(up.y, 0.3f32.cos(), epsilon = 1e-6);
        assert_relative_eq!(up.z, 0.0, epsilon = 1e-6);

        // Yaw alone never tilts the thrust axis
        state.orientation = na::Vector3::new(0.0, FRAC_PI_2, 0.0);
        assert_relative_eq!(state.up(), na::Vector3::y(), epsilon = 1e-6);
    }

    #[test]
    fn test_is_valid() {
        let mut state = KinematicState::default();
        assert!(state.is_valid());
        state.velocity.x = f32::NAN;
        assert!(!state.is_valid());
    }
}
