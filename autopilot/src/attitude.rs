use dynamics::KinematicState;

/// Measured quantities the attitude controller closes its loops on
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Attitude {
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,

    pub altitude: f32,
}

impl From<&KinematicState> for Attitude {
    fn from(state: &KinematicState) -> Self {
        Attitude {
            roll: state.roll(),
            pitch: state.pitch(),
            yaw: state.yaw(),
            altitude: state.altitude(),
        }
    }
}
