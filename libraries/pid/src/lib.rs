mod gains;
mod pid;

pub use gains::{Axis, GainField, GainSet, Gains, KD_RANGE, KI_RANGE, KP_RANGE};
pub use pid::{PIDError, DEFAULT_MAX_INTEGRAL, DEFAULT_MAX_OUTPUT, MAX_DT, MIN_DT, PID};
