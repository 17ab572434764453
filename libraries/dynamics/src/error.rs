use thiserror::Error;

/// Errors raised while building an integrator configuration.
///
/// Stepping itself never fails: malformed numbers reaching `Integrator::advance` are
/// neutralised rather than reported.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DynamicsError {
    /// A parameter is NaN or infinite
    #[error("Configuration error: {parameter} value {value} is not a valid number")]
    NonFinite {
        /// Name of the offending parameter
        parameter: &'static str,
        value: f32,
    },

    /// A parameter is outside the range the integrator can handle
    #[error("Configuration error: {parameter} value {value} must be in [{min}, {max}]")]
    OutOfRange {
        /// Name of the offending parameter
        parameter: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    /// Floor and ceiling do not leave room to fly
    #[error("Configuration error: floor {floor} must be below ceiling {ceiling}")]
    InvalidAltitudeBand { floor: f32, ceiling: f32 },
}

/// Result type for dynamics configuration
pub type DynamicsResult<T> = Result<T, DynamicsError>;

pub(crate) fn check_range(parameter: &'static str, value: f32, min: f32, max: f32) -> DynamicsResult<()> {
    if !value.is_finite() {
        return Err(DynamicsError::NonFinite { parameter, value });
    }
    if value < min || value > max {
        return Err(DynamicsError::OutOfRange { parameter, value, min, max });
    }
    Ok(())
}
