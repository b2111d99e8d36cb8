use thiserror::Error;

/// Errors raised while building attitude values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttitudeError {
    /// A component was NaN or infinite
    #[error("{component} is not finite: {value}")]
    NonFinite {
        /// Which angle was rejected (`roll`, `pitch` or `yaw`)
        component: &'static str,
        /// The rejected value
        value: f64,
    },
}

/// Type alias for Result with AttitudeError
pub type AttitudeResult<T> = Result<T, AttitudeError>;

/// Check that a single angle is usable
pub fn check_finite(component: &'static str, value: f64) -> AttitudeResult<f64> {
    if value.is_nan() || value.is_infinite() {
        Err(AttitudeError::NonFinite { component, value })
    } else {
        Ok(value)
    }
}
