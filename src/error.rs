use thiserror::Error;

/// A type alias for results that only have [ProjectileError] for errors.
pub type Result<T> = std::result::Result<T, ProjectileError>;

/// Errors raised while evaluating a projectile model.
///
/// None of these are recoverable inside the library; they are reported back to
/// whoever supplied the parameters.
#[derive(Debug, Error)]
pub enum ProjectileError {
    #[error("invalid {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("projectile never reaches the ground (uy² + 2gh = {discriminant})")]
    NoGroundImpact { discriminant: f64 },

    #[error("integration did not terminate within {steps} steps")]
    StepLimit { steps: usize },

    #[error("root not bracketed: f({a}) = {fa}, f({b}) = {fb}")]
    RootNotBracketed { a: f64, fa: f64, b: f64, fb: f64 },

    #[error("unknown task {0:?}")]
    UnknownTask(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ProjectileError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        ProjectileError::InvalidParameter { name, value, reason }
    }
}

/// Reject non-finite values.
pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ProjectileError::invalid(name, value, "must be a finite number"))
    }
}

/// Reject non-finite values and anything `<= 0`.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<f64> {
    ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ProjectileError::invalid(name, value, "must be greater than zero"))
    }
}

/// Reject non-finite values and anything `< 0`.
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64> {
    ensure_finite(name, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ProjectileError::invalid(name, value, "must not be negative"))
    }
}
