//! Configuration errors
//!
//! The simulation itself is total once constructed; the only fallible step is
//! turning a `GameConfig` into a running `Simulation`.

use thiserror::Error;

/// Errors raised when game configuration invariants are violated.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("lane table must contain at least one lane")]
    EmptyLaneTable,
    #[error("{field} must be finite (got {value})")]
    NonFinite { field: &'static str, value: f32 },
    #[error("{field} must be greater than zero (got {value:.3})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative (got {value:.3})")]
    Negative { field: &'static str, value: f32 },
    #[error("{field}: minimum {min:.3} exceeds maximum {max:.3}")]
    IntervalOrder {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f32,
        max: f32,
        value: f32,
    },
    #[error("player start lane {index} is out of range for {lanes} lanes")]
    StartLaneOutOfRange { index: usize, lanes: usize },
    #[error("obstacles per batch must be at least 1")]
    ZeroObstaclesPerBatch,
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

/// Reject NaN and infinities.
pub(crate) fn ensure_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field, value });
    }
    Ok(())
}

/// Reject zero, negative and non-finite values.
pub(crate) fn ensure_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    ensure_finite(field, value)?;
    if value <= 0.0 {
        return Err(ConfigError::NotPositive { field, value });
    }
    Ok(())
}

/// Reject negative and non-finite values.
pub(crate) fn ensure_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

/// Reject `min > max` for a pair of bounds.
pub(crate) fn ensure_ordered(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min > max {
        return Err(ConfigError::IntervalOrder { field, min, max });
    }
    Ok(())
}
