//! Errors raised when a projection input or its computed values are rejected

use super::MAX_HORIZON_PERIODS;
use thiserror::Error;

/// Input or computed value rejected by the projection engine
///
/// Both variants are recoverable: correct the input and project again.
/// The engine never returns a partial sequence alongside one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error(
        "horizon must be between 1 and {max} periods, got {horizon}",
        max = MAX_HORIZON_PERIODS
    )]
    InvalidHorizon { horizon: i64 },

    #[error("{field} must be a finite number, got {value}")]
    InvalidMagnitude { field: &'static str, value: f64 },
}

impl ProjectionError {
    /// Check that a numeric field is finite
    pub(crate) fn check_finite(field: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::InvalidMagnitude { field, value })
        }
    }

    /// Check that a horizon lies in `1..=MAX_HORIZON_PERIODS`
    pub(crate) fn check_horizon(horizon: i64) -> Result<u32, Self> {
        if !(1..=i64::from(MAX_HORIZON_PERIODS)).contains(&horizon) {
            return Err(Self::InvalidHorizon { horizon });
        }
        Ok(horizon as u32)
    }
}
