//! Projection input and validation

use super::ProjectionError;
use serde::{Deserialize, Serialize};

/// Starting position and per-period change to project forward
///
/// Built fresh from form values on every calculation. The horizon is signed
/// so that negative user input survives parsing and is rejected here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInput {
    /// Initial cash or investment balance (negative means debt)
    pub starting_value: f64,

    /// Net change applied each period before growth
    /// Negative for a net burn, positive for net profit or return
    pub periodic_delta: f64,

    /// Per-period growth of the delta itself, in percent (5.0 = 5%)
    #[serde(default)]
    pub growth_rate_percent: f64,

    /// Number of periods to project
    pub horizon_periods: i64,
}

impl ProjectionInput {
    /// Create an input with no growth on the periodic delta
    pub fn new(starting_value: f64, periodic_delta: f64, horizon_periods: i64) -> Self {
        Self {
            starting_value,
            periodic_delta,
            growth_rate_percent: 0.0,
            horizon_periods,
        }
    }

    /// Set the per-period growth rate in percent
    pub fn with_growth(mut self, growth_rate_percent: f64) -> Self {
        self.growth_rate_percent = growth_rate_percent;
        self
    }

    /// Validate all fields, returning the horizon as a period count
    ///
    /// The horizon is checked first, then each magnitude in field order.
    pub fn validate(&self) -> Result<u32, ProjectionError> {
        let horizon = ProjectionError::check_horizon(self.horizon_periods)?;
        ProjectionError::check_finite("starting_value", self.starting_value)?;
        ProjectionError::check_finite("periodic_delta", self.periodic_delta)?;
        ProjectionError::check_finite("growth_rate_percent", self.growth_rate_percent)?;
        Ok(horizon)
    }

    /// Multiplier applied to the delta from one period to the next
    pub fn growth_factor(&self) -> f64 {
        1.0 + self.growth_rate_percent / 100.0
    }

    /// Delta applied in the given 1-based period
    ///
    /// Period 1 uses the un-grown delta; growth compounds from there.
    pub fn delta_for_period(&self, period: u32) -> f64 {
        let exponent = period.saturating_sub(1);
        self.periodic_delta * self.growth_factor().powf(f64::from(exponent))
    }
}
