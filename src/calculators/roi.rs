//! ROI calculator

use crate::projection::{
    ProjectionConfig, ProjectionEngine, ProjectionError, ProjectionInput, ProjectionResult,
    DEFAULT_ROI_HORIZON_MONTHS,
};
use serde::{Deserialize, Serialize};

/// ROI page inputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiInputs {
    pub initial_investment: f64,

    /// Return earned in the first month (negative for a loss)
    pub monthly_return: f64,

    /// Month-over-month growth of the return, in percent
    #[serde(default)]
    pub return_growth_percent: f64,

    #[serde(default = "default_horizon")]
    pub horizon_months: i64,
}

fn default_horizon() -> i64 {
    DEFAULT_ROI_HORIZON_MONTHS
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoiSummary {
    pub final_value: f64,
    pub net_gain: f64,
    pub final_roi_percent: f64,
    /// Lowest value the investment reaches over the horizon
    pub low_point: f64,
}

impl RoiInputs {
    pub fn to_projection(&self) -> (ProjectionInput, ProjectionConfig) {
        let input = ProjectionInput::new(
            self.initial_investment,
            self.monthly_return,
            self.horizon_months,
        )
        .with_growth(self.return_growth_percent);
        (input, ProjectionConfig::roi())
    }

    pub fn project(&self) -> Result<ProjectionResult, ProjectionError> {
        let (input, config) = self.to_projection();
        ProjectionEngine::new(config).run(&input)
    }

    pub fn summary(&self) -> Result<RoiSummary, ProjectionError> {
        let result = self.project()?;
        Ok(RoiSummary::from_result(&result))
    }
}

impl RoiSummary {
    pub fn from_result(result: &ProjectionResult) -> Self {
        Self {
            final_value: result.final_value(),
            net_gain: result.total_change(),
            final_roi_percent: result.final_snapshot().map(|s| s.derived_ratio).unwrap_or(0.0),
            low_point: result.min_value(),
        }
    }
}
