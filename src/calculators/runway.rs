//! Runway calculator

use crate::projection::{
    ProjectionConfig, ProjectionEngine, ProjectionError, ProjectionInput, ProjectionResult,
    DEFAULT_RUNWAY_HORIZON_MONTHS,
};
use serde::{Deserialize, Serialize};

/// Runway page inputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunwayInputs {
    /// Cash on hand today
    pub cash_balance: f64,

    /// Monthly operating expenses
    pub monthly_expenses: f64,

    /// Monthly revenue
    #[serde(default)]
    pub monthly_revenue: f64,

    /// Month-over-month growth of the net burn, in percent
    #[serde(default)]
    pub burn_growth_percent: f64,

    #[serde(default = "default_horizon")]
    pub horizon_months: i64,
}

fn default_horizon() -> i64 {
    DEFAULT_RUNWAY_HORIZON_MONTHS
}

/// Runway page results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunwaySummary {
    /// Expenses less revenue
    pub net_burn: f64,
    /// Cash divided by today's net burn; `None` when not burning
    pub simple_runway_months: Option<f64>,
    /// First projected month with no cash left, if within the horizon
    pub months_until_depletion: Option<u32>,
    /// Cash left at the end of the horizon
    pub ending_cash: f64,
}

impl RunwayInputs {
    fn validate(&self) -> Result<(), ProjectionError> {
        ProjectionError::check_finite("cash_balance", self.cash_balance)?;
        ProjectionError::check_finite("monthly_expenses", self.monthly_expenses)?;
        ProjectionError::check_finite("monthly_revenue", self.monthly_revenue)?;
        Ok(())
    }

    pub fn net_burn(&self) -> f64 {
        self.monthly_expenses - self.monthly_revenue
    }

    /// Map onto the shared projection model
    pub fn to_projection(&self) -> Result<(ProjectionInput, ProjectionConfig), ProjectionError> {
        self.validate()?;
        let input =
            ProjectionInput::new(self.cash_balance, -self.net_burn(), self.horizon_months)
                .with_growth(self.burn_growth_percent);
        Ok((input, ProjectionConfig::runway()))
    }

    pub fn project(&self) -> Result<ProjectionResult, ProjectionError> {
        let (input, config) = self.to_projection()?;
        ProjectionEngine::new(config).run(&input)
    }

    pub fn summary(&self) -> Result<RunwaySummary, ProjectionError> {
        let result = self.project()?;
        Ok(self.summarize(&result))
    }

    /// Summarize a projection already produced from these inputs
    pub fn summarize(&self, result: &ProjectionResult) -> RunwaySummary {
        let net_burn = self.net_burn();

        RunwaySummary {
            net_burn,
            simple_runway_months: (net_burn > 0.0).then(|| self.cash_balance.max(0.0) / net_burn),
            months_until_depletion: result.depletion_period(),
            ending_cash: result.final_value(),
        }
    }
}
