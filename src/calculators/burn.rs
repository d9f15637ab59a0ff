//! Burn rate calculator
//!
//! Derives the monthly burn from two cash balances taken `months` apart,
//! then projects the ending balance forward at that burn.

use crate::projection::{
    ProjectionConfig, ProjectionEngine, ProjectionError, ProjectionInput, ProjectionResult,
    DEFAULT_RUNWAY_HORIZON_MONTHS,
};
use serde::{Deserialize, Serialize};

/// Burn rate page inputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurnRateInputs {
    /// Cash at the start of the measured window
    pub starting_cash: f64,

    /// Cash at the end of the measured window
    pub ending_cash: f64,

    /// Length of the measured window in months
    pub months: i64,

    /// Average monthly revenue over the window
    #[serde(default)]
    pub monthly_revenue: f64,

    /// Months to project the ending balance forward
    #[serde(default = "default_horizon")]
    pub horizon_months: i64,
}

fn default_horizon() -> i64 {
    DEFAULT_RUNWAY_HORIZON_MONTHS
}

/// Headline burn metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BurnRateMetrics {
    /// Cash consumed per month: (starting - ending) / months
    pub gross_burn: f64,
    /// Gross burn less revenue
    pub net_burn: f64,
    /// Months the ending balance lasts at the net burn; `None` when not burning
    pub runway_months: Option<f64>,
}

impl BurnRateInputs {
    fn validate(&self) -> Result<u32, ProjectionError> {
        let months = ProjectionError::check_horizon(self.months)?;
        ProjectionError::check_finite("starting_cash", self.starting_cash)?;
        ProjectionError::check_finite("ending_cash", self.ending_cash)?;
        ProjectionError::check_finite("monthly_revenue", self.monthly_revenue)?;
        Ok(months)
    }

    pub fn metrics(&self) -> Result<BurnRateMetrics, ProjectionError> {
        let months = self.validate()?;
        let gross_burn = ProjectionError::check_finite(
            "gross_burn",
            (self.starting_cash - self.ending_cash) / f64::from(months),
        )?;
        let net_burn =
            ProjectionError::check_finite("net_burn", gross_burn - self.monthly_revenue)?;
        let runway_months = (net_burn > 0.0).then(|| self.ending_cash.max(0.0) / net_burn);

        Ok(BurnRateMetrics { gross_burn, net_burn, runway_months })
    }

    /// Map onto the shared projection model
    pub fn to_projection(&self) -> Result<(ProjectionInput, ProjectionConfig), ProjectionError> {
        let metrics = self.metrics()?;
        Ok(self.projection_for(&metrics))
    }

    fn projection_for(&self, metrics: &BurnRateMetrics) -> (ProjectionInput, ProjectionConfig) {
        let input = ProjectionInput::new(self.ending_cash, -metrics.net_burn, self.horizon_months);
        (input, ProjectionConfig::runway())
    }

    pub fn project(&self) -> Result<ProjectionResult, ProjectionError> {
        self.run().map(|(_, result)| result)
    }

    /// Headline metrics together with the projection they drive
    pub fn run(&self) -> Result<(BurnRateMetrics, ProjectionResult), ProjectionError> {
        let metrics = self.metrics()?;
        let (input, config) = self.projection_for(&metrics);
        let result = ProjectionEngine::new(config).run(&input)?;
        Ok((metrics, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> BurnRateInputs {
        BurnRateInputs {
            starting_cash: 500_000.0,
            ending_cash: 380_000.0,
            months: 6,
            monthly_revenue: 5_000.0,
            horizon_months: 24,
        }
    }

    #[test]
    fn test_metrics() {
        let m = inputs().metrics().expect("valid inputs");
        assert_eq!(m.gross_burn, 20_000.0);
        assert_eq!(m.net_burn, 15_000.0);
        assert_eq!(m.runway_months, Some(380_000.0 / 15_000.0));
    }

    #[test]
    fn test_revenue_covering_burn_has_no_runway_limit() {
        let m = BurnRateInputs { monthly_revenue: 25_000.0, ..inputs() }
            .metrics()
            .expect("valid inputs");
        assert_eq!(m.net_burn, -5_000.0);
        assert_eq!(m.runway_months, None);
    }

    #[test]
    fn test_zero_months_rejected() {
        let err = BurnRateInputs { months: 0, ..inputs() }.metrics().unwrap_err();
        assert_eq!(err, ProjectionError::InvalidHorizon { horizon: 0 });
    }

    #[test]
    fn test_overflowing_burn_rejected() {
        let err = BurnRateInputs {
            starting_cash: 1e308,
            ending_cash: -1e308,
            months: 1,
            ..inputs()
        }
        .metrics()
        .unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidMagnitude { field: "gross_burn", .. }));

        let err = BurnRateInputs {
            starting_cash: 1e308,
            ending_cash: 0.0,
            months: 1,
            monthly_revenue: -1e308,
            horizon_months: 12,
        }
        .metrics()
        .unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidMagnitude { field: "net_burn", .. }));
    }

    #[test]
    fn test_run_returns_metrics_and_projection() {
        let (metrics, result) = inputs().run().expect("valid inputs");
        assert_eq!(metrics.net_burn, 15_000.0);
        assert_eq!(result.input.periodic_delta, -15_000.0);
        assert_eq!(result.snapshots.len(), 24);
        assert_eq!(result.snapshots[0].cumulative_value, 365_000.0);
    }

    #[test]
    fn test_project_depletes_at_runway() {
        let result = BurnRateInputs {
            starting_cash: 100_000.0,
            ending_cash: 60_000.0,
            months: 2,
            monthly_revenue: 0.0,
            horizon_months: 5,
        }
        .project()
        .expect("valid inputs");

        let values: Vec<f64> = result.snapshots.iter().map(|s| s.cumulative_value).collect();
        assert_eq!(values, vec![40_000.0, 20_000.0, 0.0, 0.0, 0.0]);
        assert_eq!(result.depletion_period(), Some(3));
    }

    #[test]
    fn test_horizon_default() {
        let parsed: BurnRateInputs = serde_json::from_str(
            r#"{"starting_cash": 1000.0, "ending_cash": 800.0, "months": 2}"#,
        )
        .expect("burn json");
        assert_eq!(parsed.horizon_months, DEFAULT_RUNWAY_HORIZON_MONTHS);
        assert_eq!(parsed.monthly_revenue, 0.0);
    }
}
