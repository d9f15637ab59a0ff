//! Core projection loop

use super::{
    DerivedRatio, ProjectionError, ProjectionInput, ProjectionResult, ProjectionSnapshot,
    RatioContext,
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// How the running balance behaves once it would drop below zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClampMode {
    /// Cash depletion: the balance stops at zero
    AtZero,
    /// Profit/loss: the balance may go negative
    #[default]
    AllowNegative,
}

impl ClampMode {
    fn apply(self, value: f64) -> f64 {
        match self {
            ClampMode::AtZero => value.max(0.0),
            ClampMode::AllowNegative => value,
        }
    }
}

/// Configuration for a projection run
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ProjectionConfig {
    #[serde(default)]
    pub clamp: ClampMode,

    #[serde(default)]
    pub ratio: DerivedRatio,
}

impl ProjectionConfig {
    /// Cash-remaining modeling: clamp at zero, report runway periods
    pub fn runway() -> Self {
        Self {
            clamp: ClampMode::AtZero,
            ratio: DerivedRatio::runway(),
        }
    }

    /// Investment modeling: allow losses, report ROI percent
    pub fn roi() -> Self {
        Self {
            clamp: ClampMode::AllowNegative,
            ratio: DerivedRatio::RoiPercent,
        }
    }
}

/// Projection engine bound to one configuration
///
/// Holds no state between calls; the same input always produces the same
/// snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project `input` over its horizon
    ///
    /// Fails without producing any snapshots if the input is invalid, or if
    /// compounding pushes a delta, balance or ratio out of `f64` range.
    pub fn project(
        &self,
        input: &ProjectionInput,
    ) -> Result<Vec<ProjectionSnapshot>, ProjectionError> {
        let horizon = input.validate().inspect_err(|e| {
            warn!("Rejected projection input: {}", e);
        })?;

        debug!(
            "Projecting {} periods from {:.2} (delta {:.2}, growth {}%, clamp {:?})",
            horizon,
            input.starting_value,
            input.periodic_delta,
            input.growth_rate_percent,
            self.config.clamp
        );

        let mut snapshots = Vec::with_capacity(horizon as usize);
        let mut cumulative = input.starting_value;

        for period in 1..=horizon {
            let period_delta =
                check_computed(period, "period_delta", input.delta_for_period(period))?;
            // Checked before clamping: max(NaN, 0.0) would hide the overflow
            let unclamped =
                check_computed(period, "cumulative_value", cumulative + period_delta)?;
            cumulative = self.config.clamp.apply(unclamped);

            let derived_ratio = self.config.ratio.evaluate(RatioContext {
                period,
                starting_value: input.starting_value,
                cumulative_value: cumulative,
                period_delta,
            });
            let overflowed = derived_ratio.is_infinite() && !self.config.ratio.allows_infinite();
            if derived_ratio.is_nan() || overflowed {
                return Err(rejected(period, "derived_ratio", derived_ratio));
            }

            snapshots.push(ProjectionSnapshot {
                period,
                cumulative_value: cumulative,
                period_delta,
                derived_ratio,
            });
        }

        Ok(snapshots)
    }

    /// Project `input` and keep the input and configuration with the output
    pub fn run(&self, input: &ProjectionInput) -> Result<ProjectionResult, ProjectionError> {
        let snapshots = self.project(input)?;
        Ok(ProjectionResult {
            input: *input,
            config: self.config,
            snapshots,
        })
    }
}

fn check_computed(period: u32, field: &'static str, value: f64) -> Result<f64, ProjectionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(rejected(period, field, value))
    }
}

fn rejected(period: u32, field: &'static str, value: f64) -> ProjectionError {
    let err = ProjectionError::InvalidMagnitude { field, value };
    warn!("Projection overflowed in period {}: {}", period, err);
    err
}

/// Project `input` under `config`
pub fn project(
    input: &ProjectionInput,
    config: &ProjectionConfig,
) -> Result<Vec<ProjectionSnapshot>, ProjectionError> {
    ProjectionEngine::new(*config).project(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{NoBurnRatio, MAX_HORIZON_PERIODS};
    use approx::assert_relative_eq;

    fn values(snapshots: &[ProjectionSnapshot]) -> Vec<f64> {
        snapshots.iter().map(|s| s.cumulative_value).collect()
    }

    #[test]
    fn test_burn_rate_scenario() {
        let input = ProjectionInput::new(100_000.0, -20_000.0, 5);
        let snapshots = project(&input, &ProjectionConfig::runway()).expect("valid input");

        assert_eq!(values(&snapshots), vec![80_000.0, 60_000.0, 40_000.0, 20_000.0, 0.0]);
        let ratios: Vec<f64> = snapshots.iter().map(|s| s.derived_ratio).collect();
        assert_eq!(ratios, vec![4.0, 3.0, 2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_clamp_holds_at_zero() {
        let input = ProjectionInput::new(50_000.0, -20_000.0, 4);
        let snapshots = project(&input, &ProjectionConfig::runway()).expect("valid input");
        assert_eq!(values(&snapshots), vec![30_000.0, 10_000.0, 0.0, 0.0]);

        // Same input without clamping keeps going down
        let config = ProjectionConfig {
            clamp: ClampMode::AllowNegative,
            ..ProjectionConfig::runway()
        };
        let snapshots = project(&input, &config).expect("valid input");
        assert_eq!(values(&snapshots), vec![30_000.0, 10_000.0, -10_000.0, -30_000.0]);
        assert_eq!(snapshots[3].derived_ratio, 0.0);
    }

    #[test]
    fn test_roi_scenario() {
        let input = ProjectionInput::new(10_000.0, 1_000.0, 3).with_growth(5.0);
        let snapshots = project(&input, &ProjectionConfig::roi()).expect("valid input");

        let deltas = [1_000.0, 1_050.0, 1_102.5];
        let cumulative = [11_000.0, 12_050.0, 13_152.5];
        for (i, s) in snapshots.iter().enumerate() {
            assert_eq!(s.period, i as u32 + 1);
            assert_relative_eq!(s.period_delta, deltas[i], max_relative = 1e-12);
            assert_relative_eq!(s.cumulative_value, cumulative[i], max_relative = 1e-12);
        }
        assert_relative_eq!(snapshots[2].derived_ratio, 31.525, max_relative = 1e-9);
    }

    #[test]
    fn test_zero_delta_runway_is_infinite() {
        let input = ProjectionInput::new(25_000.0, 0.0, 6);
        let snapshots = project(&input, &ProjectionConfig::runway()).expect("valid input");
        assert!(snapshots.iter().all(|s| s.cumulative_value == 25_000.0));
        assert!(snapshots.iter().all(|s| s.derived_ratio == f64::INFINITY));

        let config = ProjectionConfig {
            clamp: ClampMode::AtZero,
            ratio: DerivedRatio::RunwayPeriods { no_burn: NoBurnRatio::Zero },
        };
        let snapshots = project(&input, &config).expect("valid input");
        assert!(snapshots.iter().all(|s| s.derived_ratio == 0.0));
    }

    #[test]
    fn test_invalid_horizon() {
        let engine = ProjectionEngine::new(ProjectionConfig::runway());
        for horizon in [0, -1, -12] {
            let input = ProjectionInput::new(100_000.0, -20_000.0, horizon);
            assert_eq!(engine.project(&input), Err(ProjectionError::InvalidHorizon { horizon }));
        }
    }

    #[test]
    fn test_invalid_magnitude() {
        let engine = ProjectionEngine::default();
        let input = ProjectionInput::new(f64::NAN, -20_000.0, 5);
        assert!(matches!(
            engine.project(&input),
            Err(ProjectionError::InvalidMagnitude { field: "starting_value", .. })
        ));
    }

    #[test]
    fn test_alternating_growth_overflow_is_rejected() {
        // Growth of -300% doubles the delta and flips its sign each period;
        // the delta leaves f64 range in period 1019
        let input = ProjectionInput::new(1_000.0, 100.0, 1_100).with_growth(-300.0);
        assert!(matches!(
            project(&input, &ProjectionConfig::roi()),
            Err(ProjectionError::InvalidMagnitude { field: "period_delta", value })
                if value.is_infinite()
        ));

        // Clamping must not turn the overflow into a zero balance
        assert!(matches!(
            project(&input, &ProjectionConfig::runway()),
            Err(ProjectionError::InvalidMagnitude { field: "period_delta", .. })
        ));

        // Shorter horizon stays in range and projects normally
        let short = ProjectionInput { horizon_periods: 1_000, ..input };
        let snapshots = project(&short, &ProjectionConfig::roi()).expect("in range");
        assert!(snapshots
            .iter()
            .all(|s| s.cumulative_value.is_finite() && s.derived_ratio.is_finite()));
    }

    #[test]
    fn test_balance_overflow_is_rejected() {
        let input = ProjectionInput::new(f64::MAX, f64::MAX, 2);
        assert!(matches!(
            project(&input, &ProjectionConfig::runway()),
            Err(ProjectionError::InvalidMagnitude { field: "cumulative_value", .. })
        ));
    }

    #[test]
    fn test_roi_overflow_is_rejected() {
        // Balance stays finite but the gain over a tiny negative start does not
        let input = ProjectionInput::new(-1e-300, 1e300, 1);
        assert!(matches!(
            project(&input, &ProjectionConfig::roi()),
            Err(ProjectionError::InvalidMagnitude { field: "derived_ratio", .. })
        ));
    }

    #[test]
    fn test_horizon_limit() {
        let input = ProjectionInput::new(1_000.0, -1.0, i64::from(MAX_HORIZON_PERIODS));
        let snapshots = project(&input, &ProjectionConfig::runway()).expect("at the limit");
        assert_eq!(snapshots.len(), MAX_HORIZON_PERIODS as usize);

        let horizon = i64::from(u32::MAX);
        let input = ProjectionInput::new(1_000.0, -1.0, horizon);
        assert_eq!(
            project(&input, &ProjectionConfig::runway()),
            Err(ProjectionError::InvalidHorizon { horizon })
        );
    }

    #[test]
    fn test_run_keeps_input_and_config() {
        let engine = ProjectionEngine::new(ProjectionConfig::runway());
        let input = ProjectionInput::new(100_000.0, -20_000.0, 6);
        let result = engine.run(&input).expect("valid input");

        assert_eq!(result.input, input);
        assert_eq!(result.config.clamp, ClampMode::AtZero);
        assert_eq!(result.snapshots.len(), 6);
        assert_eq!(result.depletion_period(), Some(5));
        assert_eq!(result.final_value(), 0.0);
    }

    #[test]
    fn test_config_defaults_from_json() {
        let config: ProjectionConfig = serde_json::from_str("{}").expect("empty config");
        assert_eq!(config.clamp, ClampMode::AllowNegative);
        assert!(matches!(config.ratio, DerivedRatio::None));

        let config: ProjectionConfig = serde_json::from_str(
            r#"{"clamp": "at_zero", "ratio": {"kind": "runway_periods", "no_burn": "zero"}}"#,
        )
        .expect("runway config");
        assert_eq!(config.clamp, ClampMode::AtZero);
        assert!(matches!(
            config.ratio,
            DerivedRatio::RunwayPeriods { no_burn: NoBurnRatio::Zero }
        ));
    }
}
