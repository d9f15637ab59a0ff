//! Derived ratio interpretations
//!
//! Each calculator page reports a different secondary metric next to the
//! balance: months of runway left, ROI percentage, or nothing at all. The
//! engine evaluates the selected interpretation once per period, always
//! against that period's (possibly grown) delta.

use serde::{Deserialize, Serialize};

/// Per-period values handed to a ratio interpretation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioContext {
    pub period: u32,
    pub starting_value: f64,
    pub cumulative_value: f64,
    pub period_delta: f64,
}

/// What to report as runway when there is no net burn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoBurnRatio {
    /// Report `f64::INFINITY`: the balance is never depleted
    #[default]
    Infinite,
    /// Report 0
    Zero,
}

impl NoBurnRatio {
    pub fn value(self) -> f64 {
        match self {
            NoBurnRatio::Infinite => f64::INFINITY,
            NoBurnRatio::Zero => 0.0,
        }
    }
}

/// Interpretation of `ProjectionSnapshot::derived_ratio`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DerivedRatio {
    /// No secondary metric; the ratio is always 0
    #[default]
    None,

    /// Periods of runway left at the current period's burn
    RunwayPeriods {
        #[serde(default)]
        no_burn: NoBurnRatio,
    },

    /// Percentage gain or loss relative to the starting value
    RoiPercent,

    /// Caller-supplied interpretation (not serializable)
    #[serde(skip)]
    Custom(fn(RatioContext) -> f64),
}

impl DerivedRatio {
    /// Runway ratio reporting infinity when nothing is burning
    pub fn runway() -> Self {
        DerivedRatio::RunwayPeriods { no_burn: NoBurnRatio::Infinite }
    }

    /// Whether an infinite ratio is a legitimate value rather than an overflow
    pub fn allows_infinite(&self) -> bool {
        matches!(self, DerivedRatio::RunwayPeriods { .. } | DerivedRatio::Custom(_))
    }

    pub fn evaluate(&self, ctx: RatioContext) -> f64 {
        match self {
            DerivedRatio::None => 0.0,
            DerivedRatio::RunwayPeriods { no_burn } => runway_periods(ctx, *no_burn),
            DerivedRatio::RoiPercent => roi_percent(ctx),
            DerivedRatio::Custom(f) => f(ctx),
        }
    }
}

/// Remaining balance divided by the current burn
///
/// A burn is a negative delta. A zero or positive delta means nothing is
/// being consumed, so the sentinel is reported instead of dividing.
fn runway_periods(ctx: RatioContext, no_burn: NoBurnRatio) -> f64 {
    let burn = -ctx.period_delta;
    if burn <= 0.0 {
        return no_burn.value();
    }
    ctx.cumulative_value.max(0.0) / burn
}

/// ROI in percent; 0 when there was no starting investment to measure against
fn roi_percent(ctx: RatioContext) -> f64 {
    if ctx.starting_value == 0.0 {
        return 0.0;
    }
    (ctx.cumulative_value - ctx.starting_value) / ctx.starting_value.abs() * 100.0
}
