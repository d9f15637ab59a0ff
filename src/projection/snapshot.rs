//! Per-period snapshots and projection results

use super::{ProjectionConfig, ProjectionInput};
use serde::Serialize;

/// One period's computed state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionSnapshot {
    /// 1-based period index
    pub period: u32,
    /// Running balance after this period's delta
    pub cumulative_value: f64,
    /// Delta applied this period, after growth
    pub period_delta: f64,
    /// Secondary metric selected by `ProjectionConfig::ratio`
    pub derived_ratio: f64,
}

/// Complete output of a projection run
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionResult {
    pub input: ProjectionInput,
    pub config: ProjectionConfig,
    pub snapshots: Vec<ProjectionSnapshot>,
}

impl ProjectionResult {
    pub fn final_snapshot(&self) -> Option<&ProjectionSnapshot> {
        self.snapshots.last()
    }

    /// Balance after the last period (the starting value for an empty result)
    pub fn final_value(&self) -> f64 {
        self.final_snapshot()
            .map(|s| s.cumulative_value)
            .unwrap_or(self.input.starting_value)
    }

    /// Net movement over the whole horizon
    pub fn total_change(&self) -> f64 {
        self.final_value() - self.input.starting_value
    }

    /// First period in which a positive starting balance is used up
    pub fn depletion_period(&self) -> Option<u32> {
        if self.input.starting_value <= 0.0 {
            return None;
        }
        self.snapshots
            .iter()
            .find(|s| s.cumulative_value <= 0.0)
            .map(|s| s.period)
    }

    /// Lowest balance reached, including the starting value
    pub fn min_value(&self) -> f64 {
        self.snapshots
            .iter()
            .map(|s| s.cumulative_value)
            .fold(self.input.starting_value, f64::min)
    }

    /// Highest balance reached, including the starting value
    pub fn peak_value(&self) -> f64 {
        self.snapshots
            .iter()
            .map(|s| s.cumulative_value)
            .fold(self.input.starting_value, f64::max)
    }
}
