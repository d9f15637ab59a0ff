//! Page-specific calculators built on the projection engine
//!
//! Each calculator takes the fields its page asks for, reports that page's
//! headline numbers, and maps itself onto a `ProjectionInput` plus the
//! matching `ProjectionConfig`.

mod burn;
mod runway;
mod roi;

pub use burn::{BurnRateInputs, BurnRateMetrics};
pub use runway::{RunwayInputs, RunwaySummary};
pub use roi::{RoiInputs, RoiSummary};
