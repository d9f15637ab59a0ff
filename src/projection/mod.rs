//! Projection engine for cash balance and investment projections

mod error;
mod input;
mod ratio;
mod engine;
mod snapshot;

pub use error::ProjectionError;
pub use input::ProjectionInput;
pub use ratio::{DerivedRatio, NoBurnRatio, RatioContext};
pub use engine::{project, ClampMode, ProjectionConfig, ProjectionEngine};
pub use snapshot::{ProjectionResult, ProjectionSnapshot};

// ============================================================================
// Default Horizons
// ============================================================================
// Calculators that don't ask for a horizon project over these periods.
// - Burn and runway pages chart two years of months
// - The ROI page charts three years of months
// Any horizon above MAX_HORIZON_PERIODS is rejected before snapshots are
// allocated.

/// Default horizon for burn rate and runway projections (24 months)
pub const DEFAULT_RUNWAY_HORIZON_MONTHS: i64 = 24;

/// Default horizon for ROI projections (36 months)
pub const DEFAULT_ROI_HORIZON_MONTHS: i64 = 36;

/// Longest accepted horizon (100 years of monthly periods)
pub const MAX_HORIZON_PERIODS: u32 = 1200;
