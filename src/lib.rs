//! Startup Projection - cash runway, burn rate and ROI projections
//!
//! This library provides:
//! - A pure projection engine compounding a per-period delta over a horizon
//! - Burn rate, runway and ROI calculators mapped onto that engine
//! - Parallel best/base/worst scenario runs
//! - CSV/JSON export and an injectable key-value store for saved inputs

pub mod projection;
pub mod calculators;
pub mod scenario;
pub mod export;
pub mod store;

// Re-export commonly used types
pub use projection::{
    project, ClampMode, DerivedRatio, ProjectionConfig, ProjectionEngine, ProjectionError,
    ProjectionInput, ProjectionResult, ProjectionSnapshot,
};
pub use scenario::{ScenarioRunner, ScenarioSet};
