//! Named scenario sets projected side by side
//!
//! A scenario set is typically a best/base/worst case spread of the same
//! company: one starting balance, several burn assumptions.

use crate::projection::{
    ProjectionConfig, ProjectionEngine, ProjectionError, ProjectionInput, ProjectionResult,
};
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

/// One named projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub input: ProjectionInput,
    #[serde(default)]
    pub config: ProjectionConfig,
}

/// Collection of scenarios loaded from JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioSet {
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

#[derive(Debug, Error)]
pub enum ScenarioLoadError {
    #[error("failed to open scenario file {path}: {source}")]
    Open { path: String, source: std::io::Error },

    #[error("invalid scenario JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ScenarioSet {
    pub fn from_json_str(json: &str) -> Result<Self, ScenarioLoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScenarioLoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ScenarioLoadError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Build variants of `base` with its periodic delta scaled
    ///
    /// Each `(label, multiplier)` becomes a scenario named
    /// `"{name_prefix} {label}"`, all sharing `config`.
    pub fn spread(
        base: &ProjectionInput,
        config: ProjectionConfig,
        name_prefix: &str,
        multipliers: &[(&str, f64)],
    ) -> Self {
        let scenarios = multipliers
            .iter()
            .map(|(label, multiplier)| Scenario {
                name: format!("{} {}", name_prefix, label),
                input: ProjectionInput {
                    periodic_delta: base.periodic_delta * multiplier,
                    ..*base
                },
                config,
            })
            .collect();
        Self { scenarios }
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

/// Result of projecting one scenario
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub name: String,
    pub result: Result<ProjectionResult, ProjectionError>,
}

/// Projects every scenario of a set in parallel
#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioRunner;

impl ScenarioRunner {
    pub fn new() -> Self {
        Self
    }

    /// Outcomes come back in the same order as `set.scenarios`
    pub fn run(&self, set: &ScenarioSet) -> Vec<ScenarioOutcome> {
        info!("Running {} scenarios", set.len());

        let outcomes: Vec<ScenarioOutcome> = set
            .scenarios
            .par_iter()
            .map(|scenario| ScenarioOutcome {
                name: scenario.name.clone(),
                result: ProjectionEngine::new(scenario.config).run(&scenario.input),
            })
            .collect();

        for outcome in &outcomes {
            if let Err(e) = &outcome.result {
                warn!("Scenario '{}' failed: {}", outcome.name, e);
            }
        }

        outcomes
    }
}
