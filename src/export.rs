//! CSV and JSON export of projection results
//!
//! Field-by-field rendering only; number formatting for display happens in
//! whatever consumes these files.

use crate::projection::{ProjectionConfig, ProjectionInput, ProjectionResult, ProjectionSnapshot};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error during export: {0}")]
    Io(#[from] std::io::Error),
}

/// JSON export document
#[derive(Debug, Serialize)]
pub struct ProjectionExport<'a> {
    pub exported_at: DateTime<Utc>,
    pub input: &'a ProjectionInput,
    pub config: &'a ProjectionConfig,
    pub snapshots: &'a [ProjectionSnapshot],
}

/// Write one CSV row per snapshot, with a header row
pub fn write_csv<W: Write>(writer: W, result: &ProjectionResult) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for snapshot in &result.snapshots {
        wtr.serialize(snapshot)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the input, config and snapshots as pretty JSON stamped with the current time
///
/// Infinite ratios are written as `null`.
pub fn write_json<W: Write>(writer: W, result: &ProjectionResult) -> Result<(), ExportError> {
    write_json_at(writer, result, Utc::now())
}

pub fn write_json_at<W: Write>(
    writer: W,
    result: &ProjectionResult,
    exported_at: DateTime<Utc>,
) -> Result<(), ExportError> {
    let doc = ProjectionExport {
        exported_at,
        input: &result.input,
        config: &result.config,
        snapshots: &result.snapshots,
    };
    serde_json::to_writer_pretty(writer, &doc)?;
    Ok(())
}
