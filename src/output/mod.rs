//! Output module for audit reports
//!
//! This module handles:
//! - Batch statistics and their console rendering
//! - Serializing the full JSON report to a file or stdout

pub mod stats;

pub use stats::{print_statistics, BatchStatistics};

use crate::audit::PageAudit;
use crate::crawler::BatchRun;
use crate::LensError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// The JSON document written at the end of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub generated_at: DateTime<Utc>,
    pub statistics: BatchStatistics,
    pub audits: Vec<PageAudit>,
}

impl AuditReport {
    /// Wraps a finished batch run in a report stamped with the current time
    pub fn from_run(run: BatchRun) -> Self {
        Self {
            generated_at: Utc::now(),
            statistics: run.statistics,
            audits: run.audits,
        }
    }

    /// Serializes the report as JSON
    pub fn to_json(&self, pretty: bool) -> Result<String, LensError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Writes a report to `path`, or to stdout when no path is given
pub fn write_report(report: &AuditReport, path: Option<&Path>, pretty: bool) -> Result<(), LensError> {
    let json = report.to_json(pretty)?;

    match path {
        Some(path) => {
            std::fs::write(path, json)?;
            tracing::info!("Report written to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", json)?;
        }
    }

    Ok(())
}
