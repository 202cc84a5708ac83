//! Statistics for a finished batch
//!
//! Computed once from the ordered audits after every chunk has settled.

use crate::audit::{AuditOutcome, PageAudit};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Batch run summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStatistics {
    /// Number of URLs submitted
    pub total: usize,

    /// Audits without an error
    pub successful: usize,

    /// Audits carrying an error, including fallback ones
    pub failed: usize,

    /// Failed audits that still recovered partial signals
    pub fallback: usize,

    /// Mean `parseTime` of successful audits in milliseconds, 0 if none succeeded
    pub average_parse_time: f64,

    /// Number of chunks processed
    pub chunks: usize,

    /// Number of inter-chunk delays slept
    pub delays_applied: usize,

    /// URLs whose audit carries an error, in input order
    pub failed_urls: Vec<String>,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl BatchStatistics {
    /// Tallies outcomes across a batch's audits
    pub fn from_audits(
        audits: &[PageAudit],
        chunks: usize,
        delays_applied: usize,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let mut successful = 0;
        let mut fallback = 0;
        let mut success_time: u64 = 0;
        let mut failed_urls = Vec::new();

        for audit in audits {
            match audit.outcome() {
                AuditOutcome::Analyzed => {
                    successful += 1;
                    success_time = success_time.saturating_add(audit.parse_time);
                }
                AuditOutcome::Fallback => {
                    fallback += 1;
                    failed_urls.push(audit.url.clone());
                }
                AuditOutcome::Failed => failed_urls.push(audit.url.clone()),
            }
        }

        let average_parse_time = if successful > 0 {
            success_time as f64 / successful as f64
        } else {
            0.0
        };

        Self {
            total: audits.len(),
            successful,
            failed: audits.len() - successful,
            fallback,
            average_parse_time,
            chunks,
            delays_applied,
            failed_urls,
            started_at,
            finished_at,
        }
    }

    /// Percentage of URLs fully analyzed
    pub fn success_rate(&self) -> f64 {
        if self.total > 0 {
            (self.successful as f64 / self.total as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Wall-clock duration of the run in milliseconds
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }

    /// Emits the end-of-batch summary through `tracing`
    pub fn log_summary(&self) {
        tracing::info!(
            "Batch complete: {}/{} successful ({:.1}%), {} fallback, avg parse time {:.0}ms",
            self.successful,
            self.total,
            self.success_rate(),
            self.fallback,
            self.average_parse_time
        );

        if !self.failed_urls.is_empty() {
            tracing::warn!("Failed URLs: {}", self.failed_urls.join(", "));
        }
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &BatchStatistics) {
    println!("=== Audit Statistics ===\n");

    println!("Overview:");
    println!("  URLs audited: {}", stats.total);
    println!("  Chunks: {} ({} delays)", stats.chunks, stats.delays_applied);
    println!("  Duration: {}ms", stats.duration_ms());
    println!();

    println!("Outcomes:");
    println!("  Analyzed: {}", stats.successful);
    println!("  Fallback: {}", stats.fallback);
    println!("  Failed: {}", stats.failed - stats.fallback);
    println!();

    if !stats.failed_urls.is_empty() {
        println!("Failed URLs ({}):", stats.failed_urls.len());
        for url in &stats.failed_urls {
            println!("  - {}", url);
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} pages successfully analyzed)",
        stats.success_rate(),
        stats.successful,
        stats.total
    );
    println!("Average Parse Time: {:.0}ms", stats.average_parse_time);
}
