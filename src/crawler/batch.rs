//! Batch orchestration with bounded concurrency
//!
//! URLs are split into consecutive chunks of `max_concurrent`. Every URL in a
//! chunk gets its own task; the chunk is complete once all of its tasks have
//! settled, after which the orchestrator pauses for `batch_delay` before the
//! next chunk. Results are stored by input index, so output order always
//! matches input order regardless of completion order.

use crate::audit::PageAudit;
use crate::config::{BatchConfig, Config};
use crate::crawler::fetcher::PageFetcher;
use crate::output::BatchStatistics;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Audits plus the statistics gathered while producing them
#[derive(Debug, Clone)]
pub struct BatchRun {
    /// One audit per input URL, in input order
    pub audits: Vec<PageAudit>,

    pub statistics: BatchStatistics,
}

/// Drives a [`PageFetcher`] over a list of URLs
#[derive(Debug, Clone)]
pub struct BatchOrchestrator {
    fetcher: Arc<PageFetcher>,
    config: BatchConfig,
}

impl BatchOrchestrator {
    /// Creates an orchestrator; a `max_concurrent` of 0 is treated as 1
    pub fn new(fetcher: Arc<PageFetcher>, mut config: BatchConfig) -> Self {
        config.max_concurrent = config.max_concurrent.max(1);
        Self { fetcher, config }
    }

    /// Builds the fetcher and orchestrator from a full configuration
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let fetcher = PageFetcher::from_config(config)?;
        Ok(Self::new(Arc::new(fetcher), config.batch.clone()))
    }

    /// Audits every URL and returns the results in input order
    pub async fn fetch_batch(&self, urls: &[String]) -> Vec<PageAudit> {
        self.run(urls).await.audits
    }

    /// Audits every URL and returns the results with run statistics
    pub async fn run(&self, urls: &[String]) -> BatchRun {
        let started_at = Utc::now();
        let chunk_size = self.config.max_concurrent;
        let delay = Duration::from_millis(self.config.batch_delay_ms);
        let total_chunks = urls.len().div_ceil(chunk_size);

        tracing::info!(
            "Starting batch of {} URLs ({} chunks of up to {})",
            urls.len(),
            total_chunks,
            chunk_size
        );

        let mut slots: Vec<Option<PageAudit>> = vec![None; urls.len()];
        let mut delays_applied = 0;

        for (chunk_index, chunk) in urls.chunks(chunk_size).enumerate() {
            let offset = chunk_index * chunk_size;
            tracing::info!(
                "Chunk {}/{}: {}",
                chunk_index + 1,
                total_chunks,
                chunk.join(", ")
            );

            let handles: Vec<(usize, JoinHandle<PageAudit>)> = chunk
                .iter()
                .enumerate()
                .map(|(i, url)| {
                    let fetcher = Arc::clone(&self.fetcher);
                    let url = url.clone();
                    let handle = tokio::spawn(async move { fetcher.fetch(&url).await });
                    (offset + i, handle)
                })
                .collect();

            let mut succeeded = 0;
            for (index, audit) in settle_chunk(urls, handles).await {
                if audit.is_success() {
                    succeeded += 1;
                }
                slots[index] = Some(audit);
            }

            tracing::info!(
                "Chunk {}/{} done: {} succeeded, {} failed",
                chunk_index + 1,
                total_chunks,
                succeeded,
                chunk.len() - succeeded
            );

            if chunk_index + 1 < total_chunks {
                tracing::debug!("Waiting {}ms before next chunk", delay.as_millis());
                tokio::time::sleep(delay).await;
                delays_applied += 1;
            }
        }

        // Every slot is filled above; the fallback only guards against an index slip.
        let audits: Vec<PageAudit> = slots
            .into_iter()
            .zip(urls)
            .map(|(slot, url)| slot.unwrap_or_else(|| PageAudit::task_failure(url, "task failed")))
            .collect();

        let statistics = BatchStatistics::from_audits(
            &audits,
            total_chunks,
            delays_applied,
            started_at,
            Utc::now(),
        );
        statistics.log_summary();

        BatchRun { audits, statistics }
    }
}

/// Awaits every task of a chunk in order, never short-circuiting
///
/// A task that panicked or was aborted yields a minimal error audit for its
/// URL; its siblings are unaffected.
async fn settle_chunk(
    urls: &[String],
    handles: Vec<(usize, JoinHandle<PageAudit>)>,
) -> Vec<(usize, PageAudit)> {
    let mut settled = Vec::with_capacity(handles.len());
    for (index, handle) in handles {
        let audit = match handle.await {
            Ok(audit) => audit,
            Err(e) => {
                tracing::error!("Fetch task for {} failed: {}", urls[index], e);
                PageAudit::task_failure(&urls[index], "task failed")
            }
        };
        settled.push((index, audit));
    }
    settled
}
