//! Crawler module for page fetching and batch processing
//!
//! This module contains the network side of an audit:
//! - HTTP fetching with retry and backoff
//! - Payload validation and fallback recovery
//! - Chunked batch scheduling with inter-chunk delays

mod batch;
mod fetcher;
mod retry;

pub use batch::{BatchOrchestrator, BatchRun};
pub use fetcher::{build_http_client, validate_payload, PageFetcher, MIN_BODY_CHARS};
pub use retry::RetryPolicy;

use crate::config::Config;
use crate::LensError;

/// Audits a list of URLs with the given configuration
///
/// Convenience entry point that builds the shared client, runs every URL
/// through the batch orchestrator and returns the audits with statistics.
/// Only client construction can fail; per-URL problems are reported inside
/// the audits.
pub async fn audit_urls(config: &Config, urls: &[String]) -> Result<BatchRun, LensError> {
    let orchestrator = BatchOrchestrator::from_config(config)?;
    Ok(orchestrator.run(urls).await)
}
