//! Rank-Lens: ranking-signal extraction for web pages
//!
//! This crate fetches pages over HTTP, extracts the content signals that tend to
//! explain why a page ranks (question headings, answer-first paragraphs, FAQ
//! blocks, JSON-LD schema types, content depth), and does so for whole batches
//! of URLs under bounded concurrency. Every URL yields a [`PageAudit`], even when
//! fetching or extraction fails.

pub mod audit;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Rank-Lens operations
#[derive(Debug, Error)]
pub enum LensError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a single fetch attempt can fail
///
/// Every variant is retryable; the fetcher decides whether another attempt
/// is left. The `Display` output is what ends up in `signals.error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Request failed with status code {status}")]
    Status { status: u16 },

    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Too many redirects")]
    RedirectLimit,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Response too short or empty ({length} characters)")]
    BodyTooShort { length: usize },

    #[error("No valid HTML structure found")]
    NoHtmlStructure,
}

/// Failures of the degraded-mode extractor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FallbackError {
    #[error("payload too short for fallback extraction ({length} characters)")]
    PayloadTooShort { length: usize },

    #[error("no headings, paragraphs or title could be recovered")]
    NoContent,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Rank-Lens operations
pub type Result<T> = std::result::Result<T, LensError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use audit::{AuditOutcome, HeadingInfo, PageAudit, Signals};
pub use config::Config;
pub use crawler::{BatchOrchestrator, BatchRun, PageFetcher, RetryPolicy};
pub use extract::{extract_fallback, extract_signals, FallbackExtraction, PageDocument};
pub use crate::url::{extract_domain, parse_target_url};
