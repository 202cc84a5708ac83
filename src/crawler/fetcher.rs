//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests, including:
//! - Building the shared HTTP client with browser-like headers
//! - Retrying failed attempts with exponential backoff
//! - Validating that a response body looks like an HTML page
//! - Error classification
//! - Handing the captured payload to the fallback extractor when every attempt fails

use crate::audit::PageAudit;
use crate::config::{Config, FetchConfig, DEFAULT_ACCEPT};
use crate::crawler::retry::RetryPolicy;
use crate::extract::{self, document, PageDocument};
use crate::url::{domain_of, extract_domain, parse_target_url};
use crate::FetchError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{redirect::Policy, Client};
use std::time::{Duration, Instant};
use url::Url;

/// Bodies shorter than this are rejected as empty or truncated
pub const MIN_BODY_CHARS: usize = 100;

/// A failed attempt, with whatever body came back alongside the failure
#[derive(Debug)]
struct AttemptFailure {
    error: FetchError,
    payload: Option<String>,
}

impl AttemptFailure {
    fn without_payload(error: FetchError) -> Self {
        Self {
            error,
            payload: None,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// Sends a desktop browser User-Agent plus `Accept` and `Accept-Language`
/// headers on every request. `Accept-Encoding` is negotiated by reqwest
/// itself from the enabled decoders.
///
/// # Example
///
/// ```no_run
/// use rank_lens::config::FetchConfig;
/// use rank_lens::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
    match HeaderValue::from_str(&config.accept_language) {
        Ok(value) => {
            headers.insert(ACCEPT_LANGUAGE, value);
        }
        Err(e) => {
            tracing::warn!(
                "Ignoring invalid Accept-Language value {:?}: {}",
                config.accept_language,
                e
            );
        }
    }

    Client::builder()
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .timeout(Duration::from_millis(config.timeout_ms))
        .redirect(Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .build()
}

/// Fetches pages and turns each one into a [`PageAudit`]
///
/// Holds a single pooled client; share it across tasks behind an `Arc`.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    config: FetchConfig,
    retry: RetryPolicy,
}

impl PageFetcher {
    /// Creates a fetcher from fetch settings and a retry policy
    pub fn new(config: FetchConfig, retry: RetryPolicy) -> Result<Self, reqwest::Error> {
        let client = build_http_client(&config)?;
        Ok(Self {
            client,
            config,
            retry,
        })
    }

    /// Creates a fetcher from a full configuration
    ///
    /// The attempt budget comes from `fetch.max-retries`, the backoff curve
    /// from the `[retry]` section.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let retry = RetryPolicy::new(&config.retry, config.fetch.max_retries);
        Self::new(config.fetch.clone(), retry)
    }

    /// The retry policy used by [`fetch`](Self::fetch)
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Fetches and analyzes a URL with the configured attempt budget
    pub async fn fetch(&self, url: &str) -> PageAudit {
        self.fetch_and_extract(url, self.retry.max_attempts).await
    }

    /// Fetches a URL with retries and extracts its ranking signals
    ///
    /// Never fails: every problem is described by `signals.error` on the
    /// returned audit.
    ///
    /// # Flow
    ///
    /// 1. Reject malformed URLs without touching the network
    /// 2. Up to `max_retries` attempts (0 counts as 1), sleeping
    ///    `min(base * 2^(attempt-1), max)` between them
    /// 3. A successful attempt is parsed and run through the signal extractor
    /// 4. When the last attempt fails, its captured body (error page or
    ///    rejected payload) goes to the fallback extractor
    /// 5. If nothing can be recovered, the audit carries empty signals
    ///
    /// `parse_time` covers every attempt and backoff sleep.
    pub async fn fetch_and_extract(&self, url: &str, max_retries: u32) -> PageAudit {
        let started = Instant::now();

        let target = match parse_target_url(url) {
            Ok(target) => target,
            Err(e) => {
                tracing::warn!("Skipping invalid URL {}: {}", url, e);
                let error = format!("Invalid URL: {}", e);
                return PageAudit::failed(url, domain_of(url), &error, 0);
            }
        };
        let domain = extract_domain(&target).unwrap_or_default();
        let policy = self.retry.with_max_attempts(max_retries);

        let mut attempt = 1;
        let failure = loop {
            tracing::debug!(
                "Fetching {} (attempt {}/{})",
                url,
                attempt,
                policy.max_attempts
            );

            match self.attempt(&target).await {
                Ok(body) => {
                    let (signals, why) = analyze(&body, &target);
                    let parse_time = elapsed_ms(started);
                    tracing::info!(
                        "Analyzed {} in {}ms ({} words, {} question headings)",
                        url,
                        parse_time,
                        signals.word_count,
                        signals.h2_questions.len()
                    );
                    return PageAudit::new(url, signals, why, parse_time);
                }
                Err(failure) => {
                    tracing::warn!(
                        "Attempt {}/{} failed for {}: {}",
                        attempt,
                        policy.max_attempts,
                        url,
                        failure.error
                    );

                    match policy.delay_after(attempt) {
                        Some(delay) => {
                            tracing::debug!("Retrying {} in {}ms", url, delay.as_millis());
                            tokio::time::sleep(delay).await;
                            attempt += 1;
                        }
                        None => break failure,
                    }
                }
            }
        };

        let error = failure.error.to_string();
        let audit = match failure.payload {
            Some(payload) => recover(url, &target, &domain, &payload, &error, started),
            None => PageAudit::failed(url, domain, &error, elapsed_ms(started)),
        };

        tracing::info!(
            "Giving up on {} after {} attempts ({}): {}",
            url,
            policy.max_attempts,
            audit.outcome(),
            error
        );

        audit
    }

    /// One GET request plus body validation
    async fn attempt(&self, url: &Url) -> Result<String, AttemptFailure> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AttemptFailure::without_payload(self.classify_error(&e)))?;

        let status = response.status();
        let final_url = response.url().to_string();

        let body = response
            .text()
            .await
            .map_err(|e| AttemptFailure::without_payload(self.classify_error(&e)))?;

        tracing::debug!(
            "Response {} from {} ({} bytes)",
            status.as_u16(),
            final_url,
            body.len()
        );

        if !(200..400).contains(&status.as_u16()) {
            return Err(AttemptFailure {
                error: FetchError::Status {
                    status: status.as_u16(),
                },
                payload: Some(body),
            });
        }

        match validate_payload(&body) {
            Ok(()) => Ok(body),
            Err(error) => Err(AttemptFailure {
                error,
                payload: Some(body),
            }),
        }
    }

    fn classify_error(&self, e: &reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout {
                timeout_ms: self.config.timeout_ms,
            }
        } else if e.is_redirect() {
            FetchError::RedirectLimit
        } else if e.is_connect() {
            FetchError::Connect(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

/// Checks that a response body is a plausible HTML page
///
/// The body must hold at least 100 characters and parse into an HTML
/// document (see [`document::has_html_structure`]).
pub fn validate_payload(body: &str) -> Result<(), FetchError> {
    let length = extract::char_len(body);
    if body.trim().is_empty() || length < MIN_BODY_CHARS {
        return Err(FetchError::BodyTooShort { length });
    }

    if !document::has_html_structure(body) {
        return Err(FetchError::NoHtmlStructure);
    }

    Ok(())
}

// The parsed document is not Send, so it must never outlive this call.
fn analyze(body: &str, url: &Url) -> (crate::audit::Signals, String) {
    let document = PageDocument::parse(body);
    let signals = extract::extract_signals(&document, url);
    let why = extract::why_it_ranks(&signals);
    (signals, why)
}

fn recover(
    url: &str,
    target: &Url,
    domain: &str,
    payload: &str,
    error: &str,
    started: Instant,
) -> PageAudit {
    match extract::extract_fallback(payload, target) {
        Ok(extraction) => {
            tracing::info!("Fallback recovered {} for {}", extraction.summary, url);
            PageAudit::from_fallback(url, extraction, error, elapsed_ms(started))
        }
        Err(e) => {
            tracing::debug!("Fallback extraction failed for {}: {}", url, e);
            PageAudit::failed(url, domain, error, elapsed_ms(started))
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
