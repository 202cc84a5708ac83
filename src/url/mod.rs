//! URL handling module for Rank-Lens
//!
//! This module validates audit targets, derives the domain reported in every
//! audit, and classifies domains and links for the ranking heuristics.

mod domain;

use crate::{UrlError, UrlResult};
use url::Url;

// Re-export main functions
pub use domain::{extract_domain, is_authoritative_domain, is_encyclopedic_domain, is_internal_href};

/// Parses and validates a URL that is about to be audited
///
/// An audit target must be an absolute `http` or `https` URL with a host. A URL
/// that fails here is an input error for that URL alone; the fetcher turns it
/// into a self-describing failed audit instead of touching the network.
///
/// # Arguments
///
/// * `url_str` - The raw URL string supplied by the caller
///
/// # Returns
///
/// * `Ok(Url)` - The parsed URL
/// * `Err(UrlError)` - The URL is malformed, has an unsupported scheme, or no host
///
/// # Examples
///
/// ```
/// use rank_lens::url::parse_target_url;
///
/// let url = parse_target_url("https://example.com/faq").unwrap();
/// assert_eq!(url.host_str(), Some("example.com"));
///
/// assert!(parse_target_url("not a url").is_err());
/// assert!(parse_target_url("ftp://example.com/file").is_err());
/// ```
pub fn parse_target_url(url_str: &str) -> UrlResult<Url> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingDomain),
    }
}

/// Best-effort domain for a raw URL string
///
/// Returns an empty string when the URL cannot be parsed, so a failed audit
/// still carries a well-formed `domain` field.
pub fn domain_of(url_str: &str) -> String {
    parse_target_url(url_str)
        .ok()
        .and_then(|url| extract_domain(&url))
        .unwrap_or_default()
}
