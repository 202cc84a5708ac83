use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (which shouldn't happen for valid HTTP(S) URLs), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use rank_lens::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true for education and government domains
///
/// Matches `edu` or `gov` as any label after the first, so both
/// `mit.edu` and `www.gov.uk` qualify while `education.com` does not.
pub fn is_authoritative_domain(domain: &str) -> bool {
    domain
        .split('.')
        .skip(1)
        .any(|label| label.eq_ignore_ascii_case("edu") || label.eq_ignore_ascii_case("gov"))
}

/// Returns true for wiki-style encyclopedic domains (Wikipedia included)
pub fn is_encyclopedic_domain(domain: &str) -> bool {
    domain.to_lowercase().contains("wiki")
}

/// Returns true when an `href` points back into the page's own site
///
/// Root-relative links count, as do absolute links mentioning the domain.
pub fn is_internal_href(href: &str, domain: &str) -> bool {
    let href = href.trim();
    href.starts_with('/') || (!domain.is_empty() && href.contains(domain))
}
