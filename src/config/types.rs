use serde::Deserialize;

/// Browser User-Agent sent with every request unless configured otherwise
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default `Accept` header
pub const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Default `Accept-Language` header
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// Main configuration structure for Rank-Lens
///
/// Every section and key is optional; missing values take the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub retry: RetryConfig,
    pub batch: BatchConfig,
}

/// Per-URL fetch behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FetchConfig {
    /// Attempts per URL before giving up (default 3)
    pub max_retries: u32,

    /// Per-attempt timeout in milliseconds (default 15000)
    pub timeout_ms: u64,

    /// Redirects followed before an attempt fails (default 5)
    pub max_redirects: usize,

    /// User-Agent header
    pub user_agent: String,

    /// Accept-Language header
    pub accept_language: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            timeout_ms: 15_000,
            max_redirects: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

/// Exponential backoff between failed attempts
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RetryConfig {
    /// Delay after the first failed attempt, doubled for each later one (default 1000)
    pub base_delay_ms: u64,

    /// Upper bound for any single delay (default 10000)
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 1_000,
            max_delay_ms: 10_000,
        }
    }
}

/// Batch scheduling
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BatchConfig {
    /// URLs fetched concurrently within one chunk (default 2)
    pub max_concurrent: usize,

    /// Pause between chunks in milliseconds (default 2000)
    pub batch_delay_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 2,
            batch_delay_ms: 2_000,
        }
    }
}
