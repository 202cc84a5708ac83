use rank_lens::config::Config;
use rank_lens::crawler::PageFetcher;

/// Configuration with short timeouts and backoff so failing paths finish quickly
pub fn fast_config() -> Config {
    let mut config = Config::default();
    config.fetch.timeout_ms = 2_000;
    config.retry.base_delay_ms = 10;
    config.retry.max_delay_ms = 40;
    config.batch.batch_delay_ms = 50;
    config
}

pub fn fetcher(config: &Config) -> PageFetcher {
    PageFetcher::from_config(config).expect("Failed to build fetcher")
}

/// Wraps body markup in a complete document with a title
pub fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>{}</title></head><body>{}</body></html>",
        title, body
    )
}

/// Host of the mock server, which is also the expected audit domain
pub fn host_of(base_url: &str) -> String {
    url::Url::parse(base_url)
        .expect("Failed to parse base URL")
        .host_str()
        .expect("Failed to extract host")
        .to_string()
}
