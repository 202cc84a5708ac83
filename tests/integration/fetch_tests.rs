//! End-to-end tests for the page fetcher

use crate::common::{fast_config, fetcher, host_of, page};
use rank_lens::config::DEFAULT_USER_AGENT;
use std::time::Duration;
use wiremock::matchers::{headers, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_question_heading_with_answer_paragraph() {
    let mock_server = MockServer::start().await;
    let answer = "AEO is the practice of shaping content for answers";
    assert_eq!(answer.chars().count(), 50);

    Mock::given(method("GET"))
        .and(path("/guide"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(page(
                    "AEO Guide",
                    &format!("<h2>What is AEO?</h2><p>{}</p>", answer),
                ))
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/guide", mock_server.uri());
    let audit = fetcher(&fast_config()).fetch(&url).await;

    assert_eq!(audit.url, url);
    assert!(audit.is_success(), "unexpected error: {:?}", audit.signals.error);
    assert_eq!(audit.signals.title, "AEO Guide");
    assert_eq!(audit.signals.h2_questions, vec!["What is AEO?"]);
    assert_eq!(audit.signals.answer_first_blocks, vec![answer]);
    assert!(audit.why_it_ranks.contains("1 question-based headings"));
    assert!(audit.why_it_ranks.contains("1 answer-first content blocks"));
    assert!(!audit.signals.fallback_used);
}

#[tokio::test]
async fn test_domain_matches_input_host() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(
            "Home",
            &"<p>Plain paragraph content for the page body.</p>".repeat(3),
        )))
        .mount(&mock_server)
        .await;

    let audit = fetcher(&fast_config()).fetch(&mock_server.uri()).await;

    assert_eq!(audit.signals.domain, host_of(&mock_server.uri()));
    assert!(audit.signals.error.is_none());
}

#[tokio::test]
async fn test_browser_headers_are_sent() {
    let mock_server = MockServer::start().await;

    // The mock server splits header values on commas before matching
    let user_agent_parts: Vec<&str> = DEFAULT_USER_AGENT.split(',').map(str::trim).collect();

    Mock::given(method("GET"))
        .and(headers("user-agent", user_agent_parts))
        .and(headers("accept-language", vec!["en-US", "en;q=0.5"]))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(
            "Headers",
            &"<p>Only served to browser-like clients.</p>".repeat(3),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let audit = fetcher(&fast_config()).fetch_and_extract(&mock_server.uri(), 1).await;
    assert!(audit.is_success());
}

#[tokio::test]
async fn test_page_without_optional_tags_is_analyzed() {
    let mock_server = MockServer::start().await;
    let minified = format!(
        "<!DOCTYPE html><meta charset=utf-8><title>Guide</title><h2>How does it work?</h2><p>{}</p>",
        "It fetches the page and extracts ranking signals. ".repeat(2)
    );

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(minified))
        .expect(1)
        .mount(&mock_server)
        .await;

    let audit = fetcher(&fast_config()).fetch_and_extract(&mock_server.uri(), 3).await;

    assert!(audit.is_success(), "unexpected error: {:?}", audit.signals.error);
    assert_eq!(audit.signals.title, "Guide");
    assert_eq!(audit.signals.h2_questions, vec!["How does it work?"]);
}

#[tokio::test]
async fn test_timeouts_on_every_attempt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(page("Slow", &"<p>Too late to matter.</p>".repeat(10)))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let mut config = fast_config();
    config.fetch.timeout_ms = 100;
    let audit = fetcher(&config).fetch_and_extract(&mock_server.uri(), 3).await;

    let error = audit.signals.error.clone().unwrap_or_default();
    assert!(error.starts_with("Request timed out"), "got: {}", error);
    assert!(!audit.signals.fallback_used);
    assert!(audit.signals.lists_empty());
    assert_eq!(audit.why_it_ranks, format!("Could not analyze: {}", error));
    // Three timed-out attempts plus two backoff sleeps
    assert!(audit.parse_time >= 300, "parse_time was {}", audit.parse_time);
}

#[tokio::test]
async fn test_error_status_uses_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string(page(
            "Temporarily unavailable page",
            "<h1>Service Status</h1>\
             <h2>Why is the site down?</h2>\
             <p>We are performing scheduled maintenance on the servers tonight.</p>",
        )))
        .mount(&mock_server)
        .await;

    let url = format!("{}/broken", mock_server.uri());
    let audit = fetcher(&fast_config()).fetch_and_extract(&url, 2).await;

    assert_eq!(
        audit.signals.error.as_deref(),
        Some("Request failed with status code 500")
    );
    assert!(audit.signals.fallback_used);
    assert!(audit.why_it_ranks.starts_with("Partial analysis (fallback): "));
    assert_eq!(audit.signals.h1, "Service Status");
    assert_eq!(audit.signals.h2_questions, vec!["Why is the site down?"]);
    assert_eq!(audit.signals.headings.len(), 2);
    assert_eq!(audit.signals.domain, host_of(&mock_server.uri()));
    assert!(audit.signals.raw_content.is_some());

    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_retry_then_success() {
    let mock_server = MockServer::start().await;

    // Mounted first, so it answers until exhausted
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(
            "Recovered",
            &"<p>The second attempt gets a real page back.</p>".repeat(2),
        )))
        .mount(&mock_server)
        .await;

    let url = format!("{}/flaky", mock_server.uri());
    let audit = fetcher(&fast_config()).fetch_and_extract(&url, 3).await;

    assert!(audit.is_success());
    assert_eq!(audit.signals.title, "Recovered");
    assert!(audit.signals.error.is_none());
}

#[tokio::test]
async fn test_short_body_fails_validation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>hi</html>"))
        .mount(&mock_server)
        .await;

    let audit = fetcher(&fast_config()).fetch_and_extract(&mock_server.uri(), 2).await;

    assert_eq!(
        audit.signals.error.as_deref(),
        Some("Response too short or empty (15 characters)")
    );
    assert!(!audit.signals.fallback_used);
    assert!(audit.signals.lists_empty());
}

#[tokio::test]
async fn test_non_html_body_fails_validation() {
    let mock_server = MockServer::start().await;
    let json = format!(r#"{{"status":"ok","items":[{}]}}"#, "1,".repeat(60) + "1");

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(json)
                .insert_header("content-type", "application/json"),
        )
        .mount(&mock_server)
        .await;

    let audit = fetcher(&fast_config()).fetch_and_extract(&mock_server.uri(), 1).await;

    assert_eq!(
        audit.signals.error.as_deref(),
        Some("No valid HTML structure found")
    );
    assert!(!audit.signals.fallback_used);
}

#[tokio::test]
async fn test_redirect_followed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page(
            "Moved Here",
            &"<p>The content now lives at a new address.</p>".repeat(2),
        )))
        .mount(&mock_server)
        .await;

    let url = format!("{}/old", mock_server.uri());
    let audit = fetcher(&fast_config()).fetch_and_extract(&url, 1).await;

    assert!(audit.is_success());
    assert_eq!(audit.url, url);
    assert_eq!(audit.signals.title, "Moved Here");
}

#[tokio::test]
async fn test_redirect_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/b"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/a"))
        .mount(&mock_server)
        .await;

    let mut config = fast_config();
    config.fetch.max_redirects = 2;
    let url = format!("{}/a", mock_server.uri());
    let audit = fetcher(&config).fetch_and_extract(&url, 1).await;

    assert_eq!(audit.signals.error.as_deref(), Some("Too many redirects"));
    assert!(!audit.is_success());
}

#[tokio::test]
async fn test_connection_refused() {
    // Bind then drop a listener to get a port nobody is serving
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);

    let url = format!("http://127.0.0.1:{}/", port);
    let audit = fetcher(&fast_config()).fetch_and_extract(&url, 2).await;

    assert!(audit.signals.error.is_some());
    assert!(!audit.signals.fallback_used);
    assert_eq!(audit.signals.domain, "127.0.0.1");
    assert!(audit.why_it_ranks.starts_with("Could not analyze: "));
}

#[tokio::test]
async fn test_json_ld_types_deduplicated() {
    let mock_server = MockServer::start().await;
    let body = r#"
        <script type="application/ld+json">{"@type":"FAQPage","mainEntity":[{"@type":"Question"}]}</script>
        <script type="application/ld+json">[{"@type":"FAQPage"},{"@type":["Article","WebPage"]}]</script>
        <script type="application/ld+json">{ not json</script>
        <p>Structured data page.</p>"#;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page("Schema", body)))
        .mount(&mock_server)
        .await;

    let audit = fetcher(&fast_config()).fetch(&mock_server.uri()).await;

    assert!(audit.is_success());
    assert_eq!(
        audit.signals.schema_types,
        vec!["FAQPage", "Question", "Article", "WebPage"]
    );
}
