//! End-to-end tests for the batch orchestrator

use crate::common::{fast_config, page};
use rank_lens::config::BatchConfig;
use rank_lens::crawler::{audit_urls, BatchOrchestrator};
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_numbered_pages(mock_server: &MockServer, count: usize) -> Vec<String> {
    let mut urls = Vec::new();
    for i in 0..count {
        Mock::given(method("GET"))
            .and(path(format!("/p{}", i)))
            .respond_with(ResponseTemplate::new(200).set_body_string(page(
                &format!("Page {}", i),
                &"<p>Numbered page content for batch ordering.</p>".repeat(2),
            )))
            .mount(mock_server)
            .await;
        urls.push(format!("{}/p{}", mock_server.uri(), i));
    }
    urls
}

#[tokio::test]
async fn test_five_urls_in_three_chunks() {
    let mock_server = MockServer::start().await;
    let urls = mount_numbered_pages(&mock_server, 5).await;

    let mut config = fast_config();
    config.batch = BatchConfig {
        max_concurrent: 2,
        batch_delay_ms: 100,
    };
    let orchestrator = BatchOrchestrator::from_config(&config).expect("Failed to build orchestrator");

    let started = Instant::now();
    let run = orchestrator.run(&urls).await;
    let elapsed = started.elapsed();

    assert_eq!(run.audits.len(), 5);
    for (i, audit) in run.audits.iter().enumerate() {
        assert_eq!(audit.url, urls[i]);
        assert_eq!(audit.signals.title, format!("Page {}", i));
    }

    assert_eq!(run.statistics.total, 5);
    assert_eq!(run.statistics.successful, 5);
    assert_eq!(run.statistics.chunks, 3);
    assert_eq!(run.statistics.delays_applied, 2);
    assert!(run.statistics.failed_urls.is_empty());
    assert!(elapsed >= Duration::from_millis(200), "elapsed {:?}", elapsed);
}

#[tokio::test]
async fn test_chunks_run_sequentially() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(page("Slow", &"<p>Every response takes a while.</p>".repeat(3)))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&mock_server)
        .await;

    let urls: Vec<String> = (0..4)
        .map(|i| format!("{}/slow{}", mock_server.uri(), i))
        .collect();

    let mut config = fast_config();
    config.batch = BatchConfig {
        max_concurrent: 2,
        batch_delay_ms: 0,
    };
    let orchestrator = BatchOrchestrator::from_config(&config).expect("Failed to build orchestrator");

    let started = Instant::now();
    let audits = orchestrator.fetch_batch(&urls).await;
    let elapsed = started.elapsed();

    assert_eq!(audits.len(), 4);
    assert!(audits.iter().all(|a| a.is_success()));
    // Two chunks of two concurrent 200ms responses
    assert!(elapsed >= Duration::from_millis(400), "elapsed {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(800), "elapsed {:?}", elapsed);
}

#[tokio::test]
async fn test_mixed_batch_isolates_failures() {
    let mock_server = MockServer::start().await;
    let mut urls = mount_numbered_pages(&mock_server, 1).await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    urls.push("definitely not a url".to_string());
    urls.push(format!("{}/missing", mock_server.uri()));

    let mut config = fast_config();
    config.fetch.max_retries = 1;
    let run = audit_urls(&config, &urls).await.expect("Failed to build client");

    assert_eq!(run.audits.len(), 3);
    assert!(run.audits[0].is_success());

    assert_eq!(run.audits[1].url, "definitely not a url");
    assert_eq!(run.audits[1].signals.domain, "");
    assert_eq!(run.audits[1].parse_time, 0);

    assert_eq!(
        run.audits[2].signals.error.as_deref(),
        Some("Request failed with status code 404")
    );

    assert_eq!(run.statistics.successful, 1);
    assert_eq!(run.statistics.failed, 2);
    assert_eq!(run.statistics.failed_urls, vec![urls[1].clone(), urls[2].clone()]);
}

#[tokio::test]
async fn test_shared_fetcher_across_orchestrators() {
    let mock_server = MockServer::start().await;
    let urls = mount_numbered_pages(&mock_server, 3).await;

    let config = fast_config();
    let fetcher = Arc::new(rank_lens::PageFetcher::from_config(&config).expect("fetcher"));
    let serial = BatchOrchestrator::new(
        Arc::clone(&fetcher),
        BatchConfig {
            max_concurrent: 1,
            batch_delay_ms: 0,
        },
    );
    let parallel = BatchOrchestrator::new(
        fetcher,
        BatchConfig {
            max_concurrent: 3,
            batch_delay_ms: 0,
        },
    );

    let serial_titles: Vec<String> = serial
        .fetch_batch(&urls)
        .await
        .into_iter()
        .map(|a| a.signals.title)
        .collect();
    let parallel_titles: Vec<String> = parallel
        .fetch_batch(&urls)
        .await
        .into_iter()
        .map(|a| a.signals.title)
        .collect();

    assert_eq!(serial_titles, vec!["Page 0", "Page 1", "Page 2"]);
    assert_eq!(serial_titles, parallel_titles);
}
