//! Rank-Lens main entry point
//!
//! This is the command-line interface for auditing the ranking signals of
//! a list of pages.

use anyhow::{bail, Context};
use clap::Parser;
use rank_lens::config::{load_config_with_hash, validate, Config};
use rank_lens::crawler::BatchOrchestrator;
use rank_lens::output::{print_statistics, write_report, AuditReport};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Rank-Lens: ranking-signal audits for web pages
///
/// Fetches each URL, extracts question headings, answer-first paragraphs,
/// FAQ blocks, JSON-LD types and content metrics, and writes one JSON audit
/// per URL together with batch statistics.
#[derive(Parser, Debug)]
#[command(name = "rank-lens")]
#[command(version = "1.0.0")]
#[command(about = "Audit the ranking signals of web pages", long_about = None)]
struct Cli {
    /// URLs to audit
    #[arg(value_name = "URL")]
    urls: Vec<String>,

    /// File with one URL per line (blank lines and # comments are ignored)
    #[arg(long, value_name = "FILE")]
    urls_file: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// URLs fetched concurrently per chunk
    #[arg(long)]
    max_concurrent: Option<usize>,

    /// Pause between chunks in milliseconds
    #[arg(long)]
    batch_delay_ms: Option<u64>,

    /// Attempts per URL
    #[arg(long)]
    max_retries: Option<u32>,

    /// Per-attempt timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Write the JSON report to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be audited without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_effective_config(&cli)?;
    let urls = collect_urls(&cli)?;

    if urls.is_empty() {
        bail!("No URLs given; pass them as arguments or with --urls-file");
    }

    if cli.dry_run {
        handle_dry_run(&config, &urls);
        return Ok(());
    }

    handle_audit(&cli, &config, &urls).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("rank_lens=info,warn"),
            1 => EnvFilter::new("rank_lens=debug,info"),
            2 => EnvFilter::new("rank_lens=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so the JSON report can be piped from stdout
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any), applies command-line overrides and revalidates
fn load_effective_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(max_concurrent) = cli.max_concurrent {
        config.batch.max_concurrent = max_concurrent;
    }
    if let Some(batch_delay_ms) = cli.batch_delay_ms {
        config.batch.batch_delay_ms = batch_delay_ms;
    }
    if let Some(max_retries) = cli.max_retries {
        config.fetch.max_retries = max_retries;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.fetch.timeout_ms = timeout_ms;
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Gathers URLs from positional arguments, then from `--urls-file`
fn collect_urls(cli: &Cli) -> anyhow::Result<Vec<String>> {
    let mut urls = cli.urls.clone();

    if let Some(path) = &cli.urls_file {
        urls.extend(read_urls_file(path)?);
    }

    Ok(urls)
}

fn read_urls_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read URL list {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

/// Handles the --dry-run mode: shows the effective configuration and targets
fn handle_dry_run(config: &Config, urls: &[String]) {
    println!("=== Rank-Lens Dry Run ===\n");

    println!("Fetch Configuration:");
    println!("  Max retries: {}", config.fetch.max_retries);
    println!("  Timeout: {}ms", config.fetch.timeout_ms);
    println!("  Max redirects: {}", config.fetch.max_redirects);
    println!("  User agent: {}", config.fetch.user_agent);
    println!("  Accept-Language: {}", config.fetch.accept_language);

    println!("\nRetry Backoff:");
    println!("  Base delay: {}ms", config.retry.base_delay_ms);
    println!("  Max delay: {}ms", config.retry.max_delay_ms);

    println!("\nBatch:");
    println!("  Max concurrent: {}", config.batch.max_concurrent);
    println!("  Delay between chunks: {}ms", config.batch.batch_delay_ms);

    println!("\nTargets ({}):", urls.len());
    for url in urls {
        match rank_lens::url::parse_target_url(url) {
            Ok(_) => println!("  - {}", url),
            Err(e) => println!("  - {} (invalid: {})", url, e),
        }
    }

    let chunks = urls.len().div_ceil(config.batch.max_concurrent.max(1));
    println!("\n✓ Configuration is valid");
    println!("✓ Would audit {} URLs in {} chunks", urls.len(), chunks);
}

/// Handles the main audit run
async fn handle_audit(cli: &Cli, config: &Config, urls: &[String]) -> anyhow::Result<()> {
    tracing::info!("Auditing {} URLs", urls.len());

    let orchestrator =
        BatchOrchestrator::from_config(config).context("Failed to build HTTP client")?;
    let run = orchestrator.run(urls).await;
    let report = AuditReport::from_run(run);

    write_report(&report, cli.output.as_deref(), cli.pretty).context("Failed to write report")?;

    // Statistics share stdout with the report only when the report went to a file
    if cli.output.is_some() && !cli.quiet {
        print_statistics(&report.statistics);
    }

    Ok(())
}
