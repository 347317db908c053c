//! DocFetch main entry point
//!
//! Runs the document fetch stage over a list of URLs from the command line.

use anyhow::Context;
use clap::Parser;
use docfetch::config::{load_config_with_hash, Config};
use docfetch::pipeline::{run_fetch, ProcessedReference};
use docfetch::CrawlReference;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use url::Url;

/// DocFetch: fetch and classify web documents
///
/// Each URL is fetched once. Good documents are accepted, missing or failing
/// ones are rejected, and redirects are queued as new references.
#[derive(Parser, Debug)]
#[command(name = "docfetch")]
#[command(version)]
#[command(about = "Fetch and classify web documents", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// URLs to fetch
    #[arg(value_name = "URL", required = true)]
    urls: Vec<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and list the URLs without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    let references = parse_references(&cli.urls);

    if cli.dry_run {
        handle_dry_run(&config, &references);
        return Ok(());
    }

    handle_fetch(config, references).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("docfetch=info,warn"),
            1 => EnvFilter::new("docfetch=debug,info"),
            2 => EnvFilter::new("docfetch=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Parses the command line URLs, reporting and skipping invalid ones
fn parse_references(urls: &[String]) -> Vec<CrawlReference> {
    urls.iter()
        .filter_map(|raw| match Url::parse(raw) {
            Ok(url) => Some(CrawlReference::new(url)),
            Err(e) => {
                tracing::error!("Skipping invalid URL '{}': {}", raw, e);
                None
            }
        })
        .collect()
}

/// Handles the --dry-run mode: shows what would be fetched
fn handle_dry_run(config: &Config, references: &[CrawlReference]) {
    println!("=== DocFetch Dry Run ===\n");

    println!("Fetcher:");
    println!("  Connect timeout: {}ms", config.fetcher.connect_timeout_ms);
    println!("  Request timeout: {}ms", config.fetcher.request_timeout_ms);
    println!("  Max concurrent fetches: {}", config.crawler.max_concurrent_fetches);
    println!("  Max redirects: {}", config.queue.max_redirects);
    println!("  User agent: {}", config.user_agent.header_value());

    println!("\nURLs ({}):", references.len());
    for reference in references {
        println!("  - {}", reference.url());
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main fetch operation
async fn handle_fetch(config: Config, references: Vec<CrawlReference>) -> anyhow::Result<()> {
    let report = run_fetch(&config, references).await?;

    for item in &report.processed {
        println!("{:<12} {}", disposition(item), item.reference.url());
    }

    if !report.redirects.is_empty() {
        println!("\nQueued redirect targets ({}):", report.redirects.len());
        for reference in &report.redirects {
            let from = reference
                .referrer
                .as_ref()
                .map(Url::as_str)
                .unwrap_or("?");
            println!("  {} <- {}", reference.url(), from);
        }
    }

    let failures = report.failures();
    if failures > 0 {
        anyhow::bail!("{} of {} fetches failed", failures, report.processed.len());
    }

    Ok(())
}

fn disposition(item: &ProcessedReference) -> String {
    match (&item.result, item.reference.state) {
        (Err(_), _) => "failed".to_string(),
        (Ok(true), _) => "accepted".to_string(),
        (Ok(false), Some(state)) => format!("rejected:{}", state),
        (Ok(false), None) => "redirected".to_string(),
    }
}
