//! Sumi-Index main entry point
//!
//! This is the command-line interface for the Sumi-Index crawler and search
//! server.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use sumi_index::config::{load_config_with_hash, Config};
use sumi_index::output::{print_crawl_summary, print_search_results};
use sumi_index::{search, server, Crawler, InvertedIndex};
use tracing_subscriber::EnvFilter;

/// Sumi-Index: a concurrent crawler and word search server
///
/// By default Sumi-Index serves an HTTP API that crawls on request and
/// answers word searches from an in-memory index. With --crawl it runs a
/// single crawl from the command line instead.
#[derive(Parser, Debug)]
#[command(name = "sumi-index")]
#[command(version = "1.0.0")]
#[command(about = "A concurrent crawler and word search server", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show it without crawling or serving
    #[arg(long, conflicts_with = "crawl")]
    dry_run: bool,

    /// Crawl from this URL, print a summary and exit
    #[arg(long, value_name = "URL")]
    crawl: Option<String>,

    /// After --crawl, search the fresh index for this word
    #[arg(long, value_name = "WORD", requires = "crawl")]
    query: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
    } else if let Some(seed) = &cli.crawl {
        handle_crawl(config, seed, cli.query.as_deref()).await?;
    } else {
        server::serve(&config, Arc::new(InvertedIndex::new()))
            .await
            .context("Server stopped")?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_index=info,warn"),
            1 => EnvFilter::new("sumi_index=debug,info"),
            2 => EnvFilter::new("sumi_index=trace,debug"),
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

/// Handles the --dry-run mode: shows the validated configuration
fn handle_dry_run(config: &Config) {
    println!("=== Sumi-Index Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Max parallel fetches: {}", config.crawler.max_parallel);
    println!("  Crawler agent: {}", config.crawler.crawler_agent);

    println!("\nServer:");
    println!("  Address: http://{}", config.server.bind_address());

    println!("\n✓ Configuration is valid");
}

/// Handles the --crawl mode: one crawl, a summary and an optional search
async fn handle_crawl(config: Config, seed: &str, query: Option<&str>) -> anyhow::Result<()> {
    let index = Arc::new(InvertedIndex::new());
    let crawler =
        Crawler::new(config.crawler, Arc::clone(&index)).context("Failed to build crawler")?;

    let report = crawler.crawl(seed).await;
    print_crawl_summary(&report);

    if let Some(word) = query {
        let word = word.to_ascii_lowercase();
        let results = search(&index, &word);
        println!();
        print_search_results(&word, results.as_deref());
    }

    Ok(())
}
