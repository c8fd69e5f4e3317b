//! Trundle main entry point
//!
//! Command-line driver for the crawl engine: loads a TOML configuration,
//! seeds the registry, and walks the cursor over the frontier until every
//! known record has been attempted once or the page budget runs out.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use trundle::config::{load_config, Config};
use trundle::crawler::{Crawl, LinkExtractor, Transport};
use trundle::output::{print_report, write_markdown, CrawlReport};
use tracing_subscriber::EnvFilter;

/// Trundle: a single-threaded crawl frontier and traversal engine
#[derive(Parser, Debug)]
#[command(name = "trundle")]
#[command(version)]
#[command(about = "A single-threaded crawl frontier and traversal engine", long_about = None)]
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

    /// Override the configured page budget
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Override the configured markdown summary path
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config, cli.max_pages, cli.summary).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("trundle=info,warn"),
            1 => EnvFilter::new("trundle=debug,info"),
            2 => EnvFilter::new("trundle=trace,debug"),
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

/// Handles --dry-run: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Trundle Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Page budget: {}", config.crawler.max_pages);
    println!("  Request timeout: {}s", config.crawler.request_timeout);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    if let Some(path) = &config.output.summary_path {
        println!("\nSummary will be written to: {}", path);
    }

    println!("\nSeeds ({}):", config.seeds.len());
    for seed in &config.seeds {
        println!("  - {}", seed);
    }

    println!("\n✓ Configuration is valid");
}

/// Runs the crawl and prints the final report
async fn handle_crawl(
    config: Config,
    max_pages: Option<u32>,
    summary: Option<PathBuf>,
) -> anyhow::Result<()> {
    let page_budget = max_pages.unwrap_or(config.crawler.max_pages);
    let summary_path = summary.or_else(|| config.output.summary_path.as_ref().map(PathBuf::from));

    tracing::info!(
        "Starting crawl: {} seeds, page budget {}",
        config.seeds.len(),
        page_budget
    );

    let mut crawl = Crawl::from_config(&config).context("Failed to initialize crawl engine")?;

    let mut fetched = 0u32;
    while fetched < page_budget {
        if !step_to_unattempted(&mut crawl) {
            tracing::info!("Frontier exhausted after {} fetches", fetched);
            break;
        }
        crawl.fetch().await?;
        fetched += 1;
    }

    if fetched == page_budget {
        tracing::info!("Page budget of {} reached", page_budget);
    }

    let report = CrawlReport::from_records(crawl.urls());
    print_report(&report);

    if let Some(path) = summary_path {
        write_markdown(&report, &path)
            .with_context(|| format!("Failed to write summary to {}", path.display()))?;
        println!("\n✓ Summary written to: {}", path.display());
    }

    Ok(())
}

/// Advances the cursor to the next record that has never been attempted
///
/// A record counts as attempted once it is visited or carries a captured
/// fetch failure; the driver tries every record once per run rather than
/// retrying failures in a loop. Returns false when no such record exists.
fn step_to_unattempted<T: Transport, X: LinkExtractor>(crawl: &mut Crawl<T, X>) -> bool {
    for _ in 0..crawl.len() {
        if !crawl.visited() && crawl.error().is_none() {
            return true;
        }
        crawl.next_url();
    }
    false
}
