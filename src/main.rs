//! Chunk-Crawler main entry point
//!
//! This is the command-line interface for the Chunk-Crawler.

use anyhow::Context;
use chunk_crawler::config::{load_config_or_default, validate, Config};
use chunk_crawler::crawler::Coordinator;
use chunk_crawler::state::CrawlPhase;
use chunk_crawler::url::parse_seed;
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Chunk-Crawler: a polite single-domain crawler
///
/// Crawls one website breadth-first from a seed URL, extracts the visible
/// text of each page and writes it as sentence-bounded chunks to a JSON
/// lines file. Press Ctrl+C at any time to stop and save what was collected.
#[derive(Parser, Debug)]
#[command(name = "chunk-crawler")]
#[command(version = "1.0.0")]
#[command(about = "A polite single-domain crawler that chunks page text", long_about = None)]
struct Cli {
    /// URL to start crawling from (prompted for when omitted)
    #[arg(value_name = "SEED_URL")]
    seed: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Maximum number of pages to visit
    #[arg(long)]
    max_pages: Option<usize>,

    /// Maximum words per chunk
    #[arg(long)]
    max_tokens: Option<usize>,

    /// Path of the JSON lines results file
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    let seed = match &cli.seed {
        Some(seed) => seed.clone(),
        None => prompt_for_seed()?,
    };
    let seed = parse_seed(&seed).context("Invalid seed URL")?;

    tracing::info!(
        "Starting the crawler at {}. Press Ctrl+C at any time to stop and save the data.",
        seed
    );

    let mut coordinator = Coordinator::new(&config, &seed)?;
    let phase = coordinator.run(shutdown_signal()).await;
    let report = coordinator.finish()?;

    match phase {
        CrawlPhase::Interrupted => tracing::info!(
            "Crawl interrupted. {} chunks saved.",
            report.records_written
        ),
        _ => tracing::info!(
            "Crawl complete. {} chunks created.",
            report.stats.total_chunks
        ),
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// `RUST_LOG`, when set, takes precedence over the flags.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            // Only show errors
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new("chunk_crawler=info,warn"),
                1 => EnvFilter::new("chunk_crawler=debug,info"),
                2 => EnvFilter::new("chunk_crawler=trace,debug"),
                _ => EnvFilter::new("trace"),
            }
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file (if any) and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
    }
    let mut config = load_config_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(max_tokens) = cli.max_tokens {
        config.crawler.max_tokens = max_tokens;
    }
    if let Some(output) = &cli.output {
        config.output.results_path = output.clone();
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Asks for the seed URL on standard input
fn prompt_for_seed() -> anyhow::Result<String> {
    let mut stdout = std::io::stdout();
    write!(stdout, "Enter the start URL for the crawler: ")?;
    stdout.flush()?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read seed URL")?;
    Ok(line)
}

/// Resolves when the process receives Ctrl+C (or SIGTERM on unix)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Received shutdown signal");
}
