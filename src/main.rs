//! Chapter-Scout main entry point
//!
//! This is the command-line interface for the Chapter-Scout catalog crawler.
//! Stdout carries a single JSON document; logs go to stderr.

use anyhow::Context;
use chapter_scout::config::{load_config_with_hash, validate, Config};
use chapter_scout::output::{render_chapters, ErrorPayload};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Chapter-Scout: discover every chapter of a web novel
///
/// Chapter-Scout starts from a book's landing page, follows its full-catalog
/// and next-page links, and prints the chapter list as JSON.
#[derive(Parser, Debug)]
#[command(name = "chapter-scout")]
#[command(version = "1.0.0")]
#[command(about = "Discovers the chapter catalog of a web novel", long_about = None)]
struct Cli {
    /// Landing page URL of the book
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of catalog pages to visit
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Delay between page visits in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Exit status when no start URL was given
const EXIT_NO_URL: u8 = 1;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (document, status) = execute(&cli).await;
    println!("{}", document);

    ExitCode::from(status)
}

/// Produces the JSON document for stdout and the process exit status
///
/// Crawl failures are reported as data, not as a process failure; only a
/// missing URL exits non-zero.
async fn execute(cli: &Cli) -> (String, u8) {
    let Some(url) = cli.url.as_deref() else {
        return (ErrorPayload::new("No URL provided").to_json(), EXIT_NO_URL);
    };

    match run(cli, url).await {
        Ok(json) => (json, 0),
        Err(e) => {
            tracing::error!("Crawl failed: {:#}", e);
            (ErrorPayload::new(format!("{:#}", e)).to_json(), 0)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// `RUST_LOG` takes precedence over the command-line flags.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new("chapter_scout=warn,error"),
                1 => EnvFilter::new("chapter_scout=info,warn"),
                2 => EnvFilter::new("chapter_scout=debug,info"),
                _ => EnvFilter::new("trace"),
            }
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads configuration, applies command-line overrides, and runs the crawl
async fn run(cli: &Cli, url: &str) -> anyhow::Result<String> {
    let mut config = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded from {} (hash: {})", path.display(), hash);
            config
        }
        None => Config::default(),
    };

    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.crawler.page_delay_ms = delay_ms;
    }
    validate(&config)?;

    let outcome = chapter_scout::crawl(&config, url).await?;
    let report = &outcome.report;
    tracing::info!(
        "Found {} chapters across {} pages ({} failed{})",
        outcome.chapters.len(),
        report.pages_visited,
        report.pages_failed,
        if report.hit_page_cap { ", page cap reached" } else { "" }
    );

    Ok(render_chapters(&outcome.chapters, cli.pretty)?)
}
