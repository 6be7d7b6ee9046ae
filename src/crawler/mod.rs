//! Crawler module for catalog discovery
//!
//! This module contains the crawling machinery, including:
//! - HTTP fetching with charset-aware decoding
//! - HTML parsing and anchor extraction
//! - The breadth-first page frontier
//! - Overall crawl coordination

mod coordinator;
mod encoding;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{
    parse_start_url, CatalogWalker, CrawlOutcome, CrawlReport, DEFAULT_MAX_PAGES,
    DEFAULT_PAGE_DELAY,
};
pub use encoding::{charset_from_content_type, SniffingDecoder, TextDecoder};
pub use fetcher::{build_http_client, fetch_url, FetchResult, HttpFetcher, PageFetcher};
pub use parser::{resolve_link, Anchor, PageContext};
pub use scheduler::Frontier;

use crate::config::Config;
use crate::ScoutError;

/// Runs a complete catalog crawl over HTTP
///
/// This is the main entry point for discovering a book's chapters. It will:
/// 1. Validate the start URL
/// 2. Build the HTTP fetcher and heuristics from the configuration
/// 3. Walk the catalog and collect chapters
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `start_url` - Landing page of the book
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Chapters (possibly none) and crawl statistics
/// * `Err(ScoutError)` - Invalid start URL or configuration
pub async fn crawl(config: &Config, start_url: &str) -> Result<CrawlOutcome, ScoutError> {
    let start = parse_start_url(start_url)?;
    let fetcher = HttpFetcher::new(&config.fetcher)?;
    let walker = CatalogWalker::from_config(fetcher, config)?;

    tracing::info!("Discovering catalog from {}", start);
    Ok(walker.walk(&start).await)
}
