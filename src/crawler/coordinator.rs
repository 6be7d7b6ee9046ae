//! Catalog walker - main crawl orchestration logic
//!
//! This module contains the crawl loop that coordinates:
//! - Detecting a "full catalog" link on the landing page
//! - Breadth-first traversal of paginated catalog pages
//! - Chapter extraction through the container and link heuristics
//! - Deduplication across the whole crawl

use crate::catalog::{Chapter, ContainerSelector, KeywordEffect, KeywordTable, LinkClassifier};
use crate::config::Config;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::PageContext;
use crate::crawler::scheduler::Frontier;
use crate::{ConfigResult, ScoutError};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Default cap on pages visited per crawl
pub const DEFAULT_MAX_PAGES: u32 = 50;

/// Default politeness delay between pages
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(500);

/// Statistics about a finished crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Pages dequeued and fetched (or attempted)
    pub pages_visited: u32,

    /// Pages whose fetch returned no content
    pub pages_failed: u32,

    /// Full-catalog page followed instead of the start URL, if any
    pub catalog_url: Option<String>,

    /// True if the page cap stopped the walk with pages still queued
    pub hit_page_cap: bool,
}

/// Chapters found by a crawl, together with its report
#[derive(Debug, Clone, Default)]
pub struct CrawlOutcome {
    pub chapters: Vec<Chapter>,
    pub report: CrawlReport,
}

/// What one catalog page contributed
struct PageHarvest {
    chapters: Vec<Chapter>,
    next_page: Option<Url>,
}

/// Walks a book's catalog and collects its chapters
pub struct CatalogWalker<F> {
    fetcher: F,
    classifier: LinkClassifier,
    container: ContainerSelector,
    keywords: KeywordTable,
    max_pages: u32,
    page_delay: Duration,
}

impl<F: PageFetcher> CatalogWalker<F> {
    /// Creates a walker with the built-in heuristics
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            classifier: LinkClassifier::default(),
            container: ContainerSelector::default(),
            keywords: KeywordTable::default(),
            max_pages: DEFAULT_MAX_PAGES,
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }

    /// Creates a walker with heuristics and limits taken from configuration
    pub fn from_config(fetcher: F, config: &Config) -> ConfigResult<Self> {
        let keywords = config.keyword_table();

        Ok(Self {
            fetcher,
            classifier: LinkClassifier::from_config(&config.classifier, &keywords)?,
            container: ContainerSelector::from_config(&config.container)?,
            keywords,
            max_pages: config.crawler.max_pages,
            page_delay: Duration::from_millis(config.crawler.page_delay_ms),
        })
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }

    /// Crawls the catalog reachable from `start_url`
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Chapter>)` - Chapters in discovery order, possibly empty
    /// * `Err(ScoutError)` - The start URL is not an absolute HTTP(S) URL
    pub async fn crawl(&self, start_url: &str) -> Result<Vec<Chapter>, ScoutError> {
        let start = parse_start_url(start_url)?;
        Ok(self.walk(&start).await.chapters)
    }

    /// Runs the full discovery protocol from a parsed start URL
    ///
    /// # Protocol
    ///
    /// 1. Fetch the start page; if it links to a full catalog, walk that
    ///    page instead and never revisit the start page
    /// 2. Visit pages breadth-first up to the page cap, extracting chapters
    ///    and queueing each page's "next page" link
    /// 3. Sleep for the politeness delay between pages
    ///
    /// Fetch failures are absorbed: a failed page contributes nothing.
    pub async fn walk(&self, start: &Url) -> CrawlOutcome {
        let mut outcome = CrawlOutcome::default();

        let Some(first_html) = self.fetcher.fetch(start).await else {
            tracing::warn!("Start page {} could not be fetched", start);
            outcome.report.pages_failed = 1;
            return outcome;
        };

        let mut prefetched = None;
        let mut frontier = match self.find_catalog_link(start, &first_html) {
            Some(catalog_url) if catalog_url != *start => {
                tracing::info!("Following full catalog link: {}", catalog_url);
                outcome.report.catalog_url = Some(catalog_url.to_string());
                let mut frontier = Frontier::new(catalog_url, self.max_pages);
                frontier.mark_visited(start);
                frontier
            }
            _ => {
                prefetched = Some(first_html);
                Frontier::new(start.clone(), self.max_pages)
            }
        };

        let mut seen = HashSet::new();
        let mut delay_pending = false;

        while let Some(url) = frontier.next_page() {
            let html = match prefetched.take() {
                Some(html) => Some(html),
                None => {
                    if std::mem::take(&mut delay_pending) && !self.page_delay.is_zero() {
                        tokio::time::sleep(self.page_delay).await;
                    }
                    self.fetcher.fetch(&url).await
                }
            };

            let Some(html) = html else {
                tracing::warn!("No content from {}, skipping", url);
                outcome.report.pages_failed += 1;
                continue;
            };

            let harvest = self.harvest_page(&url, &html, &mut seen);
            tracing::debug!(
                "Page {}: {} new chapters (total {})",
                url,
                harvest.chapters.len(),
                outcome.chapters.len() + harvest.chapters.len()
            );
            outcome.chapters.extend(harvest.chapters);

            if let Some(next) = harvest.next_page {
                if frontier.enqueue(next.clone()) {
                    tracing::debug!("Queued next page: {}", next);
                }
            }

            delay_pending = true;
        }

        outcome.report.pages_visited = frontier.pages_visited();
        outcome.report.hit_page_cap = frontier.cap_reached();
        if outcome.report.hit_page_cap {
            tracing::warn!(
                "Page cap of {} reached with {} pages still queued",
                self.max_pages,
                frontier.pending_len()
            );
        }

        tracing::info!(
            "Crawl finished: {} chapters from {} pages ({} failed)",
            outcome.chapters.len(),
            outcome.report.pages_visited,
            outcome.report.pages_failed
        );

        outcome
    }

    /// Finds the first usable "full catalog" link on the landing page
    fn find_catalog_link(&self, start: &Url, html: &str) -> Option<Url> {
        let page = PageContext::parse(start.clone(), html);
        page.anchors().into_iter().find_map(|anchor| {
            if !self.keywords.matches(&anchor.text, KeywordEffect::CatalogLink) {
                return None;
            }
            let href = anchor.href()?;
            if href == "#" || href.starts_with("javascript") {
                return None;
            }
            page.resolve(href)
        })
    }

    /// Extracts new chapters and the next-page link from one page
    ///
    /// `seen` holds every chapter URL accepted so far in this crawl; a
    /// chapter is kept only on its first appearance.
    fn harvest_page(&self, url: &Url, html: &str, seen: &mut HashSet<String>) -> PageHarvest {
        let page = PageContext::parse(url.clone(), html);

        let chapters = page
            .catalog_anchors(&self.container)
            .into_iter()
            .filter_map(|anchor| {
                let href = anchor.href()?;
                if !self.classifier.classify(&anchor.text, href) {
                    return None;
                }
                let resolved = page.resolve(href)?;
                Some(Chapter {
                    url: resolved.to_string(),
                    title: anchor.text,
                })
            })
            .filter(|chapter| seen.insert(chapter.url.clone()))
            .collect();

        // Pagination controls usually sit outside the list container
        let next_page = page
            .anchors()
            .into_iter()
            .filter(|anchor| self.keywords.matches(&anchor.text, KeywordEffect::NextPage))
            .find_map(|anchor| anchor.href().and_then(|href| page.resolve(href)));

        PageHarvest {
            chapters,
            next_page,
        }
    }
}

/// Parses a start URL, accepting only absolute HTTP(S) URLs
pub fn parse_start_url(start_url: &str) -> Result<Url, ScoutError> {
    let url = Url::parse(start_url.trim()).map_err(|source| ScoutError::InvalidUrl {
        url: start_url.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ScoutError::UnsupportedScheme {
            url: start_url.to_string(),
            scheme: scheme.to_string(),
        }),
    }
}
