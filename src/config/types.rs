use crate::catalog::{
    KeywordRule, KeywordTable, BARE_NUMBER_PATTERN, CHAPTER_MARKER_PATTERN,
    DEFAULT_CONTAINER_SELECTORS, NUMBERED_PREFIX_PATTERN,
};
use serde::Deserialize;

/// Browser user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Accept header sent with every request
pub const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Main configuration structure for Chapter-Scout
///
/// Every section is optional; an empty file yields the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub fetcher: FetcherConfig,
    pub container: ContainerConfig,
    pub classifier: ClassifierConfig,

    /// Keyword table rows; when non-empty they replace the built-in table
    #[serde(rename = "keyword")]
    pub keywords: Vec<KeywordRule>,
}

impl Config {
    /// Returns the keyword table in effect for this configuration
    pub fn keyword_table(&self) -> KeywordTable {
        if self.keywords.is_empty() {
            KeywordTable::default()
        } else {
            KeywordTable::new(self.keywords.clone())
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of pages visited per crawl
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Delay between page visits (milliseconds)
    #[serde(rename = "page-delay-ms")]
    pub page_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 50,
            page_delay_ms: 500,
        }
    }
}

/// HTTP fetch configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    pub accept: String,

    /// Request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Encoding tried when a page does not decode as valid UTF-8
    #[serde(rename = "fallback-encoding")]
    pub fallback_encoding: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            timeout_secs: 15,
            fallback_encoding: "gbk".to_string(),
        }
    }
}

/// Catalog container heuristics
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// CSS selectors for likely catalog containers
    pub selectors: Vec<String>,

    /// Element scanned when no selector matches
    #[serde(rename = "fallback-element")]
    pub fallback_element: String,

    /// A fallback element needs strictly more anchors than this
    #[serde(rename = "min-fallback-anchors")]
    pub min_fallback_anchors: usize,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            selectors: DEFAULT_CONTAINER_SELECTORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            fallback_element: "div".to_string(),
            min_fallback_anchors: 20,
        }
    }
}

/// Chapter-link classification heuristics
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Regexes whose match marks link text as a chapter
    #[serde(rename = "chapter-patterns")]
    pub chapter_patterns: Vec<String>,

    /// Unmatched text longer than this many characters is still accepted
    #[serde(rename = "min-fallback-chars")]
    pub min_fallback_chars: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            chapter_patterns: vec![
                CHAPTER_MARKER_PATTERN.to_string(),
                NUMBERED_PREFIX_PATTERN.to_string(),
                BARE_NUMBER_PATTERN.to_string(),
            ],
            min_fallback_chars: 2,
        }
    }
}
