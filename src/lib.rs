//! Chapter-Scout: catalog discovery for serialized web novels
//!
//! Given the landing page of a book, this crate walks the book's catalog
//! (following a "full catalog" link and "next page" pagination when present)
//! and returns every chapter link it can find as an ordered list of
//! `(title, url)` pairs.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod output;

use thiserror::Error;

/// Main error type for Chapter-Scout operations
///
/// Transport failures are deliberately absent: a page that cannot be fetched
/// contributes nothing to the catalog and never aborts a crawl.
///
/// Messages leave out the underlying cause; it is available through
/// `Error::source` and printed by chain-aware formatters.
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid start URL '{url}'")]
    InvalidUrl {
        url: String,
        source: ::url::ParseError,
    },

    #[error("Unsupported URL scheme '{scheme}' in {url}")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("HTTP client error")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid CSS selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("Invalid chapter pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),
}

/// Result type alias for Chapter-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use catalog::{Chapter, ContainerSelector, KeywordEffect, KeywordTable, LinkClassifier};
pub use config::Config;
pub use crawler::{crawl, CatalogWalker, CrawlReport, HttpFetcher, PageFetcher};
