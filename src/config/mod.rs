//! Configuration module for Chapter-Scout
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every value has a built-in default.
//!
//! # Example
//!
//! ```no_run
//! use chapter_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scout.toml")).unwrap();
//! println!("Crawler will visit at most {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ClassifierConfig, Config, ContainerConfig, CrawlerConfig, FetcherConfig, DEFAULT_ACCEPT,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
