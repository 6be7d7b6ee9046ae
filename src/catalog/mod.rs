//! Catalog heuristics
//!
//! This module holds the decision logic of the crawler:
//! - The keyword table shared by every text heuristic
//! - Chapter-link classification
//! - Catalog container selection

mod classifier;
mod container;
mod keywords;

pub use classifier::{
    LinkClassifier, BARE_NUMBER_PATTERN, CHAPTER_MARKER_PATTERN, NUMBERED_PREFIX_PATTERN,
};
pub use container::{ContainerSelector, DEFAULT_CONTAINER_SELECTORS};
pub use keywords::{KeywordEffect, KeywordRule, KeywordTable};

use serde::{Deserialize, Serialize};

/// A discovered chapter link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Trimmed anchor text, never empty
    pub title: String,

    /// Absolute URL, resolved against the page the anchor was found on
    pub url: String,
}
