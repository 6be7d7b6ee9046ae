//! Link classifier: decides whether an anchor plausibly points to a chapter

use crate::catalog::keywords::{KeywordEffect, KeywordTable};
use crate::config::ClassifierConfig;
use crate::{ConfigError, ConfigResult};
use regex::Regex;

/// Pattern for "第N章" / "第N节" / "第N回" markers
pub const CHAPTER_MARKER_PATTERN: &str = r"第[0-9一二三四五六七八九十百千]+[章回节]";

/// Pattern for numbered labels such as "12. Title" or "12、Title"
pub const NUMBERED_PREFIX_PATTERN: &str = r"^\d+[\.\s、]";

/// Pattern for a bare chapter number
pub const BARE_NUMBER_PATTERN: &str = r"^\d+$";

/// Classifies anchors as chapter links
///
/// # Rules
///
/// Applied in order:
/// 1. Reject if the text contains any `Exclude` keyword
/// 2. Accept if the text matches any chapter pattern
/// 3. Accept if the text is longer than `min_fallback_chars` characters
///
/// Empty text or an empty href is rejected before the rules run.
#[derive(Debug, Clone)]
pub struct LinkClassifier {
    exclusions: Vec<String>,
    patterns: Vec<Regex>,
    min_fallback_chars: usize,
}

impl Default for LinkClassifier {
    fn default() -> Self {
        let patterns = [
            CHAPTER_MARKER_PATTERN,
            NUMBERED_PREFIX_PATTERN,
            BARE_NUMBER_PATTERN,
        ]
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect();

        Self::new(&KeywordTable::default(), patterns, 2)
    }
}

impl LinkClassifier {
    /// Creates a classifier from a keyword table and compiled patterns
    pub fn new(keywords: &KeywordTable, patterns: Vec<Regex>, min_fallback_chars: usize) -> Self {
        Self {
            exclusions: keywords
                .keywords(KeywordEffect::Exclude)
                .map(str::to_string)
                .collect(),
            patterns,
            min_fallback_chars,
        }
    }

    /// Builds a classifier from configuration, compiling its patterns
    ///
    /// # Returns
    ///
    /// * `Ok(LinkClassifier)` - All patterns compiled
    /// * `Err(ConfigError::InvalidPattern)` - A pattern is not a valid regex
    pub fn from_config(config: &ClassifierConfig, keywords: &KeywordTable) -> ConfigResult<Self> {
        let patterns = config
            .chapter_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        Ok(Self::new(keywords, patterns, config.min_fallback_chars))
    }

    /// Returns true if the link plausibly points to a chapter
    ///
    /// # Examples
    ///
    /// ```
    /// use chapter_scout::LinkClassifier;
    ///
    /// let classifier = LinkClassifier::default();
    /// assert!(classifier.classify("第12章 启程", "/12.html"));
    /// assert!(!classifier.classify("更多", "/more.html"));
    /// ```
    pub fn classify(&self, text: &str, href: &str) -> bool {
        if text.is_empty() || href.is_empty() {
            return false;
        }

        if self.exclusions.iter().any(|k| text.contains(k.as_str())) {
            return false;
        }

        if self.patterns.iter().any(|p| p.is_match(text)) {
            return true;
        }

        text.chars().count() > self.min_fallback_chars
    }
}
