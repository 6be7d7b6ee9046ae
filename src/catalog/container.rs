//! Container selector: finds the element most likely to hold the chapter list
//!
//! Catalog containers carry far more links than navigation chrome, so link
//! density is the deciding signal. Class and id names only narrow down the
//! candidates; they never rank them.

use crate::config::ContainerConfig;
use crate::{ConfigError, ConfigResult};
use scraper::{ElementRef, Html, Selector};

/// Selectors for common catalog container idioms
pub const DEFAULT_CONTAINER_SELECTORS: &[&str] = &[
    "#list",
    ".list",
    ".catalog",
    ".chapter-list",
    ".book_list",
    ".directory",
    ".box_con",
    "#chapterlist",
];

/// Picks the densest catalog container in a document
#[derive(Debug, Clone)]
pub struct ContainerSelector {
    candidates: Vec<Selector>,
    fallback: Selector,
    anchor: Selector,
    min_fallback_anchors: usize,
}

impl Default for ContainerSelector {
    fn default() -> Self {
        // Built-in selectors are known-valid
        Self::from_config(&ContainerConfig::default())
            .unwrap_or_else(|e| unreachable!("default container selectors: {e}"))
    }
}

impl ContainerSelector {
    /// Builds a selector from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(ContainerSelector)` - All selectors parsed
    /// * `Err(ConfigError::InvalidSelector)` - A selector is not valid CSS
    pub fn from_config(config: &ContainerConfig) -> ConfigResult<Self> {
        let candidates = config
            .selectors
            .iter()
            .map(|s| parse_selector(s))
            .collect::<ConfigResult<Vec<_>>>()?;

        Ok(Self {
            candidates,
            fallback: parse_selector(&config.fallback_element)?,
            anchor: parse_selector("a")?,
            min_fallback_anchors: config.min_fallback_anchors,
        })
    }

    /// Returns the element believed to hold the chapter list
    ///
    /// # Algorithm
    ///
    /// 1. Every element matched by any candidate selector is scored by its
    ///    descendant anchor count; the densest one with at least one anchor
    ///    wins, regardless of which selector matched it.
    /// 2. Otherwise every fallback element (`div` by default) with more than
    ///    `min_fallback_anchors` anchors is scored the same way.
    /// 3. Otherwise `None`; callers use the whole document instead.
    ///
    /// Ties go to the element seen first.
    pub fn select<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        let named = self
            .candidates
            .iter()
            .flat_map(|selector| document.select(selector))
            .map(|element| (element, self.anchor_count(element)))
            .filter(|(_, count)| *count > 0);

        densest(named)
            .or_else(|| {
                let blocks = document
                    .select(&self.fallback)
                    .map(|element| (element, self.anchor_count(element)))
                    .filter(|(_, count)| *count > self.min_fallback_anchors);
                densest(blocks)
            })
            .map(|(element, _)| element)
    }

    /// Selector matching anchor elements
    pub fn anchor_selector(&self) -> &Selector {
        &self.anchor
    }

    fn anchor_count(&self, element: ElementRef<'_>) -> usize {
        element.select(&self.anchor).count()
    }
}

/// First element with the strictly highest anchor count
fn densest<'a>(
    scored: impl Iterator<Item = (ElementRef<'a>, usize)>,
) -> Option<(ElementRef<'a>, usize)> {
    scored.reduce(|best, candidate| {
        if candidate.1 > best.1 {
            candidate
        } else {
            best
        }
    })
}

fn parse_selector(selector: &str) -> ConfigResult<Selector> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}
