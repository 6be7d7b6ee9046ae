//! Page parsing and anchor extraction
//!
//! A `PageContext` lives only while one page is processed. Everything the
//! walker keeps is copied out as owned `Anchor`s and `Url`s.

use crate::catalog::ContainerSelector;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Text and target of an `<a>` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// All descendant text, trimmed
    pub text: String,

    /// Raw `href` attribute, if present
    pub href: Option<String>,
}

impl Anchor {
    fn from_element(element: ElementRef<'_>) -> Self {
        Self {
            text: element.text().collect::<String>().trim().to_string(),
            href: element.value().attr("href").map(str::to_string),
        }
    }

    /// The href, if present and non-empty
    pub fn href(&self) -> Option<&str> {
        self.href.as_deref().filter(|href| !href.is_empty())
    }
}

/// A fetched page, parsed and anchored at its own URL
pub struct PageContext {
    url: Url,
    document: Html,
}

impl PageContext {
    /// Parses `html`; malformed markup is tolerated, never rejected
    pub fn parse(url: Url, html: &str) -> Self {
        Self {
            url,
            document: Html::parse_document(html),
        }
    }

    /// URL the page was fetched from, used as the base for relative links
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Every anchor in the document, in document order
    pub fn anchors(&self) -> Vec<Anchor> {
        match Selector::parse("a") {
            Ok(selector) => self
                .document
                .select(&selector)
                .map(Anchor::from_element)
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Anchors of the catalog container, or of the whole page when no
    /// container qualifies
    pub fn catalog_anchors(&self, container: &ContainerSelector) -> Vec<Anchor> {
        let anchor = container.anchor_selector();
        match container.select(&self.document) {
            Some(element) => element.select(anchor).map(Anchor::from_element).collect(),
            None => {
                tracing::debug!("No catalog container on {}, using whole page", self.url);
                self.document.select(anchor).map(Anchor::from_element).collect()
            }
        }
    }

    /// Resolves an href against this page's URL
    pub fn resolve(&self, href: &str) -> Option<Url> {
        resolve_link(href, &self.url)
    }
}

/// Resolves a link href to an absolute URL
///
/// Returns None only if the href cannot be joined onto `base`.
///
/// # Examples
///
/// ```
/// use chapter_scout::crawler::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/book/1/index.html").unwrap();
/// let url = resolve_link("2.html", &base).unwrap();
/// assert_eq!(url.as_str(), "https://example.com/book/1/2.html");
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    base_url.join(href.trim()).ok()
}
