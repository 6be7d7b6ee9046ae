//! Output module for Chapter-Scout
//!
//! The process writes exactly one JSON document to stdout: either the
//! chapter array or an error object. Non-ASCII text is emitted literally.

use crate::catalog::Chapter;

/// Structured error reported in place of the chapter list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPayload {
    pub error: String,
}

impl ErrorPayload {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// Renders the payload as a JSON object
    pub fn to_json(&self) -> String {
        serde_json::json!({ "error": self.error }).to_string()
    }
}

/// Renders chapters as a JSON array of `{"title", "url"}` objects
///
/// # Example
///
/// ```
/// use chapter_scout::catalog::Chapter;
/// use chapter_scout::output::render_chapters;
///
/// let chapters = vec![Chapter {
///     title: "第1章".to_string(),
///     url: "https://example.com/1.html".to_string(),
/// }];
/// let json = render_chapters(&chapters, false).unwrap();
/// assert_eq!(json, r#"[{"title":"第1章","url":"https://example.com/1.html"}]"#);
/// ```
pub fn render_chapters(chapters: &[Chapter], pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(chapters)
    } else {
        serde_json::to_string(chapters)
    }
}
