//! Text decoding for fetched pages
//!
//! Catalog sites frequently mislabel their encoding or omit it entirely.
//! Decoding is a pluggable strategy so a site-specific detector can replace
//! the default one.

use crate::ConfigError;
use encoding_rs::{Encoding, GBK, UTF_8, WINDOWS_1252};

/// Number of leading bytes searched for a `<meta charset>` declaration
const META_SNIFF_LEN: usize = 1024;

/// Turns a response body into text
pub trait TextDecoder: Send + Sync {
    /// Decodes `body`, given the charset declared by the transport (if any)
    ///
    /// Decoding never fails; malformed input degrades to replacement
    /// characters.
    fn decode(&self, body: &[u8], declared: Option<&str>) -> String;
}

/// Default decoding strategy
///
/// # Resolution Order
///
/// 1. Charset from the `Content-Type` header, unless it is the
///    low-fidelity ISO-8859-1 default
/// 2. Charset from a `<meta>` tag near the top of the document
/// 3. UTF-8
///
/// Whenever the chosen encoding is UTF-8 (declared or assumed) and the body
/// is not valid UTF-8, `fallback` is used instead.
#[derive(Debug, Clone, Copy)]
pub struct SniffingDecoder {
    fallback: &'static Encoding,
}

impl Default for SniffingDecoder {
    fn default() -> Self {
        Self::new(GBK)
    }
}

impl SniffingDecoder {
    pub fn new(fallback: &'static Encoding) -> Self {
        Self { fallback }
    }

    /// Creates a decoder whose fallback encoding is given by a WHATWG label
    pub fn from_label(label: &str) -> Result<Self, ConfigError> {
        Encoding::for_label(label.as_bytes())
            .map(Self::new)
            .ok_or_else(|| ConfigError::UnknownEncoding(label.to_string()))
    }

    pub fn fallback(&self) -> &'static Encoding {
        self.fallback
    }
}

impl TextDecoder for SniffingDecoder {
    fn decode(&self, body: &[u8], declared: Option<&str>) -> String {
        let declared = declared
            .and_then(|label| Encoding::for_label(label.trim().as_bytes()))
            .filter(|encoding| *encoding != WINDOWS_1252);

        let encoding = declared
            .or_else(|| sniff_meta_charset(body))
            .unwrap_or(UTF_8);

        let (text, _, had_errors) = encoding.decode(body);
        // Sites often claim UTF-8 while serving a national encoding
        if !had_errors || encoding != UTF_8 {
            return text.into_owned();
        }

        tracing::debug!(
            "Body is not valid UTF-8, decoding as {}",
            self.fallback.name()
        );
        let (text, _, _) = self.fallback.decode(body);
        text.into_owned()
    }
}

/// Extracts the charset parameter from a `Content-Type` header value
pub fn charset_from_content_type(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches(|c| c == '"' || c == '\''))
        } else {
            None
        }
    })
}

/// Looks for a `charset=` declaration in the head of the document
fn sniff_meta_charset(body: &[u8]) -> Option<&'static Encoding> {
    let head = &body[..body.len().min(META_SNIFF_LEN)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();

    let start = head.find("charset=")? + "charset=".len();
    let label: String = head[start..]
        .trim_start_matches(|c: char| c == '"' || c == '\'' || c.is_whitespace())
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
        .collect();

    Encoding::for_label(label.as_bytes())
}
