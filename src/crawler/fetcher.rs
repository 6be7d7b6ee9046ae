//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with browser-like headers
//! - GET requests with a bounded timeout
//! - Charset-aware decoding of the response body
//! - Error classification
//!
//! No failure escapes this module: the walker only ever sees "text" or
//! "no content".

use crate::config::FetcherConfig;
use crate::crawler::encoding::{charset_from_content_type, SniffingDecoder, TextDecoder};
use crate::{ConfigError, ScoutError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Source of page text for the catalog walker
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url` and returns its decoded text, or `None` on any failure
    async fn fetch(&self, url: &Url) -> Option<String>;
}

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Content-Type header value
        content_type: Option<String>,
        /// Decoded page body
        body: String,
    },

    /// Response is not text (Content-Type mismatch)
    ContentMismatch {
        /// The actual Content-Type received
        content_type: String,
    },

    /// Non-success HTTP status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, DNS failure, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns the body of a successful fetch
    pub fn into_body(self) -> Option<String> {
        match self {
            Self::Success { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(ScoutError)` - A header value is invalid or the client failed to build
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, ScoutError> {
    let mut headers = HeaderMap::new();
    let accept = HeaderValue::from_str(&config.accept)
        .map_err(|e| ConfigError::Validation(format!("Invalid accept header: {}", e)))?;
    headers.insert(ACCEPT, accept);

    let client = Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Returns true if a Content-Type denotes something we can read as a page
fn is_textual(content_type: &str) -> bool {
    let mime = content_type.to_ascii_lowercase();
    mime.starts_with("text/") || mime.contains("html") || mime.contains("xml")
}

/// Fetches a URL and decodes its body
///
/// # Error Classification
///
/// | Condition | Result |
/// |-----------|--------|
/// | Non-2xx status | HttpError |
/// | Non-text Content-Type | ContentMismatch |
/// | Timeout, connection refused, DNS failure | NetworkError |
/// | Body read failure | NetworkError |
///
/// Nothing is retried.
pub async fn fetch_url(client: &Client, url: &Url, decoder: &dyn TextDecoder) -> FetchResult {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if let Some(content_type) = content_type.as_deref() {
        if !is_textual(content_type) {
            return FetchResult::ContentMismatch {
                content_type: content_type.to_string(),
            };
        }
    }

    match response.bytes().await {
        Ok(bytes) => {
            let charset = content_type.as_deref().and_then(charset_from_content_type);
            FetchResult::Success {
                final_url,
                status_code: status.as_u16(),
                body: decoder.decode(&bytes, charset),
                content_type,
            }
        }
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}

/// `PageFetcher` backed by a reqwest client
pub struct HttpFetcher {
    client: Client,
    decoder: Box<dyn TextDecoder>,
}

impl HttpFetcher {
    /// Creates a fetcher with the default decoding strategy
    pub fn new(config: &FetcherConfig) -> Result<Self, ScoutError> {
        Ok(Self {
            client: build_http_client(config)?,
            decoder: Box::new(SniffingDecoder::from_label(&config.fallback_encoding)?),
        })
    }

    /// Replaces the decoding strategy
    pub fn with_decoder(mut self, decoder: impl TextDecoder + 'static) -> Self {
        self.decoder = Box::new(decoder);
        self
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Option<String> {
        let result = fetch_url(&self.client, url, self.decoder.as_ref()).await;
        match &result {
            FetchResult::Success { final_url, .. } if final_url != url.as_str() => {
                tracing::debug!("{} redirected to {}", url, final_url);
            }
            FetchResult::Success { .. } => {}
            FetchResult::HttpError { status_code } => {
                tracing::warn!("HTTP {} for {}", status_code, url);
            }
            FetchResult::ContentMismatch { content_type } => {
                tracing::warn!("Expected text from {}, got {}", url, content_type);
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!("Failed to fetch {}: {}", url, error);
            }
        }
        result.into_body()
    }
}
