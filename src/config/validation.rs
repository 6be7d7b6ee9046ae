use crate::catalog::{ContainerSelector, LinkClassifier};
use crate::config::types::{Config, CrawlerConfig, FetcherConfig};
use crate::ConfigError;

/// Upper bound on the page cap
const MAX_PAGES_LIMIT: u32 = 10_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_keywords(config)?;

    // Compiling the heuristics surfaces bad selectors and patterns up front
    ContainerSelector::from_config(&config.container)?;
    LinkClassifier::from_config(&config.classifier, &config.keyword_table())?;

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 || config.max_pages > MAX_PAGES_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_pages must be between 1 and {}, got {}",
            MAX_PAGES_LIMIT, config.max_pages
        )));
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1".to_string(),
        ));
    }

    if encoding_rs::Encoding::for_label(config.fallback_encoding.as_bytes()).is_none() {
        return Err(ConfigError::UnknownEncoding(
            config.fallback_encoding.clone(),
        ));
    }

    Ok(())
}

/// Validates keyword table rows
fn validate_keywords(config: &Config) -> Result<(), ConfigError> {
    if let Some(rule) = config.keywords.iter().find(|rule| rule.text.is_empty()) {
        // An empty keyword would match every link
        return Err(ConfigError::Validation(format!(
            "keyword text cannot be empty (effect {:?})",
            rule.effect
        )));
    }

    Ok(())
}
