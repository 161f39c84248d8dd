use crate::config::types::{Config, CrawlerConfig, HttpConfig};
use crate::ConfigError;

/// Upper bound for the politeness delay (milliseconds)
const MAX_FETCH_DELAY_MS: u64 = 60_000;

/// Upper bound for the request timeout (seconds)
const MAX_TIMEOUT_SECS: u64 = 300;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_http_config(&config.http)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.fetch_delay_ms > MAX_FETCH_DELAY_MS {
        return Err(ConfigError::Validation(format!(
            "fetch_delay_ms must be <= {}ms, got {}ms",
            MAX_FETCH_DELAY_MS, config.fetch_delay_ms
        )));
    }

    Ok(())
}

/// Validates outbound request configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and {}, got {}",
            MAX_TIMEOUT_SECS, config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    // Values end up in request headers
    for (name, value) in [
        ("user_agent", &config.user_agent),
        ("accept", &config.accept),
        ("accept_language", &config.accept_language),
    ] {
        if value.chars().any(|c| c.is_control()) {
            return Err(ConfigError::Validation(format!(
                "{} must not contain control characters",
                name
            )));
        }
    }

    Ok(())
}
