use crate::config::types::{ApiConfig, ArchiveConfig, Config, PollingConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_archive_config(&config.archive)?;
    validate_polling_config(&config.polling)?;
    Ok(())
}

/// Validates remote service settings
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    validate_base_url(&config.base_url)?;

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates that a base URL is an absolute http(s) URL
pub fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url '{}': {}", base_url, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use http or https",
            base_url
        )));
    }

    Ok(())
}

/// Validates archive settings
fn validate_archive_config(config: &ArchiveConfig) -> Result<(), ConfigError> {
    if config.root.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "archive root cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates polling settings
///
/// An interval of zero is allowed and means "poll back to back".
fn validate_polling_config(config: &PollingConfig) -> Result<(), ConfigError> {
    if config.max_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max_attempts must be >= 1, got {}",
            config.max_attempts
        )));
    }
    Ok(())
}
