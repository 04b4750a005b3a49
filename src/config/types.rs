use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default address of a self-hosted Firecrawl instance
pub const DEFAULT_API_URL: &str = "http://localhost:3002";

/// Main configuration structure for Firecrawl Explorer
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub polling: PollingConfig,
}

/// Remote service connection settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the Firecrawl API
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Bearer credential, optional for self-hosted instances
    #[serde(rename = "api-key", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            timeout_secs: 120,
        }
    }
}

/// Export archive location
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Directory holding the category subdirectories
    pub root: PathBuf,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            root: home.join("firecrawl_data"),
        }
    }
}

/// Crawl job polling behaviour
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Seconds to wait between status checks
    #[serde(rename = "interval-secs")]
    pub interval_secs: u64,

    /// Maximum number of status checks before giving up
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: 2,
            max_attempts: 30,
        }
    }
}

impl ApiConfig {
    /// Returns the configured key, treating an empty string as unset
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }
}
