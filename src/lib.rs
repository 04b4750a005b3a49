//! Firecrawl Explorer: an interactive terminal client for a Firecrawl service
//!
//! This crate submits scrape, crawl and map requests to a remote Firecrawl
//! instance, follows asynchronous crawl jobs to completion, and keeps the
//! results in a categorized local export archive with optional metadata.

pub mod api;
pub mod archive;
pub mod config;
pub mod job;
pub mod session;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Firecrawl Explorer operations
#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("Remote service returned HTTP {status_code}: {body}")]
    RemoteService { status_code: u16, body: String },

    #[error("Crawl job {job_id} did not complete within {elapsed_secs} seconds")]
    JobTimeout { job_id: String, elapsed_secs: u64 },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised by the export archive
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Storage error at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Export not found: {0}")]
    NotFound(PathBuf),

    #[error("Deleted {content} but could not delete sidecar {sidecar}: {source}")]
    SidecarDelete {
        content: PathBuf,
        sidecar: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid filename: '{0}'")]
    InvalidFilename(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Firecrawl Explorer operations
pub type Result<T> = std::result::Result<T, ExplorerError>;

/// Result type alias for archive operations
pub type ArchiveResult<T> = std::result::Result<T, ArchiveError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use api::ApiClient;
pub use archive::{ExportArchive, ExportCategory, ExportMetadata, ExportRecord};
pub use config::Config;
pub use job::{JobPoller, JobState};
pub use session::Session;
