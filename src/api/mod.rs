//! Gateway to the remote Firecrawl service
//!
//! This module contains:
//! - Request builders for scrape, crawl, and map calls
//! - Typed views over the service responses
//! - Translation of HTTP outcomes into `ExplorerError`

mod client;
mod types;

pub use client::{build_http_client, idempotency_key_for, ApiClient, IDEMPOTENCY_HEADER};
pub use types::{
    ContentResult, CrawlInitiated, CrawlOptions, CrawlRequest, CrawlStatus, JobHandle, LinkSet,
    MapOptions, MapRequest, OutputFormat, ScrapeOptions, ScrapeRequest, STATUS_COMPLETED,
};

use crate::{ExplorerError, Result};

impl CrawlInitiated {
    /// Extracts the job handle, failing when the service returned no id
    pub fn job_handle(&self) -> Result<JobHandle> {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| JobHandle(id.to_string()))
            .ok_or_else(|| ExplorerError::InvalidResponse {
                endpoint: "/v1/crawl".to_string(),
                message: "no crawl id returned".to_string(),
            })
    }
}
