//! Fixed-interval polling of crawl job status
//!
//! The poller issues at most `max_attempts` status checks and sleeps once
//! between consecutive checks. There is no backoff. Dropping the future stops
//! observation; the remote job keeps running on its own.

use crate::api::{ApiClient, CrawlStatus};
use crate::{ExplorerError, Result};
use std::time::Duration;
use tokio::time::Instant;

/// Anything that can report the status of a crawl job
#[allow(async_fn_in_trait)]
pub trait CrawlStatusSource {
    async fn crawl_status(&self, job_id: &str) -> Result<CrawlStatus>;
}

impl CrawlStatusSource for ApiClient {
    async fn crawl_status(&self, job_id: &str) -> Result<CrawlStatus> {
        self.get_crawl_status(job_id).await
    }
}

/// Drives a crawl job to completion by polling its status
pub struct JobPoller<'a, S> {
    source: &'a S,
    interval: Duration,
    max_attempts: u32,
}

impl<'a, S: CrawlStatusSource> JobPoller<'a, S> {
    pub fn new(source: &'a S, interval_secs: u64, max_attempts: u32) -> Self {
        Self {
            source,
            interval: Duration::from_secs(interval_secs),
            max_attempts,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Polls until the job reports `completed`
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlStatus)` - The first status observed as completed
    /// * `Err(ExplorerError::JobTimeout)` - `max_attempts` checks without completion
    /// * `Err(_)` - A status check failed; polling stops immediately
    pub async fn await_completion(&self, job_id: &str) -> Result<CrawlStatus> {
        self.await_completion_with_progress(job_id, |_, _| {}).await
    }

    /// Like `await_completion`, calling `on_attempt(attempt, status)` after
    /// every status check that did not complete the job
    pub async fn await_completion_with_progress<F>(
        &self,
        job_id: &str,
        mut on_attempt: F,
    ) -> Result<CrawlStatus>
    where
        F: FnMut(u32, &CrawlStatus),
    {
        let started = Instant::now();

        for attempt in 1..=self.max_attempts {
            let status = self.source.crawl_status(job_id).await?;
            tracing::debug!(
                "Crawl {} attempt {}/{}: {}",
                job_id,
                attempt,
                self.max_attempts,
                status.status
            );

            if status.is_completed() {
                tracing::info!(
                    "Crawl {} completed with {} pages",
                    job_id,
                    status.pages().len()
                );
                return Ok(status);
            }

            on_attempt(attempt, &status);

            if attempt < self.max_attempts {
                tokio::time::sleep(self.interval).await;
            }
        }

        let elapsed_secs = started.elapsed().as_secs();
        tracing::warn!(
            "Crawl {} still not complete after {} attempts ({}s)",
            job_id,
            self.max_attempts,
            elapsed_secs
        );
        Err(ExplorerError::JobTimeout {
            job_id: job_id.to_string(),
            elapsed_secs,
        })
    }
}
