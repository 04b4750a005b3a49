/// Crawl job lifecycle tracking
///
/// A job starts `Pending` when the service accepts it and ends in exactly one
/// terminal state.
use crate::api::JobHandle;
use std::fmt;

/// Represents the current state of a crawl job as seen by this client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobState {
    /// Job accepted by the service and still being observed
    Pending,

    /// Service reported the job as completed
    Completed,

    /// A status check failed, so observation stopped
    Failed,

    /// Polling gave up before the service reported completion
    TimedOut,
}

impl JobState {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::TimedOut => "timed_out",
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A crawl job started by this session
#[derive(Debug, Clone)]
pub struct CrawlJob {
    pub handle: JobHandle,
    pub source_url: String,
    pub max_depth: u32,
    pub limit: u32,
    pub include_paths: Vec<String>,
    pub exclude_paths: Vec<String>,
    state: JobState,
}

impl CrawlJob {
    pub fn new(
        handle: JobHandle,
        source_url: impl Into<String>,
        options: &crate::api::CrawlOptions,
    ) -> Self {
        Self {
            handle,
            source_url: source_url.into(),
            max_depth: options.max_depth,
            limit: options.limit,
            include_paths: options.include_paths.clone(),
            exclude_paths: options.exclude_paths.clone(),
            state: JobState::Pending,
        }
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    /// Moves a pending job into a terminal state
    ///
    /// Returns false, leaving the job untouched, if it is already terminal or
    /// `next` is `Pending`.
    pub fn finish(&mut self, next: JobState) -> bool {
        if self.state.is_terminal() || !next.is_terminal() {
            return false;
        }
        tracing::debug!("Crawl job {} -> {}", self.handle, next);
        self.state = next;
        true
    }
}
