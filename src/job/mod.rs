//! Crawl job lifecycle
//!
//! - `JobState` / `CrawlJob`: the local view of a remote crawl job
//! - `JobPoller`: bounded fixed-interval polling until completion

mod poller;
mod state;

pub use poller::{CrawlStatusSource, JobPoller};
pub use state::{CrawlJob, JobState};
