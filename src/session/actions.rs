//! Scrape, crawl, and map actions

use crate::api::{CrawlOptions, MapOptions, OutputFormat, ScrapeOptions};
use crate::archive::{
    default_filename, ContentType, ExportCategory, ExportContent, ExportMetadata,
};
use crate::job::{CrawlJob, JobPoller, JobState};
use crate::session::{menu, split_list, ActionResult, MenuAction, Prompt, Session, DEFAULT_TEST_URL};
use crate::{ArchiveError, ExplorerError};
use chrono::Local;
use serde_json::{json, Map, Value};
use url::Url;

/// A result the operator may save
pub(super) struct SaveOffer {
    pub action: MenuAction,
    pub filename_prefix: Option<&'static str>,
    pub source_url: String,
    pub content: ExportContent,
    pub content_type: ContentType,
}

impl<P: Prompt> Session<P> {
    pub(super) async fn scrape(&self) -> ActionResult {
        self.prompt.heading("Scrape URL");

        let url = self.ask_url("Enter the URL to scrape")?;
        let formats = menu::labels(&OutputFormat::ALL, OutputFormat::as_str);
        let format = OutputFormat::ALL[self.prompt.select("Choose a format", &formats, 0)?];
        let only_main_content = self.prompt.confirm("Extract only main content?", true)?;

        let spinner = self.prompt.progress("Scraping URL...", None);
        let result = self
            .client
            .scrape(&url, ScrapeOptions::single(format, only_main_content))
            .await;
        spinner.finish_and_clear();
        let result = result?;

        let content = match format {
            OutputFormat::Json => match &result.json {
                Some(value) => ExportContent::Json(value.clone()),
                None => {
                    self.prompt
                        .warn(&format!("No {} content returned", format));
                    ExportContent::Json(Value::Object(Map::new()))
                }
            },
            other => match result.text_for(other) {
                Some(text) => ExportContent::Text(text.to_string()),
                None => {
                    self.prompt
                        .warn(&format!("No {} content returned", other));
                    ExportContent::Text(String::new())
                }
            },
        };

        let body = match &content {
            ExportContent::Text(text) => text.clone(),
            ExportContent::Json(value) => {
                serde_json::to_string_pretty(value).map_err(ArchiveError::from)?
            }
        };
        self.prompt
            .panel(&format!("Scrape Results for {}", url), &body);

        let metadata_rows: Vec<Vec<String>> = result
            .metadata_rows()
            .into_iter()
            .map(|(k, v)| vec![k, v])
            .collect();
        if !metadata_rows.is_empty() {
            self.prompt
                .table("Metadata", &["Property", "Value"], &metadata_rows);
        }

        self.offer_save(SaveOffer {
            action: MenuAction::Scrape,
            filename_prefix: None,
            source_url: url,
            content,
            content_type: format.into(),
        })
    }

    pub(super) async fn crawl(&self) -> ActionResult {
        self.prompt.heading("Crawl Website");

        let url = self.ask_url("Enter the URL to crawl")?;
        let exclude_paths = split_list(&self.prompt.input("Exclude paths (comma-separated)", "")?);
        let include_paths = split_list(&self.prompt.input("Include paths (comma-separated)", "")?);
        let defaults = CrawlOptions::default();
        let max_depth = self.ask_number("Maximum depth", defaults.max_depth)?;
        let limit = self.ask_number("Maximum pages to crawl", defaults.limit)?;

        let options = CrawlOptions {
            max_depth,
            limit,
            include_paths,
            exclude_paths,
            ..defaults
        };

        let spinner = self.prompt.progress("Initiating crawl...", None);
        let initiated = self.client.initiate_crawl(&url, options.clone()).await;
        spinner.finish_and_clear();
        let handle = initiated?.job_handle()?;

        let mut job = CrawlJob::new(handle, &url, &options);
        tracing::info!("Crawl {} initiated for {}", job.handle, job.source_url);
        self.prompt
            .info(&format!("Crawl initiated with ID: {}", job.handle));

        let polling = &self.config.polling;
        let poller = JobPoller::new(&self.client, polling.interval_secs, polling.max_attempts);
        let bar = self.prompt.progress(
            "Waiting for crawl to complete...",
            Some(u64::from(poller.max_attempts())),
        );
        let outcome = poller
            .await_completion_with_progress(job.handle.as_str(), |attempt, _| {
                bar.set_position(u64::from(attempt));
            })
            .await;
        bar.finish_and_clear();

        let status = match outcome {
            Ok(status) => {
                job.finish(JobState::Completed);
                status
            }
            Err(e) => {
                let state = match e {
                    ExplorerError::JobTimeout { .. } => JobState::TimedOut,
                    _ => JobState::Failed,
                };
                job.finish(state);
                return Err(e.into());
            }
        };

        let rows: Vec<Vec<String>> = status
            .pages()
            .iter()
            .map(|page| {
                let page_url = page
                    .pointer("/metadata/sourceURL")
                    .and_then(Value::as_str)
                    .unwrap_or("Unknown")
                    .to_string();
                let length = page
                    .get("markdown")
                    .and_then(Value::as_str)
                    .map_or(0, str::len);
                vec![page_url, "Success".to_string(), length.to_string()]
            })
            .collect();

        if rows.is_empty() {
            self.prompt.warn("Crawl completed but returned no pages");
        } else {
            self.prompt.table(
                &format!("Crawl Results for {}", url),
                &["URL", "Status", "Content Length"],
                &rows,
            );
        }

        let body = serde_json::to_value(&status).map_err(ArchiveError::from)?;
        self.offer_save(SaveOffer {
            action: MenuAction::Crawl,
            filename_prefix: Some("crawl"),
            source_url: url,
            content: ExportContent::Json(body),
            content_type: ContentType::Json,
        })
    }

    pub(super) async fn map(&self) -> ActionResult {
        self.prompt.heading("Map Website");

        let url = self.ask_url("Enter the URL to map")?;
        let search = self.prompt.input("Search term (optional)", "")?;
        let include_subdomains = self.prompt.confirm("Include subdomains?", false)?;
        let defaults = MapOptions::default();
        let limit = self.ask_number("Maximum links to return", defaults.limit)?;

        let options = MapOptions {
            search: Some(search.trim().to_string()).filter(|s| !s.is_empty()),
            include_subdomains,
            limit,
        };

        let spinner = self.prompt.progress("Mapping URL...", None);
        let result = self.client.map_links(&url, options).await;
        spinner.finish_and_clear();
        let links = result?.links;

        let rows: Vec<Vec<String>> = links.iter().map(|l| vec![l.clone()]).collect();
        self.prompt
            .table(&format!("Map Results for {}", url), &["URL"], &rows);
        self.prompt
            .success(&format!("Total links found: {}", links.len()));

        let body = json!({"url": url, "links": links, "total": links.len()});
        self.offer_save(SaveOffer {
            action: MenuAction::Map,
            filename_prefix: Some("map"),
            source_url: url,
            content: ExportContent::Json(body),
            content_type: ContentType::Json,
        })
    }

    /// Asks whether to save a result, then where and with what metadata
    pub(super) fn offer_save(&self, offer: SaveOffer) -> ActionResult {
        if !self
            .prompt
            .confirm("Do you want to save these results?", true)?
        {
            return Ok(());
        }

        let default_category = offer
            .action
            .default_category()
            .unwrap_or(ExportCategory::Custom);
        let category = self.ask_category(default_category)?;

        let suggested = default_filename(offer.filename_prefix, &offer.source_url, &Local::now());
        let filename = self.prompt.input("Enter filename", &suggested)?;

        let metadata = if self.prompt.confirm("Add a description and tags?", false)? {
            let description = self.prompt.input("Description", "")?;
            let tags = split_list(&self.prompt.input("Tags (comma-separated)", "")?);
            Some(ExportMetadata::new(
                description,
                tags,
                Some(offer.source_url.clone()),
            ))
        } else {
            None
        };

        let path = self.archive.save(
            category,
            &filename,
            &offer.content,
            offer.content_type,
            metadata.as_ref(),
        )?;
        self.prompt
            .success(&format!("Results saved to: {}", path.display()));
        Ok(())
    }

    /// Picks an archive category, preselecting `default`
    fn ask_category(&self, default: ExportCategory) -> ActionResult<ExportCategory> {
        let labels = menu::labels(&ExportCategory::ALL, ExportCategory::dir_name);
        let default_index = ExportCategory::ALL
            .iter()
            .position(|c| *c == default)
            .unwrap_or(0);
        let index = self
            .prompt
            .select("Save to category", &labels, default_index)?;
        Ok(ExportCategory::ALL[index])
    }

    fn ask_url(&self, prompt: &str) -> ActionResult<String> {
        let answer = self.prompt.input(prompt, DEFAULT_TEST_URL)?;
        let answer = answer.trim();
        let url = if answer.is_empty() { DEFAULT_TEST_URL } else { answer };

        match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(url.to_string()),
            _ => Err(ExplorerError::InvalidInput(format!("'{}' is not an http(s) URL", url)).into()),
        }
    }

    fn ask_number(&self, prompt: &str, default: u32) -> ActionResult<u32> {
        let answer = self.prompt.input(prompt, &default.to_string())?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(default);
        }
        answer.parse().map_err(|_| {
            ExplorerError::InvalidInput(format!("'{}' is not a whole number", answer)).into()
        })
    }
}
