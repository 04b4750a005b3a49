//! Settings and help actions

use crate::api::ApiClient;
use crate::archive::ExportArchive;
use crate::config::{save_config, validate, validate_base_url};
use crate::session::{ActionResult, Prompt, Session};
use std::path::PathBuf;

const HELP_TEXT: &str = "\
Scrape URL       Extract content from a single page as markdown, HTML, text, or JSON.
Crawl Website    Crawl a site and collect every page; the crawl runs remotely and
                 is polled until it completes.
Map Website      Discover the links of a site, optionally filtered by a search term.
Manage Exports   Browse, search, view, and delete saved results.
Settings         Change the API URL, API key, and export directory.
Quit             Leave the explorer.

Saved results live under the export directory in scrapes/, crawls/, maps/,
docs/ and custom/. Descriptions and tags are stored next to each file in a
<name>.meta.json sidecar, or inside the file for JSON results.";

/// Key entered to remove a stored API key
const CLEAR_KEY: &str = "-";

impl<P: Prompt> Session<P> {
    pub(super) fn settings(&mut self) -> ActionResult {
        self.prompt.heading("Settings");
        self.show_settings();

        if !self.prompt.confirm("Do you want to update these settings?", false)? {
            return Ok(());
        }

        let mut config = self.config.clone();

        let base_url = self
            .prompt
            .input("Firecrawl API URL", &config.api.base_url)?;
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        validate_base_url(&base_url)?;
        config.api.base_url = base_url;

        let key = self
            .prompt
            .secret("API key (empty keeps the current key, '-' clears it)")?;
        match key.trim() {
            "" => {}
            CLEAR_KEY => config.api.api_key = None,
            key => config.api.api_key = Some(key.to_string()),
        }

        let root = self.prompt.input(
            "Export directory",
            &config.archive.root.display().to_string(),
        )?;
        config.archive.root = PathBuf::from(root.trim());

        validate(&config)?;
        let client = ApiClient::new(&config.api)?;
        let archive = ExportArchive::new(config.archive.root.clone());
        archive.ensure_category_directories()?;

        self.client = client;
        self.archive = archive;
        self.config = config;
        tracing::info!("Settings updated; API at {}", self.config.api.base_url);
        self.prompt.success("Settings saved successfully!");

        if let Some(path) = &self.config_path {
            let question = format!("Write these settings to {}?", path.display());
            if self.prompt.confirm(&question, true)? {
                save_config(path, &self.config)?;
                self.prompt
                    .success(&format!("Settings written to {}", path.display()));
            }
        }

        Ok(())
    }

    fn show_settings(&self) {
        let key = if self.config.api.credential().is_some() {
            "*****"
        } else {
            "Not set"
        };
        let rows = vec![
            vec!["API URL".to_string(), self.config.api.base_url.clone()],
            vec!["API Key".to_string(), key.to_string()],
            vec![
                "Export Directory".to_string(),
                self.config.archive.root.display().to_string(),
            ],
            vec![
                "Poll Interval".to_string(),
                format!("{}s", self.config.polling.interval_secs),
            ],
            vec![
                "Max Poll Attempts".to_string(),
                self.config.polling.max_attempts.to_string(),
            ],
        ];
        self.prompt
            .table("Current Settings", &["Setting", "Value"], &rows);
    }

    pub(super) fn help(&self) {
        self.prompt.panel("Help", HELP_TEXT);
    }
}
