//! Session controller
//!
//! Runs the interactive loop `MainMenu -> action -> MainMenu`. Each action is
//! one request/response cycle against the gateway, optionally followed by a
//! save into the export archive. Faults are reported at the action boundary
//! and the loop continues; it ends on Quit or when the input stream closes.

mod actions;
mod exports;
pub mod menu;
mod prompt;
mod settings;
mod terminal;

pub use menu::{ExportsAction, MenuAction, RecordAction};
pub use prompt::{InputClosed, Prompt, PromptResult};
pub use terminal::TerminalPrompt;

use crate::api::ApiClient;
use crate::archive::ExportArchive;
use crate::config::Config;
use crate::{ArchiveError, ConfigError, ExplorerError, Result};
use std::path::PathBuf;

/// Default URL offered when asking for a target
pub const DEFAULT_TEST_URL: &str = "https://firecrawl.dev";

/// Why an action stopped early
#[derive(Debug)]
pub enum SessionError {
    /// Input stream closed; the session ends
    Closed,
    /// A fault to report before returning to the menu
    Fault(ExplorerError),
}

impl From<InputClosed> for SessionError {
    fn from(_: InputClosed) -> Self {
        Self::Closed
    }
}

impl From<ExplorerError> for SessionError {
    fn from(e: ExplorerError) -> Self {
        Self::Fault(e)
    }
}

impl From<ArchiveError> for SessionError {
    fn from(e: ArchiveError) -> Self {
        Self::Fault(e.into())
    }
}

impl From<ConfigError> for SessionError {
    fn from(e: ConfigError) -> Self {
        Self::Fault(e.into())
    }
}

pub type ActionResult<T = ()> = std::result::Result<T, SessionError>;

/// One interactive operator session
pub struct Session<P> {
    prompt: P,
    config: Config,
    config_path: Option<PathBuf>,
    client: ApiClient,
    archive: ExportArchive,
}

impl<P: Prompt> Session<P> {
    /// Builds the gateway client and archive from `config`
    ///
    /// Category directories are created up front.
    pub fn new(config: Config, prompt: P) -> Result<Self> {
        let client = ApiClient::new(&config.api)?;
        let archive = ExportArchive::new(config.archive.root.clone());
        archive.ensure_category_directories()?;

        Ok(Self {
            prompt,
            config,
            config_path: None,
            client,
            archive,
        })
    }

    /// Lets the Settings action persist changes to `path`
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn archive(&self) -> &ExportArchive {
        &self.archive
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    /// Runs the main menu until Quit or until input closes
    pub async fn run(&mut self) {
        tracing::info!(
            "Session started against {} ({})",
            self.client.base_url(),
            if self.client.has_credential() { "authenticated" } else { "anonymous" }
        );

        loop {
            let labels = menu::labels(&MenuAction::ALL, MenuAction::label);
            let action = match self.prompt.select("Choose an option", &labels, 0) {
                Ok(index) => MenuAction::ALL[index],
                Err(InputClosed) => break,
            };

            if action == MenuAction::Quit {
                self.prompt.success("Thank you for using Firecrawl Explorer!");
                break;
            }

            match self.dispatch(action).await {
                Ok(()) => {}
                Err(SessionError::Closed) => break,
                Err(SessionError::Fault(e)) => {
                    tracing::error!("{} failed: {}", action.label(), e);
                    self.prompt.error(&e.to_string());
                }
            }

            if action.pauses_after() && self.prompt.pause().is_err() {
                break;
            }
        }

        tracing::info!("Session ended");
    }

    /// Runs a single menu action
    pub async fn dispatch(&mut self, action: MenuAction) -> ActionResult {
        match action {
            MenuAction::Scrape => self.scrape().await,
            MenuAction::Crawl => self.crawl().await,
            MenuAction::Map => self.map().await,
            MenuAction::ManageExports => self.manage_exports(),
            MenuAction::Settings => self.settings(),
            MenuAction::Help => {
                self.help();
                Ok(())
            }
            MenuAction::Quit => Ok(()),
        }
    }
}

/// Splits a comma-separated answer into trimmed, non-empty items
pub fn split_list(answer: &str) -> Vec<String> {
    answer
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Formats a byte count for display
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
