//! Request and response types for the Firecrawl v1 API
//!
//! Response types keep every field the service sends: known fields are typed,
//! everything else lands in `extra` so a saved result is the full body.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;

/// Content formats the service can return for a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Markdown,
    Html,
    Text,
    Json,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [Self::Markdown, Self::Html, Self::Text, Self::Json];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-page scrape options, shared by scrape and crawl requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeOptions {
    pub formats: BTreeSet<OutputFormat>,
    pub only_main_content: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            formats: BTreeSet::from([OutputFormat::Markdown]),
            only_main_content: true,
        }
    }
}

impl ScrapeOptions {
    pub fn single(format: OutputFormat, only_main_content: bool) -> Self {
        Self {
            formats: BTreeSet::from([format]),
            only_main_content,
        }
    }
}

/// Body of `POST /v1/scrape`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeRequest {
    pub url: String,
    #[serde(flatten)]
    pub options: ScrapeOptions,
}

/// Crawl options chosen by the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlOptions {
    pub max_depth: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_paths: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_paths: Vec<String>,
    pub scrape_options: ScrapeOptions,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_depth: 2,
            limit: 100,
            include_paths: Vec::new(),
            exclude_paths: Vec::new(),
            scrape_options: ScrapeOptions::default(),
        }
    }
}

/// Body of `POST /v1/crawl`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlRequest {
    pub url: String,
    #[serde(flatten)]
    pub options: CrawlOptions,
}

/// Map options chosen by the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub include_subdomains: bool,
    pub limit: u32,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            search: None,
            include_subdomains: false,
            limit: 100,
        }
    }
}

/// Body of `POST /v1/map`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapRequest {
    pub url: String,
    #[serde(flatten)]
    pub options: MapOptions,
}

/// The `data` envelope of a scrape response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContentResult {
    /// Returns the textual content for a non-JSON format
    pub fn text_for(&self, format: OutputFormat) -> Option<&str> {
        match format {
            OutputFormat::Markdown => self.markdown.as_deref(),
            OutputFormat::Html => self.html.as_deref(),
            OutputFormat::Text => self.text.as_deref(),
            OutputFormat::Json => None,
        }
    }

    /// Metadata entries with non-null values, rendered as strings
    pub fn metadata_rows(&self) -> Vec<(String, String)> {
        self.metadata
            .iter()
            .flat_map(|m| m.iter())
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| {
                let rendered = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), rendered)
            })
            .collect()
    }
}

/// Response to `POST /v1/crawl`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrawlInitiated {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Opaque identifier of a remote crawl job
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobHandle(pub String);

impl JobHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Response to `GET /v1/crawl/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrawlStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Remote status value that ends polling
pub const STATUS_COMPLETED: &str = "completed";

impl CrawlStatus {
    pub fn is_completed(&self) -> bool {
        self.status == STATUS_COMPLETED
    }

    /// Pages returned so far, empty when the service sent none
    pub fn pages(&self) -> &[Value] {
        self.data.as_deref().unwrap_or(&[])
    }
}

/// Response to `POST /v1/map`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkSet {
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
