//! Archive record and metadata types

use crate::api::OutputFormat;
use crate::archive::ExportCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// How saved content should be written and named
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Markdown,
    Html,
    Text,
    Json,
}

impl ContentType {
    /// Extension appended when a filename has no recognized one
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Html => "html",
            Self::Json => "json",
            Self::Text => "txt",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl From<OutputFormat> for ContentType {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Markdown => Self::Markdown,
            OutputFormat::Html => Self::Html,
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// Content handed to the archive
#[derive(Debug, Clone, PartialEq)]
pub enum ExportContent {
    Text(String),
    Json(Value),
}

impl ExportContent {
    /// Returns true for a JSON object, the only shape that can hold metadata inline
    pub fn is_json_mapping(&self) -> bool {
        matches!(self, Self::Json(Value::Object(_)))
    }
}

impl From<String> for ExportContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for ExportContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Value> for ExportContent {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// Descriptive metadata attached to an export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    pub export_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ContentType>,
}

impl ExportMetadata {
    /// Creates metadata stamped with the current time
    pub fn new(
        description: impl Into<String>,
        tags: impl IntoIterator<Item = String>,
        source_url: Option<String>,
    ) -> Self {
        Self {
            description: description.into(),
            tags: tags
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            export_date: Utc::now(),
            source_url,
            format: None,
        }
    }

    /// Case-insensitive match against description, tags, and source URL
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.description.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
            || self
                .source_url
                .as_deref()
                .is_some_and(|u| u.to_lowercase().contains(needle))
    }
}

/// A saved file in the archive
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRecord {
    pub path: PathBuf,
    pub filename: String,
    pub category: ExportCategory,
    pub size_bytes: u64,
    pub modified: DateTime<Utc>,
    pub metadata: Option<ExportMetadata>,
}

impl ExportRecord {
    /// Case-insensitive match against the filename and any metadata
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.filename.to_lowercase().contains(&needle)
            || self.metadata.as_ref().is_some_and(|m| m.matches(&needle))
    }
}
