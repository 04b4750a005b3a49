//! Filename rules for the export archive
//!
//! Content files are named `<descriptor>_<timestamp>[_<n>].<ext>`; the
//! metadata sidecar for a content file is `<stem>.meta.json`.

use crate::archive::ContentType;
use crate::ArchiveError;
use chrono::{DateTime, TimeZone};
use std::path::{Path, PathBuf};
use url::Url;

/// Extensions accepted as-is on a user-supplied filename
pub const RECOGNIZED_EXTENSIONS: [&str; 4] = ["md", "html", "txt", "json"];

/// Suffix identifying metadata sidecar files
pub const SIDECAR_SUFFIX: &str = ".meta.json";

/// Timestamp layout used in generated filenames
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Replaces path separators and trims surrounding whitespace
pub fn sanitize_filename(filename: &str) -> Result<String, ArchiveError> {
    let cleaned: String = filename
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            other => other,
        })
        .collect();

    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        return Err(ArchiveError::InvalidFilename(filename.to_string()));
    }
    Ok(cleaned)
}

/// Splits a filename into stem and recognized extension
///
/// Only the four recognized extensions count, so `example.com_20240101`
/// has no extension.
pub fn split_extension(filename: &str) -> (&str, Option<&str>) {
    if let Some((stem, ext)) = filename.rsplit_once('.') {
        if !stem.is_empty() && RECOGNIZED_EXTENSIONS.contains(&ext) {
            return (stem, Some(ext));
        }
    }
    (filename, None)
}

/// Returns `(stem, extension)`, deriving the extension from the content type
/// when the filename lacks a recognized one
///
/// A stem ending in `.meta` becomes `_meta` so content never takes a
/// sidecar name.
pub fn resolve_extension(filename: &str, content_type: ContentType) -> (String, String) {
    let (stem, ext) = match split_extension(filename) {
        (stem, Some(ext)) => (stem, ext),
        (stem, None) => (stem, content_type.extension()),
    };
    let stem = match stem.strip_suffix(".meta") {
        Some(base) => format!("{}_meta", base),
        None => stem.to_string(),
    };
    (stem, ext.to_string())
}

/// Filename for the `n`-th collision candidate (`n == 0` is the plain name)
pub fn candidate_name(stem: &str, ext: &str, n: u32) -> String {
    if n == 0 {
        format!("{}.{}", stem, ext)
    } else {
        format!("{}_{}.{}", stem, n, ext)
    }
}

pub fn is_sidecar(filename: &str) -> bool {
    filename.ends_with(SIDECAR_SUFFIX)
}

/// Sidecar path for a content file
pub fn sidecar_path(content_path: &Path) -> PathBuf {
    let filename = content_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let (stem, _) = split_extension(filename);
    content_path.with_file_name(format!("{}{}", stem, SIDECAR_SUFFIX))
}

/// Host part of a URL, falling back to the raw text before the first `/`
pub fn url_descriptor(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.host_str().unwrap_or("unknown").to_string(),
        Err(_) => url
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .split('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("unknown")
            .to_string(),
    }
}

/// Builds `[<prefix>_]<host>_<timestamp>` for a result fetched from `url`
pub fn default_filename<Tz>(prefix: Option<&str>, url: &str, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let host = url_descriptor(url);
    let timestamp = at.format(TIMESTAMP_FORMAT);
    match prefix {
        Some(prefix) => format!("{}_{}_{}", prefix, host, timestamp),
        None => format!("{}_{}", host, timestamp),
    }
}
