//! File-backed export archive
//!
//! Layout: `<root>/<category>/<file>` with an optional `<stem>.meta.json`
//! sidecar next to each content file. Files are written whole and never
//! overwritten; a name collision moves on to the next `_<n>` suffix.

use crate::archive::naming::{
    candidate_name, is_sidecar, resolve_extension, sanitize_filename, sidecar_path,
    split_extension, SIDECAR_SUFFIX,
};
use crate::archive::{ContentType, ExportCategory, ExportContent, ExportMetadata, ExportRecord};
use crate::{ArchiveError, ArchiveResult};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Key under which metadata is merged into JSON mapping content
pub const INLINE_METADATA_KEY: &str = "export_metadata";

/// Files removed by a successful delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub content: PathBuf,
    pub sidecar: Option<PathBuf>,
}

/// Categorized store for saved results
#[derive(Debug, Clone)]
pub struct ExportArchive {
    root: PathBuf,
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ArchiveError {
    let path = path.to_path_buf();
    move |source| ArchiveError::Io { path, source }
}

impl ExportArchive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn category_dir(&self, category: ExportCategory) -> PathBuf {
        self.root.join(category.dir_name())
    }

    /// Creates every category directory; existing directories are left alone
    pub fn ensure_category_directories(&self) -> ArchiveResult<()> {
        for category in ExportCategory::ALL {
            let dir = self.category_dir(category);
            fs::create_dir_all(&dir).map_err(|source| ArchiveError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Saves content under a category and returns the final path
    ///
    /// A filename without a recognized extension gets one from
    /// `content_type`. Metadata is merged inline for JSON mappings saved as
    /// JSON and written to a sidecar otherwise.
    pub fn save(
        &self,
        category: ExportCategory,
        filename: &str,
        content: &ExportContent,
        content_type: ContentType,
        metadata: Option<&ExportMetadata>,
    ) -> ArchiveResult<PathBuf> {
        self.ensure_category_directories()?;

        let dir = self.category_dir(category);
        let filename = sanitize_filename(filename)?;
        let (stem, ext) = resolve_extension(&filename, content_type);

        let metadata = metadata.map(|m| ExportMetadata {
            format: Some(content_type),
            ..m.clone()
        });
        let inline = content_type == ContentType::Json && content.is_json_mapping();
        let body = render_content(content, content_type, metadata.as_ref().filter(|_| inline))?;

        let claimed = claimed_stems(&dir)?;
        let mut n = 0u32;
        let path = loop {
            let candidate = dir.join(candidate_name(&stem, &ext, n));
            let candidate_stem = if n == 0 {
                stem.clone()
            } else {
                format!("{}_{}", stem, n)
            };
            n += 1;

            if claimed.contains(&candidate_stem) {
                continue;
            }

            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate)
            {
                Ok(mut file) => {
                    file.write_all(body.as_bytes())
                        .map_err(io_error(&candidate))?;
                    break candidate;
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(io_error(&candidate)(e)),
            }
        };

        if let Some(metadata) = metadata.as_ref().filter(|_| !inline) {
            write_sidecar(&path, metadata)?;
        }

        tracing::info!("Saved export to {}", path.display());
        Ok(path)
    }

    /// Lists content files, most recently modified first
    ///
    /// `None` lists every category.
    pub fn list(&self, category: Option<ExportCategory>) -> ArchiveResult<Vec<ExportRecord>> {
        self.ensure_category_directories()?;

        let categories = match category {
            Some(category) => vec![category],
            None => ExportCategory::ALL.to_vec(),
        };

        let mut records = Vec::new();
        for category in categories {
            let dir = self.category_dir(category);
            for entry in fs::read_dir(&dir).map_err(io_error(&dir))? {
                let entry = entry.map_err(io_error(&dir))?;
                let path = entry.path();
                let Some(filename) = entry.file_name().to_str().map(str::to_string) else {
                    continue;
                };
                if is_sidecar(&filename) {
                    continue;
                }

                let fs_meta = entry.metadata().map_err(io_error(&path))?;
                if !fs_meta.is_file() {
                    continue;
                }
                let modified = fs_meta.modified().map_err(io_error(&path))?;

                records.push(ExportRecord {
                    metadata: read_metadata(&path)?,
                    path,
                    filename,
                    category,
                    size_bytes: fs_meta.len(),
                    modified: DateTime::<Utc>::from(modified),
                });
            }
        }

        records.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| a.filename.cmp(&b.filename))
        });
        Ok(records)
    }

    /// Lists records whose filename or metadata contains `term`, ignoring case
    pub fn search(
        &self,
        category: Option<ExportCategory>,
        term: &str,
    ) -> ArchiveResult<Vec<ExportRecord>> {
        let mut records = self.list(category)?;
        records.retain(|r| r.matches(term));
        Ok(records)
    }

    /// Reads a record back; `.json` files that parse are returned as JSON
    pub fn load(&self, path: &Path) -> ArchiveResult<ExportContent> {
        if !path.is_file() {
            return Err(ArchiveError::NotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(io_error(path))?;

        let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
        if is_json {
            if let Ok(value) = serde_json::from_str::<Value>(&text) {
                return Ok(ExportContent::Json(value));
            }
        }
        Ok(ExportContent::Text(text))
    }

    /// Deletes a content file and its sidecar, if any
    ///
    /// If the content file is removed but the sidecar is not, the error is
    /// `ArchiveError::SidecarDelete`; the content deletion is not undone.
    pub fn delete(&self, path: &Path) -> ArchiveResult<DeleteOutcome> {
        if !path.is_file() {
            return Err(ArchiveError::NotFound(path.to_path_buf()));
        }
        fs::remove_file(path).map_err(io_error(path))?;

        let sidecar = sidecar_path(path);
        let removed_sidecar = if sidecar.exists() {
            fs::remove_file(&sidecar).map_err(|source| {
                tracing::warn!(
                    "Deleted {} but sidecar {} remains",
                    path.display(),
                    sidecar.display()
                );
                ArchiveError::SidecarDelete {
                    content: path.to_path_buf(),
                    sidecar: sidecar.clone(),
                    source,
                }
            })?;
            Some(sidecar)
        } else {
            None
        };

        tracing::info!("Deleted export {}", path.display());
        Ok(DeleteOutcome {
            content: path.to_path_buf(),
            sidecar: removed_sidecar,
        })
    }
}

/// Serializes content, merging `inline_metadata` into a JSON mapping
fn render_content(
    content: &ExportContent,
    content_type: ContentType,
    inline_metadata: Option<&ExportMetadata>,
) -> ArchiveResult<String> {
    match content {
        ExportContent::Text(text) => Ok(text.clone()),
        ExportContent::Json(value) if content_type == ContentType::Json => {
            let mut value = value.clone();
            if let (Some(metadata), Value::Object(map)) = (inline_metadata, &mut value) {
                map.insert(
                    INLINE_METADATA_KEY.to_string(),
                    serde_json::to_value(metadata)?,
                );
            }
            Ok(serde_json::to_string_pretty(&value)?)
        }
        ExportContent::Json(Value::String(text)) => Ok(text.clone()),
        ExportContent::Json(value) => Ok(value.to_string()),
    }
}

/// Writes the sidecar for `content`; on failure `content` is removed again
fn write_sidecar(content: &Path, metadata: &ExportMetadata) -> ArchiveResult<()> {
    let sidecar = sidecar_path(content);
    let written = serde_json::to_string_pretty(metadata)
        .map_err(ArchiveError::from)
        .and_then(|json| fs::write(&sidecar, json).map_err(io_error(&sidecar)));

    if let Err(e) = written {
        if let Err(cleanup) = fs::remove_file(content) {
            tracing::warn!(
                "Could not remove {} after failed metadata write: {}",
                content.display(),
                cleanup
            );
        }
        return Err(e);
    }
    Ok(())
}

/// Stems already used by a content file or sidecar in `dir`
fn claimed_stems(dir: &Path) -> ArchiveResult<HashSet<String>> {
    let mut stems = HashSet::new();
    for entry in fs::read_dir(dir).map_err(io_error(dir))? {
        let entry = entry.map_err(io_error(dir))?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        let stem = match name.strip_suffix(SIDECAR_SUFFIX) {
            Some(stem) => stem,
            None => split_extension(&name).0,
        };
        stems.insert(stem.to_string());
    }
    Ok(stems)
}

/// Reads sidecar metadata, falling back to inline metadata in JSON files
fn read_metadata(path: &Path) -> ArchiveResult<Option<ExportMetadata>> {
    let sidecar = sidecar_path(path);
    if sidecar.is_file() {
        let text = fs::read_to_string(&sidecar).map_err(io_error(&sidecar))?;
        return match serde_json::from_str(&text) {
            Ok(metadata) => Ok(Some(metadata)),
            Err(e) => {
                tracing::warn!("Ignoring unreadable sidecar {}: {}", sidecar.display(), e);
                Ok(None)
            }
        };
    }

    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        return Ok(None);
    }
    let text = fs::read_to_string(path).map_err(io_error(path))?;
    let inline = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|mut v| v.get_mut(INLINE_METADATA_KEY).map(Value::take))
        .and_then(|v| serde_json::from_value(v).ok());
    Ok(inline)
}
