//! "Manage Exports": browse, search, view, and delete saved results

use crate::archive::{ExportCategory, ExportContent, ExportRecord};
use crate::session::menu::{self, ExportsAction, RecordAction};
use crate::session::{format_size, ActionResult, Prompt, Session};

impl<P: Prompt> Session<P> {
    pub(super) fn manage_exports(&self) -> ActionResult {
        let labels = menu::labels(&ExportsAction::ALL, ExportsAction::label);

        loop {
            self.prompt.heading("Manage Exports");
            let action = ExportsAction::ALL[self.prompt.select("What would you like to do?", &labels, 0)?];

            let records = match action {
                ExportsAction::Browse => {
                    let category = self.ask_category_filter()?;
                    self.archive.list(category)?
                }
                ExportsAction::Search => {
                    let category = self.ask_category_filter()?;
                    let term = self.prompt.input("Search term", "")?;
                    let term = term.trim();
                    if term.is_empty() {
                        self.prompt.warn("Search term cannot be empty");
                        continue;
                    }
                    self.archive.search(category, term)?
                }
                ExportsAction::Back => return Ok(()),
            };

            self.pick_record(&records)?;
        }
    }

    /// `None` means every category
    fn ask_category_filter(&self) -> ActionResult<Option<ExportCategory>> {
        let mut labels = vec!["All categories".to_string()];
        labels.extend(menu::labels(&ExportCategory::ALL, ExportCategory::dir_name));

        let index = self.prompt.select("Category", &labels, 0)?;
        Ok(index.checked_sub(1).map(|i| ExportCategory::ALL[i]))
    }

    fn pick_record(&self, records: &[ExportRecord]) -> ActionResult {
        if records.is_empty() {
            self.prompt.info("No exports found");
            return Ok(());
        }

        let rows: Vec<Vec<String>> = records
            .iter()
            .enumerate()
            .map(|(i, r)| {
                vec![
                    (i + 1).to_string(),
                    r.category.to_string(),
                    r.filename.clone(),
                    format_size(r.size_bytes),
                    r.modified
                        .with_timezone(&chrono::Local)
                        .format("%Y-%m-%d %H:%M")
                        .to_string(),
                    r.metadata
                        .as_ref()
                        .map(|m| m.description.clone())
                        .unwrap_or_default(),
                ]
            })
            .collect();
        self.prompt.table(
            &format!("{} export(s)", records.len()),
            &["#", "Category", "Filename", "Size", "Modified", "Description"],
            &rows,
        );

        let mut items: Vec<String> = records
            .iter()
            .map(|r| format!("{}/{}", r.category, r.filename))
            .collect();
        items.push("Back".to_string());

        let index = self.prompt.select("Select an export", &items, 0)?;
        let Some(record) = records.get(index) else {
            return Ok(());
        };

        let labels = menu::labels(&RecordAction::ALL, RecordAction::label);
        match RecordAction::ALL[self.prompt.select(&record.filename, &labels, 0)?] {
            RecordAction::View => self.view_record(record),
            RecordAction::Delete => self.delete_record(record),
            RecordAction::Back => Ok(()),
        }
    }

    fn view_record(&self, record: &ExportRecord) -> ActionResult {
        let body = match self.archive.load(&record.path)? {
            ExportContent::Text(text) => text,
            ExportContent::Json(value) => serde_json::to_string_pretty(&value)
                .map_err(crate::ArchiveError::from)?,
        };
        self.prompt.panel(&record.filename, &body);

        if let Some(metadata) = &record.metadata {
            let tags: Vec<&str> = metadata.tags.iter().map(String::as_str).collect();
            let rows = vec![
                vec!["Description".to_string(), metadata.description.clone()],
                vec!["Tags".to_string(), tags.join(", ")],
                vec!["Exported".to_string(), metadata.export_date.to_rfc3339()],
                vec![
                    "Source URL".to_string(),
                    metadata.source_url.clone().unwrap_or_default(),
                ],
            ];
            self.prompt.table("Metadata", &["Field", "Value"], &rows);
        }
        Ok(())
    }

    fn delete_record(&self, record: &ExportRecord) -> ActionResult {
        let question = format!("Delete {}/{}?", record.category, record.filename);
        if !self.prompt.confirm(&question, false)? {
            self.prompt.info("Cancelled");
            return Ok(());
        }

        let outcome = self.archive.delete(&record.path)?;
        self.prompt
            .success(&format!("Deleted {}", outcome.content.display()));
        if let Some(sidecar) = outcome.sidecar {
            self.prompt
                .success(&format!("Deleted metadata {}", sidecar.display()));
        }
        Ok(())
    }
}
