//! Word cloud over any column of an uploaded CSV.

use std::io::Read;

use shelfcloud_types::ColumnSelector;
use tracing::{info, warn};

use super::{render_cloud, CloudPanel, UPLOAD_PROMPT};
use crate::analyzer::TextNormalizer;
use crate::dataset::{DatasetError, Table};
use crate::render::CloudRenderer;

/// Holds the most recent upload and renders clouds from its columns.
#[derive(Debug)]
pub struct ColumnCloud<'s, R> {
    table: Option<Table>,
    normalizer: TextNormalizer<'s>,
    renderer: R,
}

impl<'s, R: CloudRenderer> ColumnCloud<'s, R> {
    pub fn new(normalizer: TextNormalizer<'s>, renderer: R) -> Self {
        Self {
            table: None,
            normalizer,
            renderer,
        }
    }

    /// Replaces the current table. A failed upload keeps the previous one.
    pub fn upload<Rd: Read>(&mut self, reader: Rd) -> Result<&Table, DatasetError> {
        let table = Table::from_reader(reader)?;
        info!(
            rows = table.len(),
            columns = table.columns().len(),
            "loaded uploaded table"
        );
        Ok(self.table.insert(table))
    }

    #[inline]
    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    /// Column names of the current upload; empty before any upload.
    pub fn columns(&self) -> &[String] {
        self.table.as_ref().map(Table::columns).unwrap_or_default()
    }

    /// First `n` rows of the current upload.
    pub fn preview(&self, n: usize) -> &[csv::StringRecord] {
        self.table.as_ref().map(|t| t.preview(n)).unwrap_or_default()
    }

    /// Builds the panel for one column.
    pub fn generate(&self, selector: &ColumnSelector) -> CloudPanel {
        let Some(table) = &self.table else {
            return CloudPanel::message(UPLOAD_PROMPT);
        };

        let found = table.column_name(selector).and_then(|name| {
            table
                .cleaned_text(selector, &self.normalizer)
                .map(|text| (name, text))
        });
        let (name, text) = match found {
            Ok(found) => found,
            Err(err) => {
                warn!(column = %selector, error = %err, "column unavailable");
                return CloudPanel::Message(format!("Column {selector} not found"));
            }
        };

        if text.trim().is_empty() {
            return CloudPanel::Message(format!("No data available in column {name}"));
        }

        match render_cloud(&self.renderer, &text) {
            Ok(image) => CloudPanel::Rendered {
                image,
                top_subjects: Vec::new(),
            },
            Err(message) => CloudPanel::Message(message),
        }
    }
}
