//! Arbitrary uploaded CSV held in memory for column selection.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use shelfcloud_types::ColumnSelector;

use super::{cell, DatasetError};
use crate::analyzer::TextNormalizer;

/// A headed CSV table. Rows may be ragged; absent cells read as missing.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<StringRecord>,
}

impl Table {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers = rdr.headers()?.iter().map(str::to_string).collect();
        let rows = rdr.records().collect::<Result<Vec<_>, _>>()?;

        Ok(Self { headers, rows })
    }

    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Header names in file order.
    #[inline]
    pub fn columns(&self) -> &[String] {
        &self.headers
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first `n` rows.
    pub fn preview(&self, n: usize) -> &[StringRecord] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Maps a selector to a column position.
    pub fn resolve(&self, selector: &ColumnSelector) -> Result<usize, DatasetError> {
        match selector {
            ColumnSelector::Name(name) => self
                .headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DatasetError::MissingColumn(name.clone())),
            ColumnSelector::Index(index) if *index < self.headers.len() => Ok(*index),
            ColumnSelector::Index(index) => Err(DatasetError::ColumnOutOfRange {
                index: *index,
                len: self.headers.len(),
            }),
        }
    }

    /// Header name of the selected column.
    pub fn column_name(&self, selector: &ColumnSelector) -> Result<&str, DatasetError> {
        let idx = self.resolve(selector)?;
        Ok(self.headers[idx].as_str())
    }

    /// Cell values of one column; `None` marks a missing cell.
    pub fn column_values<'a>(
        &'a self,
        selector: &ColumnSelector,
    ) -> Result<impl Iterator<Item = Option<&'a str>> + 'a, DatasetError> {
        let idx = self.resolve(selector)?;
        Ok(self.rows.iter().map(move |row| cell(row, idx)))
    }

    /// Cleans every value of one column.
    pub fn clean_column(
        &self,
        selector: &ColumnSelector,
        normalizer: &TextNormalizer<'_>,
    ) -> Result<Vec<String>, DatasetError> {
        Ok(normalizer.normalize_all(self.column_values(selector)?))
    }

    /// Cleans one column and joins the results with spaces.
    pub fn cleaned_text(
        &self,
        selector: &ColumnSelector,
        normalizer: &TextNormalizer<'_>,
    ) -> Result<String, DatasetError> {
        Ok(normalizer.join_cleaned(self.column_values(selector)?))
    }
}
