//! Tabular inputs: the catalog dataset (V1) and arbitrary uploaded tables (V2).
//!
//! The catalog dataset is read once at startup. Subject cells are cleaned
//! while loading, codes are kept verbatim and weights are coerced to
//! integers. Loading never fails from the caller's point of view:
//!
//! - file absent → built-in 100-row sample
//! - any other failure (malformed CSV, missing column, non-numeric weight)
//!   → compact 5-row sample
//!
//! Both fallbacks are logged at `warn` and carry no user-visible error.

mod sample;
mod table;

pub use sample::{compact_sample_records, sample_records};
pub use table::Table;

use core::cmp::Reverse;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::Deserialize;
use shelfcloud_types::{CodeOption, RankedSubject, SubjectRecord, Weight};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{info, warn};

use crate::analyzer::TextNormalizer;

/// Number of ranked subjects shown next to a cloud.
pub const TOP_SUBJECTS: usize = 10;

/// Cell contents read as missing, matching common CSV null markers.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Errors emitted while reading tabular input.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("column `{0}` not found")]
    MissingColumn(String),

    #[error("column index {index} out of range ({len} columns)")]
    ColumnOutOfRange { index: usize, len: usize },

    #[error("row {row}: weight `{value}` is not a number")]
    InvalidWeight { row: usize, value: String },
}

impl DatasetError {
    /// Returns `true` when the source file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatasetError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Header names of the three catalog columns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub code: String,
    pub subject: String,
    pub weight: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            code: "LC Classification Code".to_string(),
            subject: "Subjects".to_string(),
            weight: "Loans (In House + Not In House)".to_string(),
        }
    }
}

/// Where a [`Dataset`]'s records came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    File(PathBuf),
    Reader,
    Sample,
    CompactSample,
}

/// Returns the cell at `idx`, or `None` when absent or a null marker.
pub(crate) fn cell(record: &csv::StringRecord, idx: usize) -> Option<&str> {
    record
        .get(idx)
        .filter(|value| !MISSING_MARKERS.contains(&value.trim()))
}

fn parse_weight(raw: Option<&str>, row: usize) -> Result<Weight, DatasetError> {
    let Some(raw) = raw.map(str::trim) else {
        return Ok(0);
    };

    if let Ok(value) = raw.parse::<Weight>() {
        return Ok(value);
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_nan() => Ok(0),
        Ok(value) if value.is_finite() => Ok(value.trunc() as Weight),
        _ => Err(DatasetError::InvalidWeight {
            row,
            value: raw.to_string(),
        }),
    }
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize, DatasetError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
}

/// In-memory catalog of subject records.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<SubjectRecord>,
    source: DatasetSource,
}

impl Dataset {
    /// Wraps already-prepared records.
    pub fn new(records: Vec<SubjectRecord>, source: DatasetSource) -> Self {
        Self { records, source }
    }

    /// The built-in 100-row sample.
    pub fn sample() -> Self {
        Self::new(sample_records(), DatasetSource::Sample)
    }

    /// The built-in 5-row sample.
    pub fn compact_sample() -> Self {
        Self::new(compact_sample_records(), DatasetSource::CompactSample)
    }

    /// Loads `path`, falling back to a built-in sample on any failure.
    pub fn load(path: &Path, columns: &ColumnNames, normalizer: &TextNormalizer<'_>) -> Self {
        match Self::try_load(path, columns, normalizer) {
            Ok(dataset) => dataset,
            Err(err) if err.is_not_found() => {
                warn!(path = %path.display(), "dataset not found; using built-in sample");
                Self::sample()
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "dataset unreadable; using compact sample");
                Self::compact_sample()
            }
        }
    }

    /// Loads `path` and reports failures.
    pub fn try_load(
        path: &Path,
        columns: &ColumnNames,
        normalizer: &TextNormalizer<'_>,
    ) -> Result<Self, DatasetError> {
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut dataset = Self::from_reader(file, columns, normalizer)?;
        dataset.source = DatasetSource::File(path.to_path_buf());

        info!(
            path = %path.display(),
            records = dataset.len(),
            normalizer = %normalizer.version(),
            "loaded catalog dataset"
        );

        Ok(dataset)
    }

    /// Reads CSV with headers, cleaning subject cells with `normalizer`.
    pub fn from_reader<R: Read>(
        reader: R,
        columns: &ColumnNames,
        normalizer: &TextNormalizer<'_>,
    ) -> Result<Self, DatasetError> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let code_idx = find_column(&headers, &columns.code)?;
        let subject_idx = find_column(&headers, &columns.subject)?;
        let weight_idx = find_column(&headers, &columns.weight)?;

        let mut records = Vec::new();
        let mut cleaned = String::new();

        for (row, result) in rdr.records().enumerate() {
            let record = result?;

            normalizer.normalize_into(cell(&record, subject_idx), &mut cleaned);
            let weight = parse_weight(cell(&record, weight_idx), row + 1)?;
            let code = record.get(code_idx).unwrap_or_default();

            records.push(SubjectRecord::new(code, cleaned.as_str(), weight));
        }

        Ok(Self::new(records, DatasetSource::Reader))
    }

    #[inline]
    pub fn records(&self) -> &[SubjectRecord] {
        &self.records
    }

    #[inline]
    pub fn source(&self) -> &DatasetSource {
        &self.source
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct codes in ascending order.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.records.iter().map(|r| r.code.as_str()).collect();
        codes.sort_unstable();
        codes.dedup();
        codes
    }

    /// Selector options, one per code, labelled with their record count.
    pub fn code_options(&self) -> Vec<CodeOption> {
        let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
        for record in &self.records {
            *counts.entry(record.code.as_str()).or_insert(0) += 1;
        }

        self.codes()
            .into_iter()
            .map(|code| CodeOption::new(code, counts.get(code).copied().unwrap_or(0)))
            .collect()
    }

    /// Records carrying `code`, in dataset order.
    pub fn records_for<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a SubjectRecord> + 'a {
        self.records.iter().filter(move |r| r.code == code)
    }

    /// Space-joined subjects of every record carrying `code`.
    pub fn subject_text(&self, code: &str) -> String {
        let mut text = String::new();
        for (i, record) in self.records_for(code).enumerate() {
            if i > 0 {
                text.push(' ');
            }
            text.push_str(&record.subject);
        }
        text
    }

    /// Up to `n` records for `code` by descending weight; ties keep dataset order.
    pub fn top_by_weight(&self, code: &str, n: usize) -> SmallVec<[RankedSubject; TOP_SUBJECTS]> {
        let mut matching: Vec<&SubjectRecord> = self.records_for(code).collect();
        matching.sort_by_key(|r| Reverse(r.weight));

        matching
            .into_iter()
            .take(n)
            .map(RankedSubject::from)
            .collect()
    }
}
