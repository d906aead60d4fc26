//! Core types shared by the shelfcloud word-cloud tools.
//!
//! This crate holds the plain data that flows between the dataset loader,
//! the normalizers and the views. Keeping types separate ensures:
//!
//! - **Cross-crate compatibility**: the core library and the CLI share the
//!   same record and selector types
//! - **Clean boundaries**: no I/O or rendering dependencies leak into the
//!   data model

#![warn(missing_docs)]

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Usage weight attached to a catalog record (e.g. loan count).
///
/// Missing values are coerced to `0` at load time.
pub type Weight = i64;

/// Which normalization rule set to apply to a field value.
///
/// The two variants are not equivalent and there is no migration path
/// between them: callers always name the one they want.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizerVersion {
    /// Aggressive cleaning with stop-word removal and de-duplication.
    #[default]
    V1,
    /// Light cleaning that only rewrites separators.
    V2,
}

impl NormalizerVersion {
    /// Returns the lowercase tag used in configuration files.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            NormalizerVersion::V1 => "v1",
            NormalizerVersion::V2 => "v2",
        }
    }
}

impl fmt::Display for NormalizerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a normalizer tag cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown normalizer version `{0}` (expected `v1` or `v2`)")]
pub struct ParseVersionError(pub String);

impl FromStr for NormalizerVersion {
    type Err = ParseVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(NormalizerVersion::V1),
            "v2" | "2" => Ok(NormalizerVersion::V2),
            _ => Err(ParseVersionError(s.to_string())),
        }
    }
}

/// One row of the catalog dataset.
///
/// `subject` is stored already cleaned when the record comes from a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectRecord {
    /// Classification code used for grouping (e.g. `"M"`, `"HG"`).
    pub code: String,
    /// Cleaned subject text.
    pub subject: String,
    /// Usage weight.
    pub weight: Weight,
}

impl SubjectRecord {
    /// Creates a new record.
    pub fn new(code: impl Into<String>, subject: impl Into<String>, weight: Weight) -> Self {
        Self {
            code: code.into(),
            subject: subject.into(),
            weight,
        }
    }
}

/// A subject ranked by its usage weight.
///
/// Rankings come from a stable sort on weight; entries with equal weight
/// keep their dataset order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedSubject {
    /// Cleaned subject text (untruncated).
    pub subject: String,
    /// Usage weight.
    pub weight: Weight,
}

impl RankedSubject {
    /// Creates a new ranked entry.
    #[inline]
    pub fn new(subject: impl Into<String>, weight: Weight) -> Self {
        Self {
            subject: subject.into(),
            weight,
        }
    }
}

impl From<&SubjectRecord> for RankedSubject {
    fn from(record: &SubjectRecord) -> Self {
        Self::new(record.subject.clone(), record.weight)
    }
}

/// A selectable classification code with its record count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeOption {
    /// Human readable label, `"<code> (<n> items)"`.
    pub label: String,
    /// The code itself.
    pub value: String,
}

impl CodeOption {
    /// Builds the option for `code` holding `count` records.
    pub fn new(code: &str, count: usize) -> Self {
        Self {
            label: format!("{code} ({count} items)"),
            value: code.to_string(),
        }
    }
}

impl fmt::Display for CodeOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Addresses one column of an arbitrary table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnSelector {
    /// Column by header name (exact match).
    Name(String),
    /// Column by zero-based position.
    Index(usize),
}

impl From<&str> for ColumnSelector {
    fn from(name: &str) -> Self {
        ColumnSelector::Name(name.to_string())
    }
}

impl From<String> for ColumnSelector {
    fn from(name: String) -> Self {
        ColumnSelector::Name(name)
    }
}

impl From<usize> for ColumnSelector {
    fn from(index: usize) -> Self {
        ColumnSelector::Index(index)
    }
}

impl fmt::Display for ColumnSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSelector::Name(name) => f.write_str(name),
            ColumnSelector::Index(index) => write!(f, "#{index}"),
        }
    }
}
