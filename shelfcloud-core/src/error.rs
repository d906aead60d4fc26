//! Top-level error type for the `shelfcloud` binary.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::AppConfigError;
use crate::dataset::DatasetError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] AppConfigError),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
