//! Layered configuration: defaults, `config/shelfcloud.*`, an optional
//! explicit file, then `SHELFCLOUD__*` environment variables.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;
use shelfcloud_types::NormalizerVersion;
use thiserror::Error;

use crate::dataset::ColumnNames;
use crate::render::CloudOptions;
use crate::view::ViewConfig;

const CONFIG_FILE: &str = "config/shelfcloud";
const ENV_PREFIX: &str = "SHELFCLOUD";
const DEFAULT_DATA_PATH: &str = "physical_usage.csv";

#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error(transparent)]
    Build(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub render: CloudOptions,
    pub view: ViewConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Catalog CSV read at startup.
    pub path: PathBuf,
    /// Cleaning variant applied to subject cells.
    pub normalizer: NormalizerVersion,
    pub columns: ColumnNames,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_PATH),
            normalizer: NormalizerVersion::default(),
            columns: ColumnNames::default(),
        }
    }
}

/// Loads configuration, layering `explicit` above the default file.
pub fn load_from(explicit: Option<&Path>) -> Result<AppConfig, AppConfigError> {
    let mut builder = Config::builder()
        .set_default("data.path", DEFAULT_DATA_PATH)?
        .add_source(File::with_name(CONFIG_FILE).required(false));

    if let Some(path) = explicit {
        builder = builder.add_source(File::from(path).required(true));
    }

    let cfg = builder
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?
        .try_deserialize()?;
    Ok(cfg)
}
