//! Runtime configuration, read from the environment after `.env` loading.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::error::Result;

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Maps city names to dataset paths.
///
/// Stored as a plain JSON object on disk:
/// ```json
/// {
///   "chicago": "chicago.csv",
///   "new york": "nyc/2017-h1.csv"
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct CatalogConfig {
    entries: HashMap<String, String>,
}

impl CatalogConfig {
    /// Loads the config from a JSON file at `path`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a JSON object of strings.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerConfig {
    pub data_dir: PathBuf,
    pub catalog_file: Option<PathBuf>,
    pub page_size: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            catalog_file: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ExplorerConfig {
    /// Reads `BIKESHARE_DATA_DIR`, `BIKESHARE_CATALOG` and
    /// `BIKESHARE_PAGE_SIZE`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let page_size = match lookup("BIKESHARE_PAGE_SIZE") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    warn!(value = %raw, "Invalid BIKESHARE_PAGE_SIZE, using default");
                    defaults.page_size
                }
            },
            None => defaults.page_size,
        };

        Self {
            data_dir: lookup("BIKESHARE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            catalog_file: lookup("BIKESHARE_CATALOG").map(PathBuf::from),
            page_size,
        }
    }
}
