//! Errors that cross the explorer's library boundary.
//!
//! Only loading and normalization can fail hard. Per-statistic problems
//! (a missing optional column, an empty view) are absorbed by the
//! statistics engine and never show up here.

use std::path::PathBuf;

use crate::catalog::City;

/// Hard failures surfaced to the caller of the core operations.
#[derive(Debug, thiserror::Error)]
pub enum ExploreError {
    #[error("no dataset for {city} at {}", path.display())]
    DatasetNotFound { city: City, path: PathBuf },

    #[error("row {row}: cannot parse start time {value:?}")]
    MalformedTimestamp { row: usize, value: String },

    #[error("dataset has no `{0}` column")]
    RequiredColumnMissing(&'static str),

    #[error("unknown city {0:?}")]
    UnknownCity(String),

    #[error("invalid catalog file: {0}")]
    InvalidCatalog(#[from] serde_json::Error),

    #[error("failed to read dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExploreError>;
