//! Descriptive statistics over a filtered view.
//!
//! Each group is computed independently. A statistic whose column is not in
//! the dataset's schema, or that has nothing to aggregate, comes back as
//! [`Stat::Unavailable`] instead of failing the report.

mod columns;
pub mod duration;
pub mod station;
pub mod time;
pub mod users;
pub mod utility;

use serde::Serialize;

use crate::dataset::Column;
use crate::filter::FilteredView;

pub use duration::{DurationStats, duration_stats};
pub use station::{StationPair, StationStats, station_stats};
pub use time::{TimeStats, time_stats};
pub use users::{BirthYearStats, UserStats, ValueCount, user_stats};

/// Why a single statistic could not be computed.
///
/// Recovered inside the engine; it never leaves a statistic group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StatError {
    #[error("column `{0}` is not in this dataset")]
    ColumnUnavailable(Column),

    #[error("no rows to aggregate")]
    EmptyView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "column", rename_all = "snake_case")]
pub enum Unavailable {
    ColumnMissing(Column),
    NoData,
}

/// A computed statistic, or the reason it is missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat<T> {
    Available(T),
    Unavailable(Unavailable),
}

impl<T> Stat<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Stat::Available(value) => Some(value),
            Stat::Unavailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Stat::Available(_))
    }
}

impl<T> From<Result<T, StatError>> for Stat<T> {
    fn from(result: Result<T, StatError>) -> Self {
        match result {
            Ok(value) => Stat::Available(value),
            Err(StatError::ColumnUnavailable(column)) => {
                Stat::Unavailable(Unavailable::ColumnMissing(column))
            }
            Err(StatError::EmptyView) => Stat::Unavailable(Unavailable::NoData),
        }
    }
}

/// Every statistic group for one view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsReport {
    pub trips: usize,
    pub time: TimeStats,
    pub stations: StationStats,
    pub duration: DurationStats,
    pub users: UserStats,
}

/// Computes the full report. Never fails: missing data is reported in place.
#[tracing::instrument(skip(view), fields(trips = view.len()))]
pub fn compute_statistics(view: &FilteredView<'_>) -> StatisticsReport {
    StatisticsReport {
        trips: view.len(),
        time: time_stats(view),
        stations: station_stats(view),
        duration: duration_stats(view),
        users: user_stats(view),
    }
}
