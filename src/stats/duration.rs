use serde::Serialize;

use crate::filter::FilteredView;

use super::utility::{mean, sum};
use super::{Stat, StatError};

/// Total and average trip duration, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub total: Stat<f64>,
    pub mean: Stat<f64>,
}

#[tracing::instrument(skip(view), fields(trips = view.len()))]
pub fn duration_stats(view: &FilteredView<'_>) -> DurationStats {
    let durations: Result<Vec<f64>, StatError> = view.durations().map(Iterator::collect);

    DurationStats {
        total: durations.as_deref().map_err(|e| *e).and_then(sum).into(),
        mean: durations.as_deref().map_err(|e| *e).and_then(mean).into(),
    }
}
