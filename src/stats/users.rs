use serde::Serialize;

use crate::filter::FilteredView;

use super::utility::{mode, value_counts};
use super::{Stat, StatError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Birth-year figures, always reported together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub most_common: i32,
    pub most_recent: i32,
    pub earliest: i32,
}

/// Rider demographics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub user_types: Stat<Vec<ValueCount>>,
    pub genders: Stat<Vec<ValueCount>>,
    pub birth_years: Stat<BirthYearStats>,
}

#[tracing::instrument(skip(view), fields(trips = view.len()))]
pub fn user_stats(view: &FilteredView<'_>) -> UserStats {
    UserStats {
        user_types: counts(view.user_types()).into(),
        genders: counts(view.genders()).into(),
        birth_years: birth_year_stats(view).into(),
    }
}

fn counts<'a>(
    values: Result<impl Iterator<Item = &'a str>, StatError>,
) -> Result<Vec<ValueCount>, StatError> {
    Ok(value_counts(values?)?
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect())
}

fn birth_year_stats(view: &FilteredView<'_>) -> Result<BirthYearStats, StatError> {
    let years: Vec<i32> = view.birth_years()?.collect();

    let most_common = mode(years.iter().copied())?;
    let most_recent = years.iter().copied().max().ok_or(StatError::EmptyView)?;
    let earliest = years.iter().copied().min().ok_or(StatError::EmptyView)?;

    Ok(BirthYearStats {
        most_common,
        most_recent,
        earliest,
    })
}
