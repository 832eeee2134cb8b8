//! Month and weekday filtering over a normalized dataset.
//!
//! Filtering never copies or mutates trips: a [`FilteredView`] borrows the
//! dataset and keeps references in original order.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use tracing::debug;

use crate::dataset::Schema;
use crate::normalize::{NormalizedDataset, Trip, weekday_name};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{input:?} is not a valid choice (expected {expected})")]
pub struct ParseSelectorError {
    pub input: String,
    pub expected: &'static str,
}

/// Selectable months. The source data only covers January to June.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Month {
    January = 1,
    February,
    March,
    April,
    May,
    June,
}

impl Month {
    pub const ALL: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    /// 1-based calendar month number.
    pub fn number(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
        }
    }
}

impl FromStr for Month {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Month::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSelectorError {
                input: s.to_string(),
                expected: "all, January, February, March, April, May or June",
            })
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A weekday selectable by its full name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Day(pub Weekday);

impl Day {
    /// Sunday first, matching how the prompt lists them.
    pub const ALL: [Day; 7] = [
        Day(Weekday::Sun),
        Day(Weekday::Mon),
        Day(Weekday::Tue),
        Day(Weekday::Wed),
        Day(Weekday::Thu),
        Day(Weekday::Fri),
        Day(Weekday::Sat),
    ];

    pub fn weekday(self) -> Weekday {
        self.0
    }

    pub fn name(self) -> &'static str {
        weekday_name(self.0)
    }
}

impl FromStr for Day {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Day::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSelectorError {
                input: s.to_string(),
                expected: "all, or a weekday name such as Monday",
            })
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Either no filtering (`all`) or a single concrete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Selector::All
    }
}

impl<T> Selector<T> {
    fn accepts(&self, pred: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(value) => pred(value),
        }
    }
}

impl<T: FromStr<Err = ParseSelectorError>> FromStr for Selector<T> {
    type Err = ParseSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Selector::All)
        } else {
            s.parse().map(Selector::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str("all"),
            Selector::Only(value) => value.fmt(f),
        }
    }
}

/// The month and day filter chosen for one exploration pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub month: Selector<Month>,
    pub day: Selector<Day>,
}

impl Selection {
    pub fn new(month: Selector<Month>, day: Selector<Day>) -> Self {
        Self { month, day }
    }

    /// Selects every trip.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matches(&self, trip: &Trip) -> bool {
        self.month.accepts(|m| trip.month == m.number())
            && self.day.accepts(|d| trip.day_of_week == d.weekday())
    }
}

/// An ordered subset of a [`NormalizedDataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    schema: &'a Schema,
    trips: Vec<&'a Trip>,
}

impl<'a> FilteredView<'a> {
    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn trips(&self) -> &[&'a Trip] {
        &self.trips
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Narrows this view further; the view itself is left untouched.
    pub fn filter(&self, selection: &Selection) -> FilteredView<'a> {
        FilteredView {
            schema: self.schema,
            trips: self
                .trips
                .iter()
                .copied()
                .filter(|trip| selection.matches(trip))
                .collect(),
        }
    }

    /// Up to `count` trips starting at `start`; empty once past the end.
    pub fn page(&self, start: usize, count: usize) -> &[&'a Trip] {
        let start = start.min(self.trips.len());
        let end = start.saturating_add(count).min(self.trips.len());
        &self.trips[start..end]
    }
}

impl NormalizedDataset {
    /// A view over every trip.
    pub fn view(&self) -> FilteredView<'_> {
        FilteredView {
            schema: &self.schema,
            trips: self.trips.iter().collect(),
        }
    }
}

/// Applies `selection` to `dataset`, preserving record order.
pub fn filter<'a>(dataset: &'a NormalizedDataset, selection: &Selection) -> FilteredView<'a> {
    let view = dataset.view().filter(selection);
    debug!(
        month = %selection.month,
        day = %selection.day,
        before = dataset.len(),
        after = view.len(),
        "Filter applied"
    );
    view
}
