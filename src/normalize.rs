//! Turns raw CSV rows into typed trips with derived time fields.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use tracing::warn;

use crate::dataset::{Column, RawDataset, RawTrip, Schema};
use crate::error::{ExploreError, Result};

/// Layouts seen in the source exports, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// A trip record with its derived `hour`, `month` and `day_of_week`.
///
/// The derived fields are computed once from `start_time` by [`normalize`]
/// and are always consistent with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub start_time: NaiveDateTime,
    pub end_time: Option<String>,
    pub trip_duration: Option<f64>,
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,

    pub hour: u32,
    pub month: u32,
    pub day_of_week: Weekday,
}

impl Trip {
    pub fn day_name(&self) -> &'static str {
        weekday_name(self.day_of_week)
    }
}

/// Trips sharing one [`Schema`], in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedDataset {
    pub schema: Schema,
    pub trips: Vec<Trip>,
}

impl NormalizedDataset {
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

/// Capitalized English weekday name, e.g. `"Monday"`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parses a start timestamp in any of the supported layouts.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Normalizes every record of `raw`.
///
/// All-or-nothing: the first record whose start time does not parse aborts
/// the whole dataset.
///
/// # Errors
///
/// Returns [`ExploreError::MalformedTimestamp`] with the 1-based data row
/// of the offending record.
#[tracing::instrument(skip(raw), fields(rows = raw.len()))]
pub fn normalize(raw: &RawDataset) -> Result<NormalizedDataset> {
    let trips = raw
        .records
        .iter()
        .enumerate()
        .map(|(idx, record)| normalize_record(idx + 1, record))
        .collect::<Result<Vec<_>>>()?;

    Ok(NormalizedDataset {
        schema: raw.schema.clone(),
        trips,
    })
}

fn normalize_record(row: usize, record: &RawTrip) -> Result<Trip> {
    let raw_start = record.start_time.as_deref().unwrap_or_default();
    let start_time =
        parse_timestamp(raw_start).ok_or_else(|| ExploreError::MalformedTimestamp {
            row,
            value: raw_start.to_string(),
        })?;

    let birth_year = parse_number(row, Column::BirthYear, record.birth_year.as_deref())
        .map(|year| year.trunc() as i32);

    Ok(Trip {
        start_time,
        end_time: record.end_time.clone(),
        trip_duration: parse_number(row, Column::TripDuration, record.trip_duration.as_deref()),
        start_station: record.start_station.clone(),
        end_station: record.end_station.clone(),
        user_type: record.user_type.clone(),
        gender: record.gender.clone(),
        birth_year,
        hour: start_time.hour(),
        month: start_time.month(),
        day_of_week: start_time.weekday(),
    })
}

/// A non-numeric or non-finite cell counts as a missing value.
fn parse_number(row: usize, column: Column, value: Option<&str>) -> Option<f64> {
    let value = value?.trim();
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => Some(number),
        _ => {
            warn!(row, column = %column, value, "Ignoring non-numeric or non-finite cell");
            None
        }
    }
}
