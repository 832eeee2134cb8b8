//! Raw trip records as they come out of a city's CSV file.
//!
//! The header row decides the dataset's [`Schema`]: which optional columns
//! this city carries. Cell values are kept as text here; typing happens in
//! [`crate::normalize`].

use std::collections::BTreeSet;
use std::fmt;
use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ExploreError, Result};

pub const START_TIME_HEADER: &str = "Start Time";

/// Optional columns a city dataset may or may not carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    EndTime,
    TripDuration,
    StartStation,
    EndStation,
    UserType,
    Gender,
    BirthYear,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::EndTime,
        Column::TripDuration,
        Column::StartStation,
        Column::EndStation,
        Column::UserType,
        Column::Gender,
        Column::BirthYear,
    ];

    /// Header text used by the source CSVs.
    pub fn header(self) -> &'static str {
        match self {
            Column::EndTime => "End Time",
            Column::TripDuration => "Trip Duration",
            Column::StartStation => "Start Station",
            Column::EndStation => "End Station",
            Column::UserType => "User Type",
            Column::Gender => "Gender",
            Column::BirthYear => "Birth Year",
        }
    }

    pub fn from_header(header: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.header() == header)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// The capability set of a dataset: the optional columns it carries.
///
/// Fixed per city and shared by every record of the dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    columns: BTreeSet<Column>,
}

impl Schema {
    pub fn new(columns: impl IntoIterator<Item = Column>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
        }
    }

    /// Every optional column present.
    pub fn full() -> Self {
        Self::new(Column::ALL)
    }

    /// Builds the schema from a CSV header row.
    ///
    /// # Errors
    ///
    /// Returns [`ExploreError::RequiredColumnMissing`] if there is no
    /// `Start Time` column.
    pub fn from_headers(headers: &StringRecord) -> Result<Self> {
        if !headers.iter().any(|h| h == START_TIME_HEADER) {
            return Err(ExploreError::RequiredColumnMissing(START_TIME_HEADER));
        }
        Ok(Self::new(headers.iter().filter_map(Column::from_header)))
    }

    pub fn has(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    pub fn columns(&self) -> impl Iterator<Item = Column> + '_ {
        self.columns.iter().copied()
    }
}

/// One CSV row. Empty cells and absent columns both read as `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawTrip {
    #[serde(rename = "Start Time", default)]
    pub start_time: Option<String>,
    #[serde(rename = "End Time", default)]
    pub end_time: Option<String>,
    #[serde(rename = "Trip Duration", default)]
    pub trip_duration: Option<String>,
    #[serde(rename = "Start Station", default)]
    pub start_station: Option<String>,
    #[serde(rename = "End Station", default)]
    pub end_station: Option<String>,
    #[serde(rename = "User Type", default)]
    pub user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    pub birth_year: Option<String>,
}

/// A loaded, not yet normalized dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDataset {
    pub schema: Schema,
    pub records: Vec<RawTrip>,
}

impl RawDataset {
    pub fn new(schema: Schema, records: Vec<RawTrip>) -> Self {
        Self { schema, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Reads a trip CSV (header row first) into a [`RawDataset`].
///
/// Unknown columns, including the unnamed index column some exports carry,
/// are ignored.
///
/// # Errors
///
/// Fails if the CSV is unreadable or has no `Start Time` column.
pub fn read_csv<R: Read>(reader: R) -> Result<RawDataset> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let schema = Schema::from_headers(rdr.headers()?)?;

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: RawTrip = result?;
        records.push(record);
    }

    debug!(
        rows = records.len(),
        columns = ?schema.columns().collect::<Vec<_>>(),
        "CSV read"
    );

    Ok(RawDataset::new(schema, records))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHICAGO_LIKE: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321.0,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610.0,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,,
";

    const WASHINGTON_LIKE: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1621326,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
";

    #[test]
    fn test_read_csv_full_schema() {
        let ds = read_csv(CHICAGO_LIKE.as_bytes()).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.schema, Schema::full());
        assert_eq!(ds.records[0].start_time.as_deref(), Some("2017-06-23 15:09:32"));
        assert_eq!(ds.records[0].birth_year.as_deref(), Some("1992.0"));
    }

    #[test]
    fn test_read_csv_empty_cells_are_none() {
        let ds = read_csv(CHICAGO_LIKE.as_bytes()).unwrap();

        assert_eq!(ds.records[1].gender, None);
        assert_eq!(ds.records[1].birth_year, None);
    }

    #[test]
    fn test_read_csv_schema_without_demographics() {
        let ds = read_csv(WASHINGTON_LIKE.as_bytes()).unwrap();

        assert!(ds.schema.has(Column::UserType));
        assert!(ds.schema.has(Column::EndTime));
        assert!(ds.schema.has(Column::TripDuration));
        assert!(!ds.schema.has(Column::Gender));
        assert!(!ds.schema.has(Column::BirthYear));
        assert_eq!(ds.records[0].gender, None);
    }

    #[test]
    fn test_read_csv_without_start_time_fails() {
        let csv = "Trip Duration,Gender\n12.0,Male\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();

        assert!(matches!(err, ExploreError::RequiredColumnMissing("Start Time")));
    }

    #[test]
    fn test_read_csv_header_only() {
        let ds = read_csv("Start Time,Gender\n".as_bytes()).unwrap();

        assert!(ds.is_empty());
        assert!(ds.schema.has(Column::Gender));
    }

    #[test]
    fn test_column_header_round_trip() {
        for column in Column::ALL {
            assert_eq!(Column::from_header(column.header()), Some(column));
        }
        assert_eq!(Column::from_header("Start Time"), None);
    }
}
