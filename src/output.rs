//! Rendering and persistence for statistics reports.
//!
//! Supports plain-text rendering, JSON serialization, paged row listings
//! and CSV append of a one-line summary.

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use tracing::debug;

use crate::catalog::City;
use crate::dataset::{Column, Schema};
use crate::filter::Selection;
use crate::normalize::Trip;
use crate::stats::{
    DurationStats, Stat, StationStats, StatisticsReport, TimeStats, UserStats, ValueCount,
};

const NO_DATA: &str = "No data available.";
const NO_CATEGORY_DATA: &str = "No data available for this category.";

pub const RULE: &str = "----------------------------------------";

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &StatisticsReport) {
    debug!("{:#?}", report);
}

/// Serializes a report as pretty-printed JSON.
pub fn to_json(report: &StatisticsReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn or_no_data<T>(stat: &Stat<T>, show: impl FnOnce(&T) -> String) -> String {
    stat.value().map(show).unwrap_or_else(|| NO_DATA.to_string())
}

fn month_label(month: u32) -> String {
    let name = u8::try_from(month)
        .ok()
        .and_then(|m| chrono::Month::try_from(m).ok())
        .map(|m| m.name());
    match name {
        Some(name) => format!("{month} ({name})"),
        None => month.to_string(),
    }
}

pub fn render_time(stats: &TimeStats) -> String {
    let mut out = String::from("Calculating The Most Frequent Times of Travel...\n\n");
    let _ = writeln!(
        out,
        "Most popular month: {}",
        or_no_data(&stats.popular_month, |m| month_label(*m))
    );
    let _ = writeln!(
        out,
        "Most popular day of week: {}",
        or_no_data(&stats.popular_day, String::clone)
    );
    let _ = writeln!(
        out,
        "Most popular start hour: {}",
        or_no_data(&stats.popular_hour, |h| format!("{h}:00"))
    );
    out
}

pub fn render_stations(stats: &StationStats) -> String {
    let mut out = String::from("Calculating The Most Popular Stations and Trip...\n\n");
    let _ = writeln!(
        out,
        "Most commonly used start station: {}",
        or_no_data(&stats.popular_start, String::clone)
    );
    let _ = writeln!(
        out,
        "Most commonly used end station: {}",
        or_no_data(&stats.popular_end, String::clone)
    );
    let _ = writeln!(
        out,
        "Most frequent trip: {}",
        or_no_data(&stats.popular_trip, |p| format!("{} -> {}", p.start, p.end))
    );
    out
}

pub fn render_duration(stats: &DurationStats) -> String {
    let mut out = String::from("Calculating Trip Duration...\n\n");
    let _ = writeln!(
        out,
        "Total travel time: {}",
        or_no_data(&stats.total, |s| format!("{s:.2} seconds"))
    );
    let _ = writeln!(
        out,
        "Mean travel time: {}",
        or_no_data(&stats.mean, |s| format!("{s:.2} seconds"))
    );
    out
}

fn render_counts(counts: &[ValueCount]) -> String {
    let mut out = String::new();
    for entry in counts {
        let _ = write!(out, "\n  {}: {}", entry.value, entry.count);
    }
    out
}

pub fn render_users(stats: &UserStats) -> String {
    let mut out = String::from("Calculating User Stats...\n\n");
    let _ = writeln!(
        out,
        "Counts of user types: {}",
        or_no_data(&stats.user_types, |c| render_counts(c))
    );
    let _ = writeln!(
        out,
        "Counts of gender: {}",
        or_no_data(&stats.genders, |c| render_counts(c))
    );
    match stats.birth_years.value() {
        Some(years) => {
            let _ = writeln!(out, "Most common birth year: {}", years.most_common);
            let _ = writeln!(out, "Most recent birth year: {}", years.most_recent);
            let _ = writeln!(out, "Earliest birth year: {}", years.earliest);
        }
        None => {
            let _ = writeln!(out, "Birth year: {NO_CATEGORY_DATA}");
        }
    }
    out
}

/// Every group, separated by rules.
pub fn render_report(report: &StatisticsReport) -> String {
    let mut out = format!("Trips in selection: {}\n{RULE}\n", report.trips);
    for section in [
        render_time(&report.time),
        render_stations(&report.stations),
        render_duration(&report.duration),
        render_users(&report.users),
    ] {
        out.push('\n');
        out.push_str(&section);
        out.push_str(RULE);
        out.push('\n');
    }
    out
}

fn cell(trip: &Trip, column: Column) -> String {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    match column {
        Column::EndTime => text(&trip.end_time),
        Column::TripDuration => trip.trip_duration.map(|d| d.to_string()).unwrap_or_default(),
        Column::StartStation => text(&trip.start_station),
        Column::EndStation => text(&trip.end_station),
        Column::UserType => text(&trip.user_type),
        Column::Gender => text(&trip.gender),
        Column::BirthYear => trip.birth_year.map(|y| y.to_string()).unwrap_or_default(),
    }
}

/// Lists trips one per line, showing only the columns the schema carries.
pub fn render_rows(schema: &Schema, rows: &[&Trip]) -> String {
    let columns: Vec<Column> = schema.columns().collect();

    let mut header = vec!["Start Time".to_string()];
    header.extend(columns.iter().map(|c| c.header().to_string()));
    header.extend(["hour", "month", "day_of_week"].map(String::from));

    let mut out = header.join(" | ");
    out.push('\n');
    for trip in rows {
        let mut line = vec![trip.start_time.format("%Y-%m-%d %H:%M:%S").to_string()];
        line.extend(columns.iter().map(|c| cell(trip, *c)));
        line.push(trip.hour.to_string());
        line.push(trip.month.to_string());
        line.push(trip.day_name().to_string());
        out.push_str(&line.join(" | "));
        out.push('\n');
    }
    out
}

/// One flat row summarizing a report, for CSV history files.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub generated_at: DateTime<Utc>,
    pub city: String,
    pub month: String,
    pub day: String,
    pub trips: usize,
    pub popular_month: Option<u32>,
    pub popular_day: Option<String>,
    pub popular_hour: Option<u32>,
    pub popular_start_station: Option<String>,
    pub popular_end_station: Option<String>,
    pub popular_trip: Option<String>,
    pub total_duration: Option<f64>,
    pub mean_duration: Option<f64>,
    pub top_user_type: Option<String>,
    pub top_gender: Option<String>,
    pub most_common_birth_year: Option<i32>,
    pub most_recent_birth_year: Option<i32>,
    pub earliest_birth_year: Option<i32>,
}

impl ReportSummary {
    pub fn new(city: City, selection: &Selection, report: &StatisticsReport) -> Self {
        let top = |stat: &Stat<Vec<ValueCount>>| {
            stat.value()
                .and_then(|counts| counts.first())
                .map(|c| c.value.clone())
        };
        let years = report.users.birth_years.value();

        Self {
            generated_at: Utc::now(),
            city: city.name().to_string(),
            month: selection.month.to_string(),
            day: selection.day.to_string(),
            trips: report.trips,
            popular_month: report.time.popular_month.value().copied(),
            popular_day: report.time.popular_day.value().cloned(),
            popular_hour: report.time.popular_hour.value().copied(),
            popular_start_station: report.stations.popular_start.value().cloned(),
            popular_end_station: report.stations.popular_end.value().cloned(),
            popular_trip: report
                .stations
                .popular_trip
                .value()
                .map(|p| format!("{} -> {}", p.start, p.end)),
            total_duration: report.duration.total.value().copied(),
            mean_duration: report.duration.mean.value().copied(),
            top_user_type: top(&report.users.user_types),
            top_gender: top(&report.users.genders),
            most_common_birth_year: years.map(|y| y.most_common),
            most_recent_birth_year: years.map(|y| y.most_recent),
            earliest_birth_year: years.map(|y| y.earliest),
        }
    }
}

/// Appends a [`ReportSummary`] as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &Path, summary: &ReportSummary) -> Result<()> {
    let file_exists = path.exists();
    debug!(path = %path.display(), file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    writer.serialize(summary)?;
    writer.flush()?;

    Ok(())
}
