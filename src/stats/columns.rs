//! Capability-checked access to optional columns.
//!
//! Each accessor fails with [`StatError::ColumnUnavailable`] when the
//! dataset's schema lacks the column, and otherwise yields the non-empty
//! values of the view in order.

use crate::dataset::Column;
use crate::filter::FilteredView;
use crate::normalize::Trip;

use super::StatError;

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl<'a> FilteredView<'a> {
    pub fn require(&self, column: Column) -> Result<(), StatError> {
        if self.schema().has(column) {
            Ok(())
        } else {
            Err(StatError::ColumnUnavailable(column))
        }
    }

    fn rows(&self) -> impl Iterator<Item = &'a Trip> + '_ {
        self.trips().iter().copied()
    }

    pub fn start_stations(&self) -> Result<impl Iterator<Item = &'a str> + '_, StatError> {
        self.require(Column::StartStation)?;
        Ok(self.rows().filter_map(|t| non_empty(&t.start_station)))
    }

    pub fn end_stations(&self) -> Result<impl Iterator<Item = &'a str> + '_, StatError> {
        self.require(Column::EndStation)?;
        Ok(self.rows().filter_map(|t| non_empty(&t.end_station)))
    }

    /// Trips where both stations are known.
    pub fn station_pairs(
        &self,
    ) -> Result<impl Iterator<Item = (&'a str, &'a str)> + '_, StatError> {
        self.require(Column::StartStation)?;
        self.require(Column::EndStation)?;
        Ok(self
            .rows()
            .filter_map(|t| Some((non_empty(&t.start_station)?, non_empty(&t.end_station)?))))
    }

    pub fn user_types(&self) -> Result<impl Iterator<Item = &'a str> + '_, StatError> {
        self.require(Column::UserType)?;
        Ok(self.rows().filter_map(|t| non_empty(&t.user_type)))
    }

    pub fn genders(&self) -> Result<impl Iterator<Item = &'a str> + '_, StatError> {
        self.require(Column::Gender)?;
        Ok(self.rows().filter_map(|t| non_empty(&t.gender)))
    }

    pub fn durations(&self) -> Result<impl Iterator<Item = f64> + '_, StatError> {
        self.require(Column::TripDuration)?;
        Ok(self.rows().filter_map(|t| t.trip_duration))
    }

    pub fn birth_years(&self) -> Result<impl Iterator<Item = i32> + '_, StatError> {
        self.require(Column::BirthYear)?;
        Ok(self.rows().filter_map(|t| t.birth_year))
    }
}
