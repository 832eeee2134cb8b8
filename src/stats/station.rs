use serde::Serialize;

use crate::filter::FilteredView;

use super::utility::mode;
use super::{Stat, StatError};

/// A start/end station combination counted as one trip route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationPair {
    pub start: String,
    pub end: String,
}

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub popular_start: Stat<String>,
    pub popular_end: Stat<String>,
    pub popular_trip: Stat<StationPair>,
}

#[tracing::instrument(skip(view), fields(trips = view.len()))]
pub fn station_stats(view: &FilteredView<'_>) -> StationStats {
    StationStats {
        popular_start: popular(view.start_stations()).into(),
        popular_end: popular(view.end_stations()).into(),
        popular_trip: view
            .station_pairs()
            .and_then(mode)
            .map(|(start, end)| StationPair {
                start: start.to_string(),
                end: end.to_string(),
            })
            .into(),
    }
}

fn popular<'a>(
    values: Result<impl Iterator<Item = &'a str>, StatError>,
) -> Result<String, StatError> {
    Ok(mode(values?)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Column;
    use crate::stats::Unavailable;
    use crate::test_support::dataset_from_csv;

    #[test]
    fn test_station_stats_modes() {
        let ds = dataset_from_csv(
            "\
Start Time,Start Station,End Station
2017-01-02 08:00:00,Canal St,Clark St
2017-01-02 09:00:00,Wells St,Lake St
2017-01-02 10:00:00,Wells St,Clark St
2017-01-02 11:00:00,Canal St,Clark St
",
        );
        let stats = station_stats(&ds.view());

        assert_eq!(stats.popular_start, Stat::Available("Canal St".to_string()));
        assert_eq!(stats.popular_end, Stat::Available("Clark St".to_string()));
        assert_eq!(
            stats.popular_trip,
            Stat::Available(StationPair {
                start: "Canal St".to_string(),
                end: "Clark St".to_string(),
            })
        );
    }

    #[test]
    fn test_station_mode_prefers_frequency_over_order() {
        let ds = dataset_from_csv(
            "\
Start Time,Start Station,End Station
2017-01-02 08:00:00,Lake Shore Dr,A
2017-01-02 09:00:00,Michigan Ave,B
2017-01-02 10:00:00,Michigan Ave,C
",
        );
        let stats = station_stats(&ds.view());

        assert_eq!(stats.popular_start, Stat::Available("Michigan Ave".to_string()));
    }

    #[test]
    fn test_missing_end_station_only_degrades_dependents() {
        let ds = dataset_from_csv("Start Time,Start Station\n2017-01-02 08:00:00,Canal St\n");
        let stats = station_stats(&ds.view());

        assert_eq!(stats.popular_start, Stat::Available("Canal St".to_string()));
        assert_eq!(
            stats.popular_end,
            Stat::Unavailable(Unavailable::ColumnMissing(Column::EndStation))
        );
        assert_eq!(
            stats.popular_trip,
            Stat::Unavailable(Unavailable::ColumnMissing(Column::EndStation))
        );
    }

    #[test]
    fn test_pair_skips_rows_with_blank_station() {
        let ds = dataset_from_csv(
            "\
Start Time,Start Station,End Station
2017-01-02 08:00:00,Canal St,
2017-01-02 09:00:00,Canal St,
2017-01-02 10:00:00,Wells St,Lake St
",
        );
        let stats = station_stats(&ds.view());

        assert_eq!(stats.popular_end, Stat::Available("Lake St".to_string()));
        assert_eq!(
            stats.popular_trip,
            Stat::Available(StationPair {
                start: "Wells St".to_string(),
                end: "Lake St".to_string(),
            })
        );
    }
}
