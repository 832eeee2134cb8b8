use serde::Serialize;

use crate::filter::FilteredView;
use crate::normalize::weekday_name;

use super::Stat;
use super::utility::mode;

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    /// Calendar month number, 1-12.
    pub popular_month: Stat<u32>,
    pub popular_day: Stat<String>,
    /// Hour of day, 0-23.
    pub popular_hour: Stat<u32>,
}

/// Needs no optional column; only an empty view leaves it without data.
#[tracing::instrument(skip(view), fields(trips = view.len()))]
pub fn time_stats(view: &FilteredView<'_>) -> TimeStats {
    let trips = view.trips();

    TimeStats {
        popular_month: mode(trips.iter().map(|t| t.month)).into(),
        popular_day: mode(trips.iter().map(|t| t.day_of_week))
            .map(|day| weekday_name(day).to_string())
            .into(),
        popular_hour: mode(trips.iter().map(|t| t.hour)).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{Month, Selection, Selector, filter};
    use crate::stats::Unavailable;
    use crate::test_support::dataset_from_csv;

    // Jan 2 and Jan 9 2017 are Mondays, Feb 7 a Tuesday.
    const TRIPS: &str = "\
Start Time,Trip Duration
2017-01-02 08:10:00,100
2017-01-09 08:45:00,200
2017-02-07 17:00:00,300
";

    #[test]
    fn test_time_stats_unfiltered() {
        let ds = dataset_from_csv(TRIPS);
        let stats = time_stats(&ds.view());

        assert_eq!(stats.popular_month, Stat::Available(1));
        assert_eq!(stats.popular_day, Stat::Available("Monday".to_string()));
        assert_eq!(stats.popular_hour, Stat::Available(8));
    }

    #[test]
    fn test_time_stats_february_only() {
        let ds = dataset_from_csv(TRIPS);
        let view = filter(&ds, &Selection::new(Selector::Only(Month::February), Selector::All));
        let stats = time_stats(&view);

        assert_eq!(view.len(), 1);
        assert_eq!(stats.popular_month, Stat::Available(2));
        assert_eq!(stats.popular_day, Stat::Available("Tuesday".to_string()));
        assert_eq!(stats.popular_hour, Stat::Available(17));
    }

    #[test]
    fn test_time_stats_empty_view() {
        let ds = dataset_from_csv(TRIPS);
        let view = filter(&ds, &Selection::new(Selector::Only(Month::March), Selector::All));
        let stats = time_stats(&view);

        assert_eq!(stats.popular_month, Stat::Unavailable(Unavailable::NoData));
        assert_eq!(stats.popular_day, Stat::Unavailable(Unavailable::NoData));
        assert_eq!(stats.popular_hour, Stat::Unavailable(Unavailable::NoData));
    }

    #[test]
    fn test_time_stats_hour_tie_goes_to_first_seen() {
        let ds = dataset_from_csv(
            "Start Time\n2017-03-01 19:00:00\n2017-03-01 07:00:00\n2017-03-02 07:30:00\n2017-03-02 19:30:00\n",
        );
        let stats = time_stats(&ds.view());

        assert_eq!(stats.popular_hour, Stat::Available(19));
    }
}
