use std::collections::HashMap;
use std::hash::Hash;

use super::StatError;

struct Tally {
    count: usize,
    first_seen: usize,
}

/// Counts occurrences, remembering where each value first appeared.
fn tally<T, I>(values: I) -> HashMap<T, Tally>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut tallies: HashMap<T, Tally> = HashMap::new();
    for (idx, value) in values.into_iter().enumerate() {
        tallies
            .entry(value)
            .or_insert(Tally {
                count: 0,
                first_seen: idx,
            })
            .count += 1;
    }
    tallies
}

/// Most frequent value. Ties go to the value encountered first.
pub fn mode<T, I>(values: I) -> Result<T, StatError>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    tally(values)
        .into_iter()
        .max_by(|(_, a), (_, b)| {
            a.count
                .cmp(&b.count)
                .then_with(|| b.first_seen.cmp(&a.first_seen))
        })
        .map(|(value, _)| value)
        .ok_or(StatError::EmptyView)
}

/// Every distinct value with its count, most frequent first. Equal counts
/// keep first-encounter order.
pub fn value_counts<T, I>(values: I) -> Result<Vec<(T, usize)>, StatError>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut counts: Vec<(T, Tally)> = tally(values).into_iter().collect();
    if counts.is_empty() {
        return Err(StatError::EmptyView);
    }
    counts.sort_by(|(_, a), (_, b)| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.first_seen.cmp(&b.first_seen))
    });
    Ok(counts.into_iter().map(|(value, t)| (value, t.count)).collect())
}

/// Sum of the values; an empty input has no sum.
pub fn sum(values: &[f64]) -> Result<f64, StatError> {
    if values.is_empty() {
        return Err(StatError::EmptyView);
    }
    Ok(values.iter().sum())
}

/// Arithmetic mean of the values.
pub fn mean(values: &[f64]) -> Result<f64, StatError> {
    Ok(sum(values)? / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_picks_highest_frequency() {
        let stations = ["Lake Shore", "Clark St", "Clark St"];
        assert_eq!(mode(stations).unwrap(), "Clark St");
    }

    #[test]
    fn test_mode_tie_goes_to_first_encountered() {
        assert_eq!(mode([3, 1, 1, 3, 2]).unwrap(), 3);
        assert_eq!(mode(["b", "a"]).unwrap(), "b");
    }

    #[test]
    fn test_mode_empty() {
        assert_eq!(mode(Vec::<u32>::new()), Err(StatError::EmptyView));
    }

    #[test]
    fn test_value_counts_descending() {
        let counts = value_counts(["Customer", "Subscriber", "Subscriber", "Dependent"]).unwrap();
        assert_eq!(
            counts,
            vec![("Subscriber", 2), ("Customer", 1), ("Dependent", 1)]
        );
    }

    #[test]
    fn test_value_counts_empty() {
        assert_eq!(value_counts(Vec::<&str>::new()), Err(StatError::EmptyView));
    }

    #[test]
    fn test_sum_and_mean() {
        let values = [100.0, 200.0, 600.0];
        assert_eq!(sum(&values).unwrap(), 900.0);
        assert_eq!(mean(&values).unwrap(), 300.0);
    }

    #[test]
    fn test_sum_and_mean_empty() {
        assert_eq!(sum(&[]), Err(StatError::EmptyView));
        assert_eq!(mean(&[]), Err(StatError::EmptyView));
    }
}
