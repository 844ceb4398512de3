//! Date ordering of records.
//!
//! Dates are compared as plain strings. ISO-8601 values sort correctly that
//! way, and nothing is parsed here.

use crate::error::{PipelineError, Result};
use crate::transaction::Transaction;

/// Sorts records by `date`, newest first when `descending` is set.
///
/// The sort is stable in both directions: records sharing a date keep their
/// input order. Unlike the filters, a record without `date` is an error, and
/// it is reported before anything is sorted.
pub fn sort_by_date<'a, I>(records: I, descending: bool) -> Result<Vec<&'a Transaction>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut keyed = Vec::new();
    for (index, tx) in records.into_iter().enumerate() {
        let date = tx
            .date
            .as_deref()
            .ok_or(PipelineError::MissingKey { key: "date", index })?;
        keyed.push((date, tx));
    }

    keyed.sort_by(|(a, _), (b, _)| {
        let ord = a.cmp(b);
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });

    Ok(keyed.into_iter().map(|(_, tx)| tx).collect())
}

/// [`sort_by_date`], newest first.
pub fn sort_by_date_desc<'a, I>(records: I) -> Result<Vec<&'a Transaction>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    sort_by_date(records, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tx(id: i64, date: Option<&str>) -> Transaction {
        Transaction {
            id: Some(id.into()),
            date: date.map(String::from),
            ..Default::default()
        }
    }

    fn ids(records: &[&Transaction]) -> Vec<i64> {
        records.iter().filter_map(|tx| tx.id.as_ref()?.as_i64()).collect()
    }

    #[test]
    fn test_sort_descending_and_ascending() {
        let data = vec![
            tx(1, Some("2023-10-15")),
            tx(2, Some("2023-10-14")),
            tx(3, Some("2023-10-16")),
        ];

        assert_eq!(ids(&sort_by_date(&data, true).unwrap()), vec![3, 1, 2]);
        assert_eq!(ids(&sort_by_date(&data, false).unwrap()), vec![2, 1, 3]);
        assert_eq!(ids(&sort_by_date_desc(&data).unwrap()), vec![3, 1, 2]);
    }

    #[test]
    fn test_sort_with_time_components() {
        let data = vec![
            tx(1, Some("2019-08-26T10:50:58.294041")),
            tx(2, Some("2019-07-03T18:35:29.512364")),
            tx(3, Some("2019-08-26T10:50:58.294042")),
            tx(4, Some("2018-06-30T02:08:58.425572")),
        ];

        assert_eq!(ids(&sort_by_date(&data, true).unwrap()), vec![3, 1, 2, 4]);
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let data = vec![
            tx(1, Some("2023-10-15")),
            tx(2, Some("2023-10-14")),
            tx(3, Some("2023-10-15")),
            tx(4, Some("2023-10-14")),
        ];

        assert_eq!(ids(&sort_by_date(&data, true).unwrap()), vec![1, 3, 2, 4]);
        assert_eq!(ids(&sort_by_date(&data, false).unwrap()), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_missing_date_is_an_error() {
        let data = vec![
            tx(1, Some("2023-10-15")),
            tx(2, None),
            tx(3, Some("2023-10-16")),
        ];

        match sort_by_date(&data, true) {
            Err(PipelineError::MissingKey { key, index }) => {
                assert_eq!(key, "date");
                assert_eq!(index, 1);
            }
            other => panic!("Expected MissingKey, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(sort_by_date(&Vec::<Transaction>::new(), true)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_sort_does_not_touch_records() {
        let data = vec![tx(1, Some("2023-01-01")), tx(2, Some("2024-01-01"))];
        let before = data.clone();
        let sorted = sort_by_date(&data, true).unwrap();
        assert!(std::ptr::eq(sorted[1], &data[0]));
        assert_eq!(data, before);
    }

    fn dated(dates: Vec<String>) -> Vec<Transaction> {
        dates
            .into_iter()
            .enumerate()
            .map(|(i, d)| tx(i as i64, Some(&d)))
            .collect()
    }

    proptest! {
        #[test]
        fn prop_sort_is_idempotent(
            dates in prop::collection::vec("20[0-9]{2}-(0[1-9]|1[0-2])-[0-2][0-9]", 0..30),
            descending in any::<bool>(),
        ) {
            let data = dated(dates);
            let once = sort_by_date(&data, descending).unwrap();
            let twice = sort_by_date(once.iter().copied(), descending).unwrap();
            prop_assert_eq!(ids(&once), ids(&twice));
        }

        #[test]
        fn prop_opposite_direction_reversed_matches(
            dates in prop::collection::btree_set("20[0-9]{2}-(0[1-9]|1[0-2])-[0-2][0-9]", 0..30),
        ) {
            let data = dated(dates.into_iter().rev().collect());
            let desc = sort_by_date(&data, true).unwrap();
            let mut asc_reversed = sort_by_date(desc.iter().copied(), false).unwrap();
            asc_reversed.reverse();
            prop_assert_eq!(ids(&desc), ids(&asc_reversed));
        }
    }
}
