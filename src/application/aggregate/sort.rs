//! Deterministic multi-key ordering applied after aggregation.
//!
//! Primary key is a priority ordinal (lower first), secondary key is a
//! timestamp (newest first). Sorting is stable, so items with equal keys keep
//! their aggregation order.

use std::cmp::{Ordering, Reverse};

use super::Attributed;
use crate::domain::{Action, Timestamp};

/// Sort `items` by `(ordinal asc, timestamp desc)`, stably.
///
/// Items without a timestamp sort after timestamped items of the same
/// ordinal.
pub fn sort_by_priority<T, K>(items: &mut [T], key: K)
where
    K: Fn(&T) -> (u8, Option<Timestamp>),
{
    items.sort_by(|a, b| compare_priority(key(a), key(b)));
}

fn compare_priority(a: (u8, Option<Timestamp>), b: (u8, Option<Timestamp>)) -> Ordering {
    a.0.cmp(&b.0).then_with(|| Reverse(a.1).cmp(&Reverse(b.1)))
}

/// Sort aggregated actions most urgent first, newest first within an urgency.
pub fn sort_by_urgency(items: &mut [Attributed<Action>]) {
    sort_by_priority(items, |entry| {
        (entry.item.urgency.ordinal(), Some(entry.item.created_at))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn lower_ordinal_comes_first() {
        let mut items = vec![(3, "low"), (0, "critical"), (1, "high")];
        sort_by_priority(&mut items, |(ordinal, _)| (*ordinal, None));

        let labels: Vec<&str> = items.iter().map(|(_, label)| *label).collect();
        assert_eq!(labels, vec!["critical", "high", "low"]);
    }

    #[test]
    fn newer_timestamp_breaks_ties() {
        let mut items = vec![
            (1, Some(ts("2024-01-01")), "older"),
            (1, Some(ts("2024-01-03")), "newer"),
        ];
        sort_by_priority(&mut items, |(ordinal, at, _)| (*ordinal, *at));

        assert_eq!(items[0].2, "newer");
        assert_eq!(items[1].2, "older");
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let at = Some(ts("2024-01-01"));
        let mut items = vec![(2, at, "first"), (2, at, "second"), (2, at, "third")];
        sort_by_priority(&mut items, |(ordinal, at, _)| (*ordinal, *at));

        let labels: Vec<&str> = items.iter().map(|(_, _, label)| *label).collect();
        assert_eq!(labels, vec!["first", "second", "third"]);
    }

    #[test]
    fn missing_timestamp_sorts_last_within_ordinal() {
        let mut items = vec![(1, None, "undated"), (1, Some(ts("2020-01-01")), "dated")];
        sort_by_priority(&mut items, |(ordinal, at, _)| (*ordinal, *at));

        assert_eq!(items[0].2, "dated");
    }
}
