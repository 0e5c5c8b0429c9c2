//! Ranking of accumulated pair overlaps.
//!
//! # Responsibility
//! - Define the total order used to pick the longest-working pair.
//! - Select the single best entry, or rank every entry.
//!
//! # Invariants
//! - Periods are normalized before comparison.
//! - Order: total months, then remaining days, both descending.
//! - Equal ranks resolve to the entry that comes first in accumulation order.

use crate::aggregate::AccumulatedOverlap;
use crate::model::pair::PairKey;
use crate::model::period::CalendarPeriod;
use serde::Serialize;
use std::cmp::Ordering;

/// Comparison key for an accumulated period. Greater means longer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OverlapRank {
    total_months: i64,
    days: i32,
}

impl OverlapRank {
    pub fn of(period: CalendarPeriod) -> Self {
        let normalized = period.normalized();
        Self {
            total_months: normalized.total_months(),
            days: normalized.days,
        }
    }
}

/// Orders two periods by rank; `Greater` means `first` is longer.
pub fn compare_periods(first: CalendarPeriod, second: CalendarPeriod) -> Ordering {
    OverlapRank::of(first).cmp(&OverlapRank::of(second))
}

/// One pair with its normalized total overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PairOverlap {
    pub pair: PairKey,
    pub period: CalendarPeriod,
}

impl PairOverlap {
    pub fn new(pair: PairKey, period: CalendarPeriod) -> Self {
        Self {
            pair,
            period: period.normalized(),
        }
    }
}

/// Entry with the longest overlap, or `None` when nothing overlapped.
pub fn select_longest(accumulated: &AccumulatedOverlap) -> Option<PairOverlap> {
    accumulated
        .iter()
        .map(|(pair, period)| PairOverlap::new(*pair, *period))
        .fold(None, |best, candidate| match best {
            Some(current) if compare_periods(current.period, candidate.period).is_ge() => {
                Some(current)
            }
            _ => Some(candidate),
        })
}

/// Every entry, longest first; ties keep accumulation order.
pub fn ranked(accumulated: &AccumulatedOverlap) -> Vec<PairOverlap> {
    let mut entries: Vec<PairOverlap> = accumulated
        .iter()
        .map(|(pair, period)| PairOverlap::new(*pair, *period))
        .collect();
    entries.sort_by(|left, right| compare_periods(right.period, left.period));
    entries
}

#[cfg(test)]
mod tests {
    use super::{compare_periods, ranked, select_longest, OverlapRank};
    use crate::aggregate::AccumulatedOverlap;
    use crate::model::pair::PairKey;
    use crate::model::period::CalendarPeriod;
    use std::cmp::Ordering;

    fn pair(a: i64, b: i64) -> PairKey {
        PairKey::new(a, b).expect("distinct ids")
    }

    #[test]
    fn months_dominate_days() {
        assert_eq!(
            compare_periods(CalendarPeriod::new(0, 4, 0), CalendarPeriod::new(0, 3, 30)),
            Ordering::Greater
        );
        assert_eq!(
            compare_periods(CalendarPeriod::new(0, 3, 2), CalendarPeriod::new(0, 3, 1)),
            Ordering::Greater
        );
    }

    #[test]
    fn rank_is_taken_after_normalization() {
        let raw = OverlapRank::of(CalendarPeriod::new(0, 14, 3));
        let normalized = OverlapRank::of(CalendarPeriod::new(1, 2, 3));
        assert_eq!(raw, normalized);
    }

    #[test]
    fn select_longest_ignores_input_order_for_distinct_ranks() {
        let forward: AccumulatedOverlap = vec![
            (pair(1, 2), CalendarPeriod::new(0, 2, 25)),
            (pair(3, 4), CalendarPeriod::new(0, 3, 0)),
        ]
        .into_iter()
        .collect();
        let backward: AccumulatedOverlap = vec![
            (pair(3, 4), CalendarPeriod::new(0, 3, 0)),
            (pair(1, 2), CalendarPeriod::new(0, 2, 25)),
        ]
        .into_iter()
        .collect();

        assert_eq!(select_longest(&forward).unwrap().pair, pair(3, 4));
        assert_eq!(select_longest(&backward).unwrap().pair, pair(3, 4));
    }

    #[test]
    fn select_longest_breaks_ties_by_first_entry() {
        let accumulated: AccumulatedOverlap = vec![
            (pair(5, 6), CalendarPeriod::new(0, 5, 0)),
            (pair(1, 2), CalendarPeriod::new(0, 5, 0)),
        ]
        .into_iter()
        .collect();

        let best = select_longest(&accumulated).expect("entries present");
        assert_eq!(best.pair, pair(5, 6));
        assert_eq!(ranked(&accumulated)[0], best);
    }

    #[test]
    fn select_longest_returns_normalized_period() {
        let accumulated: AccumulatedOverlap = vec![(pair(1, 2), CalendarPeriod::new(0, 13, 4))]
            .into_iter()
            .collect();
        let best = select_longest(&accumulated).unwrap();
        assert_eq!(best.period, CalendarPeriod::new(1, 1, 4));
    }

    #[test]
    fn empty_accumulation_has_no_winner() {
        assert_eq!(select_longest(&AccumulatedOverlap::new()), None);
        assert!(ranked(&AccumulatedOverlap::new()).is_empty());
    }

    #[test]
    fn ranked_orders_longest_first() {
        let accumulated: AccumulatedOverlap = vec![
            (pair(1, 2), CalendarPeriod::new(0, 1, 0)),
            (pair(3, 4), CalendarPeriod::new(2, 0, 0)),
            (pair(5, 6), CalendarPeriod::new(0, 1, 10)),
        ]
        .into_iter()
        .collect();

        let order: Vec<PairKey> = ranked(&accumulated).iter().map(|entry| entry.pair).collect();
        assert_eq!(order, vec![pair(3, 4), pair(5, 6), pair(1, 2)]);
    }
}
