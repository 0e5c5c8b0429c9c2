//! Pairwise overlap aggregation across project cohorts.
//!
//! # Responsibility
//! - Group assignment records into per-project cohorts.
//! - Enumerate record pairs inside each cohort and measure shared time.
//! - Accumulate shared time per canonical employee pair.
//!
//! # Invariants
//! - Cohorts keep input order; cohorts are visited by ascending project id.
//! - Records of the same employee never pair with each other.
//! - Accumulation is field-wise addition; totals are not renormalized here.
//! - Accumulated entries iterate in first-insertion order.

use crate::model::assignment::{AssignmentRecord, ProjectId};
use crate::model::pair::PairKey;
use crate::model::period::CalendarPeriod;
use indexmap::IndexMap;
use log::debug;
use std::collections::BTreeMap;
use std::iter::FusedIterator;

/// Lazy sequence of all index pairs `(i, j)` with `i < j < len`.
///
/// Cloning yields an independent iterator from the same position, so the
/// sequence can be restarted from a saved copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPairs {
    len: usize,
    i: usize,
    j: usize,
}

/// All unordered index pairs over a sequence of `len` items.
pub fn index_pairs(len: usize) -> IndexPairs {
    IndexPairs { len, i: 0, j: 1 }
}

impl Iterator for IndexPairs {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.i + 1 < self.len {
            if self.j < self.len {
                let pair = (self.i, self.j);
                self.j += 1;
                return Some(pair);
            }
            self.i += 1;
            self.j = self.i + 1;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.i + 1 < self.len {
            let later_rows = self.len - self.i - 1;
            (self.len - self.j) + later_rows * (later_rows - 1) / 2
        } else {
            0
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for IndexPairs {}

impl FusedIterator for IndexPairs {}

/// Records grouped by project, each group in input order.
#[derive(Debug, Clone, Default)]
pub struct ProjectCohorts<'a> {
    cohorts: BTreeMap<ProjectId, Vec<&'a AssignmentRecord>>,
}

impl<'a> ProjectCohorts<'a> {
    pub fn from_records(records: &'a [AssignmentRecord]) -> Self {
        let mut cohorts: BTreeMap<ProjectId, Vec<&'a AssignmentRecord>> = BTreeMap::new();
        for record in records {
            cohorts.entry(record.project_id).or_default().push(record);
        }
        Self { cohorts }
    }

    pub fn len(&self) -> usize {
        self.cohorts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cohorts.is_empty()
    }

    pub fn get(&self, project_id: ProjectId) -> Option<&[&'a AssignmentRecord]> {
        self.cohorts.get(&project_id).map(Vec::as_slice)
    }

    /// Cohorts in ascending project id order.
    pub fn iter(&self) -> impl Iterator<Item = (ProjectId, &[&'a AssignmentRecord])> + '_ {
        self.cohorts
            .iter()
            .map(|(project_id, records)| (*project_id, records.as_slice()))
    }
}

/// Total shared time per employee pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccumulatedOverlap {
    totals: IndexMap<PairKey, CalendarPeriod>,
}

impl AccumulatedOverlap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `period` to the pair's running total, starting from zero for a
    /// pair seen for the first time.
    pub fn add(&mut self, pair: PairKey, period: CalendarPeriod) {
        *self.totals.entry(pair).or_insert(CalendarPeriod::ZERO) += period;
    }

    /// Folds another accumulation into this one by per-pair addition.
    ///
    /// Pairs new to `self` are appended in `other`'s order.
    pub fn merge(&mut self, other: Self) {
        for (pair, period) in other.totals {
            self.add(pair, period);
        }
    }

    pub fn get(&self, pair: &PairKey) -> Option<CalendarPeriod> {
        self.totals.get(pair).copied()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Entries in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&PairKey, &CalendarPeriod)> {
        self.totals.iter()
    }
}

impl Extend<(PairKey, CalendarPeriod)> for AccumulatedOverlap {
    fn extend<T: IntoIterator<Item = (PairKey, CalendarPeriod)>>(&mut self, iter: T) {
        for (pair, period) in iter {
            self.add(pair, period);
        }
    }
}

impl FromIterator<(PairKey, CalendarPeriod)> for AccumulatedOverlap {
    fn from_iter<T: IntoIterator<Item = (PairKey, CalendarPeriod)>>(iter: T) -> Self {
        let mut accumulated = Self::new();
        accumulated.extend(iter);
        accumulated
    }
}

/// Shared time of two records, keyed by their canonical pair.
///
/// Returns `None` for self-pairs and for intervals that do not strictly
/// overlap.
pub fn pair_overlap(
    first: &AssignmentRecord,
    second: &AssignmentRecord,
) -> Option<(PairKey, CalendarPeriod)> {
    let pair = PairKey::new(first.employee_id, second.employee_id)?;
    let shared = first.interval().intersection(&second.interval())?;
    Some((pair, shared.period()))
}

/// Every positive overlap between record pairs of one cohort.
pub fn cohort_overlaps<'a>(
    cohort: &'a [&'a AssignmentRecord],
) -> impl Iterator<Item = (PairKey, CalendarPeriod)> + 'a {
    index_pairs(cohort.len()).filter_map(move |(i, j)| pair_overlap(cohort[i], cohort[j]))
}

/// Groups `records` by project and accumulates shared time per pair.
pub fn accumulate_overlaps(records: &[AssignmentRecord]) -> AccumulatedOverlap {
    let cohorts = ProjectCohorts::from_records(records);
    accumulate_cohorts(&cohorts)
}

/// Accumulates shared time over already grouped cohorts.
pub fn accumulate_cohorts(cohorts: &ProjectCohorts<'_>) -> AccumulatedOverlap {
    let accumulated: AccumulatedOverlap = cohorts
        .iter()
        .flat_map(|(_, cohort)| cohort_overlaps(cohort))
        .collect();

    debug!(
        "event=overlaps_accumulated module=aggregate status=ok cohorts={} pairs={}",
        cohorts.len(),
        accumulated.len()
    );
    accumulated
}
