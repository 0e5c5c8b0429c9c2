//! Collaboration analysis use-case service.
//!
//! # Responsibility
//! - Load assignments from a source and run the overlap pipeline.
//! - Shape results into a serializable report for callers.
//!
//! # Invariants
//! - Load failures propagate unchanged; analysis never runs on partial input.
//! - `ranking` holds every overlapping pair unless a caller truncates it.
//! - When any pair overlaps, `best` equals `ranking[0]`; otherwise `best` is
//!   `None` and `ranking` is empty.

use crate::aggregate::{accumulate_cohorts, ProjectCohorts};
use crate::model::assignment::AssignmentRecord;
use crate::rank::{ranked, select_longest, PairOverlap};
use crate::source::{AssignmentSource, LoadResult};
use log::info;
use serde::Serialize;

/// Outcome of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollaborationReport {
    /// Number of assignment records analyzed.
    pub records: usize,
    /// Number of distinct projects.
    pub projects: usize,
    /// Records whose end date fell back to the processing date.
    pub open_ended: usize,
    /// Longest-working pair, `None` when nobody overlapped.
    pub best: Option<PairOverlap>,
    /// Every overlapping pair, longest first.
    pub ranking: Vec<PairOverlap>,
}

impl CollaborationReport {
    /// Keeps at most `limit` ranking entries; `best` is unaffected.
    pub fn truncate_ranking(&mut self, limit: usize) {
        self.ranking.truncate(limit);
    }
}

/// Runs the full pipeline over in-memory records.
pub fn analyze_records(records: &[AssignmentRecord]) -> CollaborationReport {
    let cohorts = ProjectCohorts::from_records(records);
    let accumulated = accumulate_cohorts(&cohorts);
    let best = select_longest(&accumulated);
    let ranking = ranked(&accumulated);

    match &best {
        Some(entry) => info!(
            "event=analysis_done module=service status=ok records={} projects={} pairs={} best={} period={}",
            records.len(),
            cohorts.len(),
            accumulated.len(),
            entry.pair,
            entry.period
        ),
        None => info!(
            "event=analysis_done module=service status=empty records={} projects={}",
            records.len(),
            cohorts.len()
        ),
    }

    CollaborationReport {
        records: records.len(),
        projects: cohorts.len(),
        open_ended: records.iter().filter(|record| record.is_open_ended()).count(),
        best,
        ranking,
    }
}

/// Service facade over an assignment source.
pub struct CollaborationService<S: AssignmentSource> {
    source: S,
}

impl<S: AssignmentSource> CollaborationService<S> {
    /// Creates a service reading from `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Loads every record and finds the longest-working pair.
    ///
    /// # Errors
    /// - Returns the source's `LoadError` unchanged.
    pub fn analyze(&self) -> LoadResult<CollaborationReport> {
        let records = self.source.load()?;
        Ok(analyze_records(&records))
    }
}

#[cfg(test)]
mod tests {
    use super::{analyze_records, CollaborationService};
    use crate::model::assignment::AssignmentRecord;
    use chrono::NaiveDate;

    fn record(employee: i64, project: i64, start: &str, end: &str) -> AssignmentRecord {
        AssignmentRecord::new(
            employee,
            project,
            NaiveDate::parse_from_str(start, "%Y-%m-%d").expect("valid test date"),
            NaiveDate::parse_from_str(end, "%Y-%m-%d").expect("valid test date"),
        )
    }

    #[test]
    fn ranking_lists_every_pair_with_best_first() {
        let records = vec![
            record(1, 10, "2020-01-01", "2020-03-01"),
            record(2, 10, "2020-01-01", "2020-03-01"),
            record(3, 20, "2020-01-01", "2020-07-01"),
            record(4, 20, "2020-01-01", "2020-07-01"),
            record(5, 30, "2020-01-01", "2020-02-01"),
            record(6, 30, "2020-01-01", "2020-02-01"),
        ];

        let report = CollaborationService::new(records).analyze().unwrap();
        assert_eq!(report.ranking.len(), 3);
        assert_eq!(report.best, Some(report.ranking[0]));
        assert_eq!(report.ranking[0].pair.low(), 3);
    }

    #[test]
    fn truncating_keeps_best() {
        let records = vec![
            record(1, 10, "2020-01-01", "2020-03-01"),
            record(2, 10, "2020-01-01", "2020-03-01"),
            record(3, 20, "2020-01-01", "2020-07-01"),
            record(4, 20, "2020-01-01", "2020-07-01"),
        ];
        let mut report = analyze_records(&records);
        let best = report.best;

        report.truncate_ranking(1);
        assert_eq!(report.ranking.len(), 1);
        assert_eq!(report.best, best);
    }

    #[test]
    fn empty_report_has_no_best_and_no_ranking() {
        let report = analyze_records(&[]);
        assert_eq!(report.best, None);
        assert!(report.ranking.is_empty());
    }
}
