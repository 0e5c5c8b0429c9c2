//! Core domain logic for teamspan.
//! Finds the pair of employees who shared the most time on common projects.

pub mod aggregate;
pub mod interval;
pub mod logging;
pub mod model;
pub mod rank;
pub mod report;
pub mod service;
pub mod source;

pub use aggregate::{
    accumulate_cohorts, accumulate_overlaps, cohort_overlaps, index_pairs, pair_overlap,
    AccumulatedOverlap, IndexPairs, ProjectCohorts,
};
pub use interval::{earlier_of, later_of, DateInterval};
pub use logging::{default_log_level, init_logging, logging_status, LogDestination};
pub use model::assignment::{AssignmentRecord, EmployeeId, EndDateKind, ProjectId};
pub use model::pair::PairKey;
pub use model::period::CalendarPeriod;
pub use rank::{compare_periods, ranked, select_longest, OverlapRank, PairOverlap};
pub use report::{format_period, render_best, render_ranking, NO_PAIRS_MESSAGE};
pub use service::collaboration_service::{
    analyze_records, CollaborationReport, CollaborationService,
};
pub use source::csv_source::{
    load_file, load_records, parse_date, parse_record, CsvFileSource, LoadOptions,
};
pub use source::{AssignmentSource, LoadError, LoadResult, RecordField};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
