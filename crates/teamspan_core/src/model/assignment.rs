//! Assignment record domain model.
//!
//! # Responsibility
//! - Define the typed record produced by the loader for every input line.
//! - Keep the open-ended end-date fallback visible to callers.
//!
//! # Invariants
//! - Records are immutable once loaded.
//! - `start_date < end_date` is not enforced here; an empty or reversed
//!   interval simply never overlaps anything.

use crate::interval::DateInterval;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Employee identifier as it appears in the source feed.
pub type EmployeeId = i64;

/// Project identifier grouping assignments into cohorts.
pub type ProjectId = i64;

/// How the end date of an assignment was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndDateKind {
    /// Parsed from the source feed.
    Explicit,
    /// Missing or unparsable in the feed; replaced by the processing date.
    OpenEnded,
}

/// One employee's work interval on one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub employee_id: EmployeeId,
    pub project_id: ProjectId,
    /// Inclusive lower bound.
    pub start_date: NaiveDate,
    /// Upper bound; the processing date for open-ended assignments.
    pub end_date: NaiveDate,
    pub end_kind: EndDateKind,
}

impl AssignmentRecord {
    /// Creates a record with an explicit end date.
    pub fn new(
        employee_id: EmployeeId,
        project_id: ProjectId,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            employee_id,
            project_id,
            start_date,
            end_date,
            end_kind: EndDateKind::Explicit,
        }
    }

    /// Creates a record that is still active as of `today`.
    pub fn open_ended(
        employee_id: EmployeeId,
        project_id: ProjectId,
        start_date: NaiveDate,
        today: NaiveDate,
    ) -> Self {
        Self {
            end_kind: EndDateKind::OpenEnded,
            ..Self::new(employee_id, project_id, start_date, today)
        }
    }

    pub fn interval(&self) -> DateInterval {
        DateInterval::new(self.start_date, self.end_date)
    }

    pub fn is_open_ended(&self) -> bool {
        self.end_kind == EndDateKind::OpenEnded
    }
}
