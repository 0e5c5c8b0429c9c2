//! Date interval helpers used by overlap detection.
//!
//! # Invariants
//! - Overlap is strict: intervals touching only at an endpoint do not overlap.
//! - An intersection is only produced when its start precedes its end.

use crate::model::period::CalendarPeriod;
use chrono::NaiveDate;

/// Returns the later of two dates.
pub fn later_of(first: NaiveDate, second: NaiveDate) -> NaiveDate {
    if first > second {
        first
    } else {
        second
    }
}

/// Returns the earlier of two dates.
pub fn earlier_of(first: NaiveDate, second: NaiveDate) -> NaiveDate {
    if first < second {
        first
    } else {
        second
    }
}

/// Half-open-like date range `[start, end]` with strict overlap semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// True when the interval has no positive length.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Shared part of two intervals, or `None` when they do not overlap.
    ///
    /// A reversed interval can pass the endpoint test against a wide
    /// neighbour; the emptiness check keeps it from producing a negative span.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        let shared = Self::new(
            later_of(self.start, other.start),
            earlier_of(self.end, other.end),
        );
        (!shared.is_empty()).then_some(shared)
    }

    pub fn period(&self) -> CalendarPeriod {
        CalendarPeriod::between(self.start, self.end)
    }
}
