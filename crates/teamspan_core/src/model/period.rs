//! Calendar-field period arithmetic.
//!
//! # Responsibility
//! - Represent a civil-calendar difference as a years/months/days triple.
//! - Compute the difference between two dates and normalize accumulated sums.
//!
//! # Invariants
//! - Addition is field-wise and never renormalizes.
//! - `normalized()` only carries between years and months; days stay as-is
//!   because a month has no fixed day length.
//! - `total_months()` is unchanged by normalization.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::ops::{Add, AddAssign};

const MONTHS_PER_YEAR: i64 = 12;

/// Years/months/days triple describing a calendar (not elapsed-time) span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarPeriod {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

impl CalendarPeriod {
    /// Identity element for accumulation.
    pub const ZERO: Self = Self::new(0, 0, 0);

    pub const fn new(years: i32, months: i32, days: i32) -> Self {
        Self {
            years,
            months,
            days,
        }
    }

    /// Calendar difference from `start` to `end`.
    ///
    /// Counts whole years, then whole months, then remaining days. The result
    /// is negative when `end` precedes `start`. Month steps that land past the
    /// end of a shorter month clamp to its last day.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        let mut total_months = proleptic_month(end) - proleptic_month(start);
        let mut days = i64::from(end.day()) - i64::from(start.day());

        if total_months > 0 && days < 0 {
            total_months -= 1;
            // anchor <= end, so the month step cannot leave the date range
            let anchor = u32::try_from(total_months)
                .ok()
                .and_then(|months| start.checked_add_months(Months::new(months)))
                .unwrap_or(end);
            days = (end - anchor).num_days();
        } else if total_months < 0 && days > 0 {
            total_months += 1;
            days -= i64::from(days_in_month(end.year(), end.month()));
        }

        Self::new(
            (total_months / MONTHS_PER_YEAR) as i32,
            (total_months % MONTHS_PER_YEAR) as i32,
            days as i32,
        )
    }

    /// Whole months represented by the years and months fields.
    pub fn total_months(&self) -> i64 {
        i64::from(self.years) * MONTHS_PER_YEAR + i64::from(self.months)
    }

    /// Carries 12 months into a year and borrows across years/months so both
    /// fields share one sign. Days are left untouched.
    pub fn normalized(&self) -> Self {
        let total = self.total_months();
        Self::new(
            (total / MONTHS_PER_YEAR) as i32,
            (total % MONTHS_PER_YEAR) as i32,
            self.days,
        )
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl Add for CalendarPeriod {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(
            self.years + rhs.years,
            self.months + rhs.months,
            self.days + rhs.days,
        )
    }
}

impl AddAssign for CalendarPeriod {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// ISO-8601 period notation, e.g. `P1Y2M3D`; zero renders as `P0D`.
impl Display for CalendarPeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "P0D");
        }
        write!(f, "P")?;
        if self.years != 0 {
            write!(f, "{}Y", self.years)?;
        }
        if self.months != 0 {
            write!(f, "{}M", self.months)?;
        }
        if self.days != 0 {
            write!(f, "{}D", self.days)?;
        }
        Ok(())
    }
}

fn proleptic_month(date: NaiveDate) -> i64 {
    i64::from(date.year()) * MONTHS_PER_YEAR + i64::from(date.month0())
}

/// Number of days in `month` (1-based) of `year`.
pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        2 => 28,
        _ => 31,
    }
}
