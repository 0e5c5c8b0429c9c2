//! Human-readable rendering of analysis results.
//!
//! # Responsibility
//! - Render the winning pair and its period as a sentence.
//! - Render the fixed "no pairs" sentence and ranked listings.

use crate::model::period::CalendarPeriod;
use crate::rank::PairOverlap;

/// Printed when no two distinct employees ever overlapped on a project.
pub const NO_PAIRS_MESSAGE: &str =
    "There are no employees that have been working together on the same project at the same time.";

/// Spells out a period, e.g. `1 year, 2 months and 3 days`.
///
/// Zero units are omitted; an all-zero period renders as `0 days`.
pub fn format_period(period: CalendarPeriod) -> String {
    let units = [
        (period.years, "year", "years"),
        (period.months, "month", "months"),
        (period.days, "day", "days"),
    ];
    let parts: Vec<String> = units
        .iter()
        .filter(|(value, _, _)| *value != 0)
        .map(|(value, singular, plural)| {
            let word = if *value == 1 { singular } else { plural };
            format!("{value} {word}")
        })
        .collect();

    match parts.split_last() {
        None => "0 days".to_string(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {last}", rest.join(", ")),
    }
}

/// Sentence announcing the best pair, or the no-pairs sentence.
pub fn render_best(best: Option<&PairOverlap>) -> String {
    match best {
        Some(entry) => format!(
            "Employees with IDs {} have been working together for the longest time: {}.",
            entry.pair,
            format_period(entry.period)
        ),
        None => NO_PAIRS_MESSAGE.to_string(),
    }
}

/// Numbered listing, one pair per line, longest first.
pub fn render_ranking(entries: &[PairOverlap]) -> String {
    if entries.is_empty() {
        return NO_PAIRS_MESSAGE.to_string();
    }
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            format!(
                "{}. {}: {}",
                index + 1,
                entry.pair,
                format_period(entry.period)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
