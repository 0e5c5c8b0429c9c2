//! Domain model for assignment overlap analysis.
//!
//! # Responsibility
//! - Define the typed records, pair keys and calendar periods shared by the
//!   loader, aggregator and ranking code.
//!
//! # Invariants
//! - Pair keys are canonical: the smaller employee id comes first.
//! - Periods are calendar-field triples, never elapsed durations.

pub mod assignment;
pub mod pair;
pub mod period;
