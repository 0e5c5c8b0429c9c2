//! Canonical employee pair key.

use crate::model::assignment::EmployeeId;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Unordered pair of two distinct employees, stored smaller id first.
///
/// `(a, b)` and `(b, a)` always produce the same key, so contributions found
/// in any order or project accumulate into one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PairKey {
    low: EmployeeId,
    high: EmployeeId,
}

impl PairKey {
    /// Returns `None` when both ids are the same employee.
    pub fn new(first: EmployeeId, second: EmployeeId) -> Option<Self> {
        match first.cmp(&second) {
            std::cmp::Ordering::Less => Some(Self {
                low: first,
                high: second,
            }),
            std::cmp::Ordering::Greater => Some(Self {
                low: second,
                high: first,
            }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn low(&self) -> EmployeeId {
        self.low
    }

    pub fn high(&self) -> EmployeeId {
        self.high
    }
}

impl Display for PairKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} & {}", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::PairKey;

    #[test]
    fn new_orders_ids_ascending() {
        let forward = PairKey::new(7, 3).expect("distinct ids form a pair");
        let backward = PairKey::new(3, 7).expect("distinct ids form a pair");

        assert_eq!(forward, backward);
        assert_eq!(forward.low(), 3);
        assert_eq!(forward.high(), 7);
        assert_eq!(forward.to_string(), "3 & 7");
    }

    #[test]
    fn new_rejects_self_pair() {
        assert_eq!(PairKey::new(42, 42), None);
    }

    #[test]
    fn ordering_is_numeric_not_lexicographic() {
        let key = PairKey::new(10, 9).expect("distinct ids form a pair");
        assert_eq!(key.to_string(), "9 & 10");
        assert_eq!((key.low(), key.high()), (9, 10));
    }
}
