use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::InvalidArgument;

/// Whether a single-element range (`from == to`) is accepted as input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangePolicy {
    /// `from < to` is required
    #[default]
    Strict,
    /// `from <= to` is required
    Inclusive,
}

impl RangePolicy {
    /// Check a range against this policy
    pub fn check(self, range: Range) -> Result<(), InvalidArgument> {
        match self {
            RangePolicy::Strict if range.from == range.to => Err(InvalidArgument::BoundsNotIncreasing {
                from: range.from,
                to: range.to,
            }),
            _ => Ok(()),
        }
    }
}

/// Inclusive integer interval `[from, to]` with `from <= to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    from: i64,
    to: i64,
}

impl Range {
    pub fn new(from: i64, to: i64) -> Result<Self, InvalidArgument> {
        if from > to {
            return Err(InvalidArgument::BoundsReversed { from, to });
        }
        Ok(Self { from, to })
    }

    pub fn from(&self) -> i64 {
        self.from
    }

    pub fn to(&self) -> i64 {
        self.to
    }

    /// Distance between the bounds (`to - from`), the quantity compared against the threshold
    pub fn span(&self) -> u64 {
        self.to.abs_diff(self.from)
    }

    /// Split at `floor((from + to) / 2)` into `[from, mid]` and `[mid + 1, to]`
    ///
    /// The left half receives the extra element when the length is odd.
    /// Callers must only split ranges with `span() >= 1`.
    pub fn split(&self) -> (Range, Range) {
        let mid = (i128::from(self.from) + i128::from(self.to)).div_euclid(2) as i64;
        (
            Range { from: self.from, to: mid },
            Range { from: mid + 1, to: self.to },
        )
    }

    /// Sum every integer in the range one by one
    pub fn sequential_sum(&self) -> i128 {
        (self.from..=self.to).map(i128::from).sum()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reversed_bounds_rejected() {
        assert_eq!(
            Range::new(10, 1),
            Err(InvalidArgument::BoundsReversed { from: 10, to: 1 })
        );
    }

    #[test]
    fn test_split_gives_left_half_the_extra_element() {
        let (left, right) = Range::new(1, 9).unwrap().split();
        assert_eq!(left, Range::new(1, 5).unwrap());
        assert_eq!(right, Range::new(6, 9).unwrap());

        let (left, right) = Range::new(1, 10).unwrap().split();
        assert_eq!(left, Range::new(1, 5).unwrap());
        assert_eq!(right, Range::new(6, 10).unwrap());
    }

    #[test]
    fn test_split_floors_negative_midpoints() {
        // (-4 + 1) / 2 = -1.5, floored to -2
        let (left, right) = Range::new(-4, 1).unwrap().split();
        assert_eq!(left, Range::new(-4, -2).unwrap());
        assert_eq!(right, Range::new(-1, 1).unwrap());
    }

    #[test]
    fn test_split_at_extreme_bounds() {
        let (left, right) = Range::new(i64::MAX - 1, i64::MAX).unwrap().split();
        assert_eq!(left.to(), i64::MAX - 1);
        assert_eq!(right.from(), i64::MAX);
    }

    #[test]
    fn test_span_covers_full_i64_range() {
        let range = Range::new(i64::MIN, i64::MAX).unwrap();
        assert_eq!(range.span(), u64::MAX);
        assert_eq!(Range::new(3, 3).unwrap().span(), 0);
    }

    #[test]
    fn test_sequential_sum() {
        assert_eq!(Range::new(1, 10).unwrap().sequential_sum(), 55);
        assert_eq!(Range::new(-3, 3).unwrap().sequential_sum(), 0);
        assert_eq!(Range::new(5, 5).unwrap().sequential_sum(), 5);
    }

    #[test]
    fn test_policy_check() {
        let single = Range::new(5, 5).unwrap();
        assert!(matches!(
            RangePolicy::Strict.check(single),
            Err(InvalidArgument::BoundsNotIncreasing { from: 5, to: 5 })
        ));
        assert!(RangePolicy::Inclusive.check(single).is_ok());
        assert!(RangePolicy::Strict.check(Range::new(4, 5).unwrap()).is_ok());
    }
}
