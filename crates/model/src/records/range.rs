use serde::{Deserialize, Serialize};
use std::ops::Range;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("Identifiers must be positive, got start {0}")]
    NonPositiveStart(i64),

    #[error("Empty identifier range [{start}, {end})")]
    Empty { start: i64, end: i64 },
}

/// Half-open identifier range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRange {
    pub start: i64,
    pub end: i64,
}

impl IdRange {
    pub fn new(start: i64, end: i64) -> Result<Self, RangeError> {
        if start < 1 {
            return Err(RangeError::NonPositiveStart(start));
        }
        if end <= start {
            return Err(RangeError::Empty { start, end });
        }
        Ok(Self { start, end })
    }

    /// `[1, end)`.
    pub fn up_to(end: i64) -> Result<Self, RangeError> {
        Self::new(1, end)
    }

    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Number of rounds `rounds(size)` yields.
    pub fn round_count(&self, size: usize) -> usize {
        self.len().div_ceil(size.max(1))
    }

    /// Consecutive sub-ranges of at most `size` identifiers; the last may be shorter.
    ///
    /// Lazy: nothing is materialized, whatever the width of the range.
    pub fn rounds(&self, size: usize) -> impl Iterator<Item = Range<i64>> + Send + 'static + use<> {
        let step = size.max(1);
        let width = i64::try_from(step).unwrap_or(i64::MAX);
        let end = self.end;
        (self.start..end)
            .step_by(step)
            .map(move |lo| lo..lo.saturating_add(width).min(end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_partition_range() {
        let range = IdRange::up_to(25).unwrap();
        let rounds: Vec<_> = range.rounds(10).collect();
        assert_eq!(rounds, vec![1..11, 11..21, 21..25]);
        assert_eq!(range.round_count(10), 3);
        assert_eq!(
            rounds.iter().map(|r| r.end - r.start).sum::<i64>(),
            range.len() as i64
        );
    }

    #[test]
    fn test_round_larger_than_range() {
        let range = IdRange::new(3, 5).unwrap();
        assert_eq!(range.rounds(10).collect::<Vec<_>>(), vec![3..5]);
        assert_eq!(range.round_count(10), 1);
    }

    #[test]
    fn test_rounds_at_upper_bound_do_not_overflow() {
        let range = IdRange::new(i64::MAX - 5, i64::MAX).unwrap();
        assert_eq!(
            range.rounds(10).collect::<Vec<_>>(),
            vec![i64::MAX - 5..i64::MAX]
        );
        assert_eq!(
            range.rounds(2).collect::<Vec<_>>(),
            vec![
                i64::MAX - 5..i64::MAX - 3,
                i64::MAX - 3..i64::MAX - 1,
                i64::MAX - 1..i64::MAX,
            ]
        );
        assert_eq!(range.rounds(usize::MAX).count(), 1);
    }

    #[test]
    fn test_rounds_of_huge_range_are_lazy() {
        let range = IdRange::up_to(i64::MAX).unwrap();
        let mut rounds = range.rounds(10);
        assert_eq!(rounds.next(), Some(1..11));
        assert_eq!(rounds.next(), Some(11..21));
        assert_eq!(range.round_count(10), (i64::MAX as usize - 1).div_ceil(10));
    }

    #[test]
    fn test_invalid_ranges() {
        assert_eq!(IdRange::new(0, 5), Err(RangeError::NonPositiveStart(0)));
        assert_eq!(
            IdRange::new(4, 4),
            Err(RangeError::Empty { start: 4, end: 4 })
        );
    }
}
