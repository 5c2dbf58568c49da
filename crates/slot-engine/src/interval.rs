//! Half-open time intervals and busy-set normalization.
//!
//! Every interval is `[start, end)`: an interval ending exactly when another
//! begins does NOT overlap it. All comparisons happen in UTC.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// A half-open `[start, end)` range of instants.
///
/// Used for busy periods, candidate slots, and search ranges alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Build an interval, rejecting `start >= end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        let interval = Self { start, end };
        interval.ensure_valid()?;
        Ok(interval)
    }

    /// Build an interval of `minutes` length beginning at `start`.
    pub fn starting_at(start: DateTime<Utc>, minutes: i64) -> Result<Self> {
        let end = Duration::try_minutes(minutes)
            .and_then(|length| start.checked_add_signed(length))
            .ok_or_else(|| {
                SlotError::Validation(format!(
                    "{} minutes from {} is out of range",
                    minutes,
                    start.to_rfc3339()
                ))
            })?;
        Self::new(start, end)
    }

    /// Fail with [`SlotError::InvalidInterval`] unless `start < end`.
    ///
    /// Fields are public, so consumers re-check hand-built values.
    pub fn ensure_valid(&self) -> Result<()> {
        if self.start < self.end {
            Ok(())
        } else {
            Err(SlotError::InvalidInterval {
                start: self.start,
                end: self.end,
            })
        }
    }

    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Minutes shared with `other`, or 0 when they do not overlap.
    pub fn overlap_minutes(&self, other: &Interval) -> i64 {
        if !self.overlaps(other) {
            return 0;
        }
        (self.end.min(other.end) - self.start.max(other.start)).num_minutes()
    }

    /// Extend the interval by `before` minutes at the start and `after` at the end.
    ///
    /// Saturates at the bounds of `DateTime<Utc>`.
    pub fn widen(&self, before: u32, after: u32) -> Interval {
        let start = self
            .start
            .checked_sub_signed(Duration::minutes(i64::from(before)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let end = self
            .end
            .checked_add_signed(Duration::minutes(i64::from(after)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Interval { start, end }
    }

    /// Clip to `window`, or `None` when nothing of `self` lies inside it.
    pub fn clip_to(&self, window: &Interval) -> Option<Interval> {
        if !self.overlaps(window) {
            return None;
        }
        Some(Interval {
            start: self.start.max(window.start),
            end: self.end.min(window.end),
        })
    }
}

/// Sort by start and merge overlapping or touching intervals.
///
/// Works on an owned copy; the caller's slice is left untouched. The output is
/// sorted, pairwise disjoint, and separated by non-empty gaps.
pub fn merge_intervals(intervals: &[Interval]) -> Vec<Interval> {
    let mut sorted: Vec<Interval> = intervals.to_vec();
    // Sort by start time (then by end time for stability).
    sorted.sort_by_key(|i| (i.start, i.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        if let Some(last) = merged.last_mut() {
            if interval.start <= last.end {
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}
