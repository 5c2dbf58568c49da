//! Compute free windows from a busy set.
//!
//! Clips busy intervals to the search range, merges overlapping busy periods,
//! then returns the gaps between merged periods.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::interval::{merge_intervals, Interval};

/// A maximal gap between busy periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

impl FreeWindow {
    fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            duration_minutes: (end - start).num_minutes(),
        }
    }
}

/// Merge busy periods clipped to `range`.
///
/// Returns a sorted, non-overlapping list; busy intervals entirely outside the
/// range are discarded.
pub fn merge_busy_periods(busy: &[Interval], range: &Interval) -> Vec<Interval> {
    let clipped: Vec<Interval> = busy.iter().filter_map(|b| b.clip_to(range)).collect();
    merge_intervals(&clipped)
}

/// Find the free windows inside `range` left over by `busy`.
///
/// Busy intervals may overlap; they are merged before computing gaps.
/// Returns windows sorted by start time.
///
/// # Errors
/// Returns `SlotError::InvalidInterval` if `range` or any busy interval is inverted.
pub fn find_free_windows(busy: &[Interval], range: &Interval) -> Result<Vec<FreeWindow>> {
    range.ensure_valid()?;
    for interval in busy {
        interval.ensure_valid()?;
    }

    let merged = merge_busy_periods(busy, range);

    let mut free = Vec::new();
    let mut cursor = range.start;

    for period in &merged {
        if cursor < period.start {
            free.push(FreeWindow::between(cursor, period.start));
        }
        cursor = cursor.max(period.end);
    }

    // Trailing free window after the last busy period.
    if cursor < range.end {
        free.push(FreeWindow::between(cursor, range.end));
    }

    Ok(free)
}

/// Find the first free window of at least `min_duration_minutes` inside `range`.
pub fn find_first_free_window(
    busy: &[Interval],
    range: &Interval,
    min_duration_minutes: i64,
) -> Result<Option<FreeWindow>> {
    Ok(find_free_windows(busy, range)?
        .into_iter()
        .find(|window| window.duration_minutes >= min_duration_minutes))
}
