//! Detect busy intervals that collide with a proposed interval.
//!
//! Adjacent intervals (where one ends exactly when another starts) are NOT conflicts.

use serde::Serialize;

use crate::error::Result;
use crate::interval::Interval;

/// A busy interval that overlaps the proposed one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conflict {
    pub busy: Interval,
    pub overlap_minutes: i64,
}

/// Find every busy interval overlapping `proposed`, in input order.
///
/// The overlap duration is `min(a.end, b.end) - max(a.start, b.start)`.
/// Buffers are not applied here; this reports raw collisions only.
pub fn find_conflicts(proposed: &Interval, busy: &[Interval]) -> Result<Vec<Conflict>> {
    proposed.ensure_valid()?;

    let mut conflicts = Vec::new();
    for b in busy {
        b.ensure_valid()?;
        if proposed.overlaps(b) {
            conflicts.push(Conflict {
                busy: *b,
                overlap_minutes: proposed.overlap_minutes(b),
            });
        }
    }

    Ok(conflicts)
}
