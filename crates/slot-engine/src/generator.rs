//! Generate candidate slots from a search range, a busy set, and a profile.
//!
//! Walks the range at a fixed step, forms `[t, t + duration)` candidates, and
//! keeps the ones that clear every buffered busy interval and pass the
//! [`matcher`](crate::matcher). The walk is strictly increasing in time, so the
//! output is already sorted and free of duplicates.

use chrono::Duration;
use chrono_tz::Tz;
use tracing::debug;

use crate::error::{Result, SlotError};
use crate::interval::{merge_intervals, Interval};
use crate::matcher;
use crate::preferences::PreferenceProfile;

/// Step between candidate start times when the caller does not choose one.
pub const DEFAULT_STEP_MINUTES: i64 = 30;

/// A stepped candidate annotated with its feasibility outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotCandidate {
    pub interval: Interval,
    pub available: bool,
}

/// Find every feasible slot of exactly `duration_minutes` inside `range`.
///
/// `busy` may be unsorted and overlapping; it is normalized on an internal copy.
/// A range shorter than the duration yields an empty result, not an error.
///
/// # Errors
/// Returns `SlotError::Validation` if `duration_minutes` or `step_minutes` is not
/// positive or too large to represent as a duration, and `SlotError::InvalidInterval` if `range` or any busy interval has
/// `start >= end`.
pub fn find_slots(
    range: &Interval,
    duration_minutes: i64,
    step_minutes: i64,
    busy: &[Interval],
    profile: &PreferenceProfile,
    tz: Tz,
) -> Result<Vec<Interval>> {
    let candidates =
        evaluate_candidates(range, duration_minutes, step_minutes, busy, profile, tz)?;
    let slots: Vec<Interval> = candidates
        .into_iter()
        .filter(|c| c.available)
        .map(|c| c.interval)
        .collect();

    debug!(accepted = slots.len(), "slot generation finished");
    Ok(slots)
}

/// Evaluate every stepped candidate in `range`, available or not.
///
/// Same contract as [`find_slots`]; useful for explaining why a range came up empty.
pub fn evaluate_candidates(
    range: &Interval,
    duration_minutes: i64,
    step_minutes: i64,
    busy: &[Interval],
    profile: &PreferenceProfile,
    tz: Tz,
) -> Result<Vec<SlotCandidate>> {
    if duration_minutes <= 0 {
        return Err(SlotError::Validation(format!(
            "duration must be positive, got {} minutes",
            duration_minutes
        )));
    }
    if step_minutes <= 0 {
        return Err(SlotError::Validation(format!(
            "step must be positive, got {} minutes",
            step_minutes
        )));
    }
    range.ensure_valid()?;
    for interval in busy {
        interval.ensure_valid()?;
    }

    let duration = Duration::try_minutes(duration_minutes).ok_or_else(|| {
        SlotError::Validation(format!(
            "duration of {} minutes is out of range",
            duration_minutes
        ))
    })?;
    let step = Duration::try_minutes(step_minutes).ok_or_else(|| {
        SlotError::Validation(format!("step of {} minutes is out of range", step_minutes))
    })?;
    let exclusions = exclusion_set(busy, profile);

    debug!(
        busy = busy.len(),
        exclusions = exclusions.len(),
        duration_minutes,
        step_minutes,
        "evaluating slot candidates"
    );

    let mut candidates = Vec::new();
    // Index of the first exclusion that ends after the current candidate starts.
    let mut cursor = 0;
    let mut t = range.start;

    // An end past the representable range cannot fit inside `range` either.
    while let Some(end) = t.checked_add_signed(duration).filter(|end| *end <= range.end) {
        let candidate = Interval { start: t, end };

        while cursor < exclusions.len() && exclusions[cursor].end <= candidate.start {
            cursor += 1;
        }
        let blocked = exclusions
            .get(cursor)
            .is_some_and(|exclusion| exclusion.overlaps(&candidate));

        let available = !blocked && matcher::is_compatible(&candidate, profile, tz)?;
        candidates.push(SlotCandidate {
            interval: candidate,
            available,
        });

        match t.checked_add_signed(step) {
            Some(next) => t = next,
            None => break,
        }
    }

    Ok(candidates)
}

/// Merge the busy set, widen it by the profile's buffers, and merge again.
///
/// The second merge absorbs gaps that the buffers close up. The result is sorted
/// and pairwise disjoint.
pub fn exclusion_set(busy: &[Interval], profile: &PreferenceProfile) -> Vec<Interval> {
    let widened: Vec<Interval> = merge_intervals(busy)
        .iter()
        .map(|b| b.widen(profile.buffer_before(), profile.buffer_after()))
        .collect();
    merge_intervals(&widened)
}
