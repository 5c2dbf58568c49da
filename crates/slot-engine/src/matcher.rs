//! Decide whether a single interval satisfies a preference profile.
//!
//! Checks, in order: weekend policy (both endpoints), working hours, and the
//! preferred time-of-day window. All clock times are read in the timezone passed
//! by the caller.

use chrono_tz::Tz;
use serde::Serialize;
use tracing::trace;

use crate::error::Result;
use crate::interval::Interval;
use crate::preferences::PreferenceProfile;
use crate::time_of_day::{is_weekend, minutes_since_local_midnight, TimeOfDay};

/// Why an interval was rejected by [`check_compatibility`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// Start or end falls on a Saturday/Sunday and weekends are disabled.
    Weekend,
    /// Starts before the work day begins.
    BeforeWorkDay,
    /// Ends after the work day ends (including runs past local midnight).
    AfterWorkDay,
    /// Start lies outside the preferred morning/afternoon/evening window.
    OutsidePreferredWindow,
}

/// Return `Ok(true)` if `interval` is compatible with `profile` in `tz`.
///
/// # Errors
/// Returns `SlotError::InvalidInterval` if `interval.start >= interval.end`.
pub fn is_compatible(interval: &Interval, profile: &PreferenceProfile, tz: Tz) -> Result<bool> {
    Ok(check_compatibility(interval, profile, tz)?.is_none())
}

/// Like [`is_compatible`], but reports the first failed rule.
///
/// `Ok(None)` means the interval is accepted.
pub fn check_compatibility(
    interval: &Interval,
    profile: &PreferenceProfile,
    tz: Tz,
) -> Result<Option<Rejection>> {
    interval.ensure_valid()?;

    let rejection = evaluate(interval, profile, tz);
    if let Some(reason) = rejection {
        trace!(start = %interval.start, end = %interval.end, ?reason, "interval rejected");
    }
    Ok(rejection)
}

fn evaluate(interval: &Interval, profile: &PreferenceProfile, tz: Tz) -> Option<Rejection> {
    // An event starting Friday evening may run into Saturday, so both ends count.
    let touches_weekend = is_weekend(interval.start, tz) || is_weekend(interval.end, tz);
    if !profile.work_on_weekends() && touches_weekend {
        return Some(Rejection::Weekend);
    }

    let start_tod = TimeOfDay::of(interval.start, tz);
    // Measured from the start's local midnight so a run past midnight stays large.
    let end_minutes = minutes_since_local_midnight(interval.start, interval.end, tz);

    if start_tod < profile.work_day_start() {
        return Some(Rejection::BeforeWorkDay);
    }
    if end_minutes > i64::from(profile.work_day_end().minutes()) {
        return Some(Rejection::AfterWorkDay);
    }

    if !profile.preferred_time_of_day().contains(start_tod) {
        return Some(Rejection::OutsidePreferredWindow);
    }

    None
}
