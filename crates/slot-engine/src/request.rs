//! The caller-facing request/response shape.
//!
//! A chat front end sends `{dateRangeStart, dateRangeEnd, durationMinutes?,
//! preferences?, busy}` and receives `{slots: [{start, end}, ...]}`. Every
//! timestamp crossing this boundary is ISO 8601 with an explicit offset or `Z`;
//! naive local timestamps are rejected rather than guessed.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SlotError};
use crate::generator::{find_slots, DEFAULT_STEP_MINUTES};
use crate::interval::Interval;
use crate::preferences::PreferenceSettings;
use crate::ranking::{rank_slots, ActivityType, Priority};
use crate::time_of_day::parse_timezone;

/// A busy period as supplied by the calendar provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusyInput {
    pub start: String,
    pub end: String,
    /// When set, `start`/`end` may be plain `YYYY-MM-DD` dates; `end` is exclusive.
    #[serde(default)]
    pub all_day: bool,
}

/// A slot-finding request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRequest {
    pub date_range_start: String,
    pub date_range_end: String,
    /// Falls back to the profile's preferred duration.
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    /// Falls back to [`DEFAULT_STEP_MINUTES`].
    #[serde(default)]
    pub step_minutes: Option<i64>,
    /// IANA name used for clock-time rules and output formatting.
    /// Falls back to the profile's timezone.
    #[serde(default)]
    pub timezone: Option<String>,
    /// Overrides the caller's stored preferences for this request.
    #[serde(default)]
    pub preferences: Option<PreferenceSettings>,
    #[serde(default)]
    pub busy: Vec<BusyInput>,
    /// When present, slots are returned best-first instead of chronologically.
    #[serde(default)]
    pub activity: Option<ActivityType>,
    #[serde(default)]
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotDto {
    pub start: String,
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotResponse {
    pub slots: Vec<SlotDto>,
}

/// Parse an RFC 3339 timestamp that carries an explicit offset or `Z`.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            SlotError::InvalidDatetime(format!(
                "'{}' must be ISO 8601 with an explicit offset or Z: {}",
                s, e
            ))
        })
}

/// Convert a busy input into an interval, resolving all-day dates in `tz`.
pub fn parse_busy(input: &BusyInput, tz: Tz) -> Result<Interval> {
    let (start, end) = if input.all_day {
        (
            parse_all_day_boundary(&input.start, tz)?,
            parse_all_day_boundary(&input.end, tz)?,
        )
    } else {
        (parse_instant(&input.start)?, parse_instant(&input.end)?)
    };
    Interval::new(start, end)
}

fn parse_all_day_boundary(s: &str, tz: Tz) -> Result<DateTime<Utc>> {
    let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") else {
        return parse_instant(s);
    };
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| SlotError::InvalidDatetime(s.to_string()))?;
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            SlotError::InvalidDatetime(format!("'{}' has no midnight in {}", s, tz.name()))
        })
}

/// Answer a slot request.
///
/// `stored` is used when the request carries no `preferences` of its own.
pub fn handle_request(request: &SlotRequest, stored: &PreferenceSettings) -> Result<SlotResponse> {
    let profile = request.preferences.as_ref().unwrap_or(stored).validate()?;
    let tz = match request.timezone.as_deref() {
        Some(name) => parse_timezone(name)?,
        None => profile.timezone(),
    };

    let range = Interval {
        start: parse_instant(&request.date_range_start)?,
        end: parse_instant(&request.date_range_end)?,
    };
    let busy = request
        .busy
        .iter()
        .map(|b| parse_busy(b, tz))
        .collect::<Result<Vec<_>>>()?;

    let duration = request
        .duration_minutes
        .unwrap_or_else(|| profile.preferred_duration());
    let step = request.step_minutes.unwrap_or(DEFAULT_STEP_MINUTES);

    let slots = find_slots(&range, duration, step, &busy, &profile, tz)?;
    debug!(slots = slots.len(), timezone = tz.name(), "slot request answered");

    let render = |dt: DateTime<Utc>| dt.with_timezone(&tz).to_rfc3339();
    let slots = match request.activity {
        Some(activity) => {
            let priority = request.priority.unwrap_or_default();
            rank_slots(&slots, activity, priority, tz)
                .into_iter()
                .map(|ranked| SlotDto {
                    start: render(ranked.interval.start),
                    end: render(ranked.interval.end),
                    score: Some(ranked.score),
                })
                .collect()
        }
        None => slots
            .iter()
            .map(|slot| SlotDto {
                start: render(slot.start),
                end: render(slot.end),
                score: None,
            })
            .collect(),
    };

    Ok(SlotResponse { slots })
}

/// JSON-in, JSON-out wrapper around [`handle_request`].
pub fn handle_request_json(json: &str, stored: &PreferenceSettings) -> Result<String> {
    let request: SlotRequest = serde_json::from_str(json)?;
    let response = handle_request(&request, stored)?;
    Ok(serde_json::to_string(&response)?)
}
