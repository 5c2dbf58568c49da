//! WASM bindings for slot-engine.
//!
//! Exposes slot generation, the compatibility check, and free-window
//! computation to a JavaScript chat front end via `wasm-bindgen`. All complex
//! values are passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use serde::Serialize;
use slot_engine::request::{parse_busy, parse_instant, BusyInput};
use slot_engine::time_of_day::parse_timezone;
use slot_engine::{Interval, PreferenceSettings, Rejection};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct CompatibilityDto {
    compatible: bool,
    reason: Option<Rejection>,
}

#[derive(Serialize)]
struct FreeWindowDto {
    start: String,
    end: String,
    duration_minutes: i64,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Parse optional preferences JSON; `None` or an empty string means defaults.
fn parse_settings(json: Option<&str>) -> Result<PreferenceSettings, JsValue> {
    match json.map(str::trim).filter(|s| !s.is_empty()) {
        Some(json) => serde_json::from_str(json)
            .map_err(|e| JsValue::from_str(&format!("Invalid preferences JSON: {}", e))),
        None => Ok(PreferenceSettings::default()),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Find available slots for a slot request.
///
/// `request_json` is `{dateRangeStart, dateRangeEnd, durationMinutes?, stepMinutes?,
/// timezone?, preferences?, busy, activity?, priority?}`. `preferences_json` holds
/// the user's stored preferences and is used when the request has none.
/// Returns `{slots: [{start, end, score?}]}` as a JSON string.
#[wasm_bindgen(js_name = "findSlots")]
pub fn find_slots(request_json: &str, preferences_json: Option<String>) -> Result<String, JsValue> {
    let settings = parse_settings(preferences_json.as_deref())?;
    slot_engine::handle_request_json(request_json, &settings).map_err(js_err)
}

/// Check one RFC 3339 interval against the preferences.
///
/// Returns `{compatible, reason}` where `reason` is `null` or one of
/// `weekend`, `before_work_day`, `after_work_day`, `outside_preferred_window`.
#[wasm_bindgen(js_name = "isCompatible")]
pub fn is_compatible(
    start: &str,
    end: &str,
    preferences_json: Option<String>,
    timezone: Option<String>,
) -> Result<String, JsValue> {
    let profile = parse_settings(preferences_json.as_deref())?
        .validate()
        .map_err(js_err)?;
    let tz = match timezone.as_deref() {
        Some(name) => parse_timezone(name).map_err(js_err)?,
        None => profile.timezone(),
    };
    let interval = Interval {
        start: parse_instant(start).map_err(js_err)?,
        end: parse_instant(end).map_err(js_err)?,
    };

    let reason = slot_engine::check_compatibility(&interval, &profile, tz).map_err(js_err)?;
    to_json(&CompatibilityDto {
        compatible: reason.is_none(),
        reason,
    })
}

/// Find free windows between busy intervals.
///
/// `busy_json` must be a JSON array of `{start, end, allDay?}` objects; all-day
/// dates resolve at UTC midnight. Returns a JSON array of
/// `{start, end, duration_minutes}` objects.
#[wasm_bindgen(js_name = "findFreeWindows")]
pub fn find_free_windows(busy_json: &str, range_start: &str, range_end: &str) -> Result<String, JsValue> {
    let inputs: Vec<BusyInput> = serde_json::from_str(busy_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid busy JSON: {}", e)))?;
    let busy = inputs
        .iter()
        .map(|b| parse_busy(b, slot_engine::Tz::UTC))
        .collect::<Result<Vec<_>, _>>()
        .map_err(js_err)?;
    let range = Interval {
        start: parse_instant(range_start).map_err(js_err)?,
        end: parse_instant(range_end).map_err(js_err)?,
    };

    let windows = slot_engine::find_free_windows(&busy, &range).map_err(js_err)?;
    let dtos: Vec<FreeWindowDto> = windows
        .iter()
        .map(|w| FreeWindowDto {
            start: w.start.to_rfc3339(),
            end: w.end.to_rfc3339(),
            duration_minutes: w.duration_minutes,
        })
        .collect();
    to_json(&dtos)
}
