//! # slot-engine
//!
//! Deterministic availability and slot generation for scheduling assistants.
//!
//! Given a search range, an event duration, a user's busy intervals, and a
//! preference profile, the engine proposes every start time that clears the
//! busy set (with buffers) and respects working hours, weekend policy, and the
//! preferred part of the day. All computation is pure: no I/O, no system clock,
//! no host timezone. Clock-time rules are evaluated in an explicit `chrono-tz`
//! timezone.
//!
//! ## Modules
//!
//! - [`interval`] — Half-open intervals, overlap test, busy-set merging
//! - [`time_of_day`] — `HH:MM` clock times and timezone projection
//! - [`preferences`] — Raw settings and the validated `PreferenceProfile`
//! - [`matcher`] — Does one interval satisfy a profile?
//! - [`generator`] — Stepped slot generation over a range
//! - [`freebusy`] — Free windows between merged busy periods
//! - [`conflict`] — Busy intervals colliding with a proposed interval
//! - [`ranking`] — Activity/priority scoring of generated slots
//! - [`request`] — JSON request/response boundary
//! - [`error`] — Error types

pub mod conflict;
pub mod error;
pub mod freebusy;
pub mod generator;
pub mod interval;
pub mod matcher;
pub mod preferences;
pub mod ranking;
pub mod request;
pub mod time_of_day;

pub use conflict::{find_conflicts, Conflict};
pub use error::SlotError;
pub use freebusy::{find_first_free_window, find_free_windows, FreeWindow};
pub use generator::{evaluate_candidates, find_slots, SlotCandidate, DEFAULT_STEP_MINUTES};
pub use interval::{merge_intervals, Interval};
pub use matcher::{check_compatibility, is_compatible, Rejection};
pub use preferences::{PreferenceProfile, PreferenceSettings, PreferredTimeOfDay};
pub use ranking::{rank_slots, ActivityType, Priority, RankedSlot};
pub use request::{handle_request, handle_request_json, SlotRequest, SlotResponse};
pub use time_of_day::TimeOfDay;

pub use chrono_tz::Tz;
