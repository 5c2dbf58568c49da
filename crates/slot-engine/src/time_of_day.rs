//! Clock-time arithmetic in an explicit timezone.
//!
//! Instants are stored in UTC; every projection onto a local calendar day takes
//! the timezone as an argument so results never depend on the host machine.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Minutes since local midnight, `0..=1439`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Crate-internal constructor for known-good constants.
    pub(crate) const fn at(hour: u16, minute: u16) -> Self {
        Self(hour * 60 + minute)
    }

    pub fn from_minutes(minutes: u16) -> Result<Self> {
        if minutes < MINUTES_PER_DAY {
            Ok(Self(minutes))
        } else {
            Err(SlotError::Validation(format!(
                "time of day must be below {} minutes, got {}",
                MINUTES_PER_DAY, minutes
            )))
        }
    }

    pub fn from_hm(hour: u16, minute: u16) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(SlotError::Validation(format!(
                "time of day out of range: {:02}:{:02}",
                hour, minute
            )));
        }
        Ok(Self(hour * 60 + minute))
    }

    /// Project `instant` onto its local calendar day in `tz`.
    pub fn of(instant: DateTime<Utc>, tz: Tz) -> Self {
        let local = instant.with_timezone(&tz);
        // hour() <= 23 and minute() <= 59, so this stays below MINUTES_PER_DAY.
        Self((local.hour() * 60 + local.minute()) as u16)
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = SlotError;

    /// Parse a strict `HH:MM` string in `00:00..=23:59`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SlotError::Validation(format!("expected HH:MM, got '{}'", s));

        let (hh, mm) = s.split_once(':').ok_or_else(invalid)?;
        if hh.len() != 2 || mm.len() != 2 {
            return Err(invalid());
        }
        if !hh.bytes().chain(mm.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let hour: u16 = hh.parse().map_err(|_| invalid())?;
        let minute: u16 = mm.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = SlotError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// Minutes from the local midnight that begins `anchor`'s day to `instant`.
///
/// Exceeds 1439 when `instant` lies on a later local day than `anchor`.
pub fn minutes_since_local_midnight(anchor: DateTime<Utc>, instant: DateTime<Utc>, tz: Tz) -> i64 {
    let day_start = anchor.with_timezone(&tz).date_naive().and_hms_opt(0, 0, 0);
    let local = instant.with_timezone(&tz).naive_local();
    match day_start {
        Some(midnight) => (local - midnight).num_minutes(),
        None => i64::from(TimeOfDay::of(instant, tz).minutes()),
    }
}

/// The weekday of `instant` on its local calendar in `tz`.
pub fn local_weekday(instant: DateTime<Utc>, tz: Tz) -> Weekday {
    instant.with_timezone(&tz).weekday()
}

pub fn is_weekend(instant: DateTime<Utc>, tz: Tz) -> bool {
    matches!(local_weekday(instant, tz), Weekday::Sat | Weekday::Sun)
}

/// Resolve an IANA timezone name such as `"America/New_York"`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| SlotError::InvalidTimezone(name.to_string()))
}
