//! Scheduling preference profiles.
//!
//! [`PreferenceSettings`] is the raw, serde-friendly form loaded from a TOML
//! file or embedded in a JSON request. [`PreferenceSettings::validate`] is the
//! only way to obtain a [`PreferenceProfile`], so every profile the matcher and
//! generator see already satisfies the `HH:MM` and work-day invariants.

use std::path::Path;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::time_of_day::{parse_timezone, TimeOfDay};

/// Preferred part of the day for a new event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredTimeOfDay {
    /// `[00:00, 12:00)`
    Morning,
    /// `[12:00, 17:00)`
    Afternoon,
    /// `[17:00, 24:00)`
    Evening,
    #[default]
    #[serde(alias = "no preference", alias = "none")]
    NoPreference,
}

impl PreferredTimeOfDay {
    /// Fixed `[lower, upper)` window in minutes since midnight, `None` for no preference.
    pub fn window(self) -> Option<(u16, u16)> {
        match self {
            PreferredTimeOfDay::Morning => Some((0, 720)),
            PreferredTimeOfDay::Afternoon => Some((720, 1020)),
            PreferredTimeOfDay::Evening => Some((1020, 1440)),
            PreferredTimeOfDay::NoPreference => None,
        }
    }

    /// Lower bound inclusive, upper bound exclusive.
    pub fn contains(self, tod: TimeOfDay) -> bool {
        match self.window() {
            Some((lower, upper)) => lower <= tod.minutes() && tod.minutes() < upper,
            None => true,
        }
    }
}

/// Unvalidated preference fields, as stored by the settings form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceSettings {
    #[serde(alias = "workDayStart")]
    pub work_day_start: String,
    #[serde(alias = "workDayEnd")]
    pub work_day_end: String,
    /// Validated but not applied to filtering.
    #[serde(alias = "sleepTime")]
    pub sleep_time: String,
    /// Validated but not applied to filtering.
    #[serde(alias = "wakeTime")]
    pub wake_time: String,
    /// Minutes used when a request carries no duration.
    #[serde(alias = "preferredDuration")]
    pub preferred_duration: u32,
    #[serde(alias = "bufferBefore")]
    pub buffer_before: u32,
    #[serde(alias = "bufferAfter")]
    pub buffer_after: u32,
    #[serde(alias = "preferredTimeOfDay")]
    pub preferred_time_of_day: PreferredTimeOfDay,
    #[serde(alias = "workOnWeekends")]
    pub work_on_weekends: bool,
    /// IANA name of the user's home timezone.
    pub timezone: String,
}

impl Default for PreferenceSettings {
    fn default() -> Self {
        Self {
            work_day_start: "09:00".to_string(),
            work_day_end: "17:00".to_string(),
            sleep_time: "23:00".to_string(),
            wake_time: "07:00".to_string(),
            preferred_duration: 60,
            buffer_before: 0,
            buffer_after: 0,
            preferred_time_of_day: PreferredTimeOfDay::NoPreference,
            work_on_weekends: false,
            timezone: "UTC".to_string(),
        }
    }
}

impl PreferenceSettings {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| SlotError::Config(e.to_string()))
    }

    /// Load settings from a TOML file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SlotError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Check every field and produce an immutable [`PreferenceProfile`].
    ///
    /// # Errors
    /// Returns `SlotError::Validation` for unparsable `HH:MM` values,
    /// `work_day_start >= work_day_end`, or a zero `preferred_duration`.
    /// Returns `SlotError::InvalidTimezone` for an unknown IANA name.
    pub fn validate(&self) -> Result<PreferenceProfile> {
        let field = |name: &str, value: &str| -> Result<TimeOfDay> {
            value
                .parse::<TimeOfDay>()
                .map_err(|e| SlotError::Validation(format!("{}: {}", name, e)))
        };

        let work_day_start = field("work_day_start", &self.work_day_start)?;
        let work_day_end = field("work_day_end", &self.work_day_end)?;
        let sleep_time = field("sleep_time", &self.sleep_time)?;
        let wake_time = field("wake_time", &self.wake_time)?;

        if work_day_start >= work_day_end {
            return Err(SlotError::Validation(format!(
                "work day start {} must be before work day end {}",
                work_day_start, work_day_end
            )));
        }
        if self.preferred_duration == 0 {
            return Err(SlotError::Validation(
                "preferred_duration must be positive".to_string(),
            ));
        }

        Ok(PreferenceProfile {
            work_day_start,
            work_day_end,
            sleep_time,
            wake_time,
            preferred_duration: i64::from(self.preferred_duration),
            buffer_before: self.buffer_before,
            buffer_after: self.buffer_after,
            preferred_time_of_day: self.preferred_time_of_day,
            work_on_weekends: self.work_on_weekends,
            timezone: parse_timezone(&self.timezone)?,
        })
    }
}

impl From<&PreferenceProfile> for PreferenceSettings {
    fn from(profile: &PreferenceProfile) -> Self {
        Self {
            work_day_start: profile.work_day_start.to_string(),
            work_day_end: profile.work_day_end.to_string(),
            sleep_time: profile.sleep_time.to_string(),
            wake_time: profile.wake_time.to_string(),
            // Validated profiles always carry a positive duration that came from a u32.
            preferred_duration: u32::try_from(profile.preferred_duration).unwrap_or(u32::MAX),
            buffer_before: profile.buffer_before,
            buffer_after: profile.buffer_after,
            preferred_time_of_day: profile.preferred_time_of_day,
            work_on_weekends: profile.work_on_weekends,
            timezone: profile.timezone.name().to_string(),
        }
    }
}

/// A validated, read-only preference profile.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceProfile {
    work_day_start: TimeOfDay,
    work_day_end: TimeOfDay,
    sleep_time: TimeOfDay,
    wake_time: TimeOfDay,
    preferred_duration: i64,
    buffer_before: u32,
    buffer_after: u32,
    preferred_time_of_day: PreferredTimeOfDay,
    work_on_weekends: bool,
    timezone: Tz,
}

impl PreferenceProfile {
    pub fn work_day_start(&self) -> TimeOfDay {
        self.work_day_start
    }

    pub fn work_day_end(&self) -> TimeOfDay {
        self.work_day_end
    }

    pub fn sleep_time(&self) -> TimeOfDay {
        self.sleep_time
    }

    pub fn wake_time(&self) -> TimeOfDay {
        self.wake_time
    }

    /// Default event length in minutes.
    pub fn preferred_duration(&self) -> i64 {
        self.preferred_duration
    }

    pub fn buffer_before(&self) -> u32 {
        self.buffer_before
    }

    pub fn buffer_after(&self) -> u32 {
        self.buffer_after
    }

    pub fn preferred_time_of_day(&self) -> PreferredTimeOfDay {
        self.preferred_time_of_day
    }

    pub fn work_on_weekends(&self) -> bool {
        self.work_on_weekends
    }

    /// The user's home timezone, used when a request does not name one.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }
}

impl Default for PreferenceProfile {
    fn default() -> Self {
        Self {
            work_day_start: TimeOfDay::at(9, 0),
            work_day_end: TimeOfDay::at(17, 0),
            sleep_time: TimeOfDay::at(23, 0),
            wake_time: TimeOfDay::at(7, 0),
            preferred_duration: 60,
            buffer_before: 0,
            buffer_after: 0,
            preferred_time_of_day: PreferredTimeOfDay::NoPreference,
            work_on_weekends: false,
            timezone: Tz::UTC,
        }
    }
}
