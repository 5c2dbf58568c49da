//! Order generated slots by how well they suit an activity.
//!
//! Scores are multiplicative: an activity bonus or penalty based on local clock
//! time and weekday, scaled by `priority / 3`. Ties keep chronological order.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::interval::Interval;
use crate::time_of_day::{is_weekend, TimeOfDay};

const BONUS: f64 = 1.5;
const NEUTRAL: f64 = 1.0;
const PENALTY: f64 = 0.8;

const NOON: u16 = 12 * 60;
const WORK_START: u16 = 9 * 60;
const WORK_END: u16 = 17 * 60;

/// Kind of event being scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    /// Favors 09:00–17:00.
    #[default]
    Work,
    /// Favors mornings.
    Exercise,
    /// Favors evenings and weekends.
    Personal,
}

/// Importance of the event, `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub fn new(value: u8) -> Result<Self> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SlotError::Validation(format!(
                "priority must be between 1 and 5, got {}",
                value
            )))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for Priority {
    type Error = SlotError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(value: Priority) -> Self {
        value.0
    }
}

/// A slot paired with its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSlot {
    pub interval: Interval,
    pub score: f64,
}

/// Score a single slot for `activity` in `tz`.
pub fn score_slot(slot: &Interval, activity: ActivityType, priority: Priority, tz: Tz) -> f64 {
    let start = TimeOfDay::of(slot.start, tz).minutes();

    let base = match activity {
        ActivityType::Work => {
            if (WORK_START..WORK_END).contains(&start) {
                BONUS
            } else {
                PENALTY
            }
        }
        ActivityType::Exercise => {
            if start < NOON {
                BONUS
            } else {
                NEUTRAL
            }
        }
        ActivityType::Personal => {
            if start >= WORK_END || is_weekend(slot.start, tz) {
                BONUS
            } else {
                NEUTRAL
            }
        }
    };

    base * f64::from(priority.get()) / 3.0
}

/// Score every slot and sort best-first.
///
/// The sort is stable, so slots with equal scores stay in the order given
/// (chronological when fed straight from the generator).
pub fn rank_slots(
    slots: &[Interval],
    activity: ActivityType,
    priority: Priority,
    tz: Tz,
) -> Vec<RankedSlot> {
    let mut ranked: Vec<RankedSlot> = slots
        .iter()
        .map(|slot| RankedSlot {
            interval: *slot,
            score: score_slot(slot, activity, priority, tz),
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}
