// Interval module
// Selection intervals in absolute and recurring (minutes-since-week-start) form

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;

/// Minutes in one canonical week.
pub const MINUTES_PER_WEEK: i32 = 7 * 24 * 60;

/// A half-open availability interval `[start, end)` in absolute time.
///
/// The 30-minute minimum only applies to intervals created or resized through
/// the interaction engine; externally supplied intervals are accepted as long
/// as `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    /// Create an interval, rejecting `end <= start` at the boundary.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ConfigError> {
        if end <= start {
            return Err(ConfigError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// True iff `instant` falls inside `[start, end)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && self.end > instant
    }
}

/// A week-agnostic interval as minute offsets from the configured week start.
///
/// `start_minutes` lies in `[0, MINUTES_PER_WEEK)`; `end_minutes` may exceed
/// the week boundary for an interval crossing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringInterval {
    pub start_minutes: i32,
    pub end_minutes: i32,
}

impl RecurringInterval {
    pub fn new(start_minutes: i32, end_minutes: i32) -> Result<Self, ConfigError> {
        if !(0..MINUTES_PER_WEEK).contains(&start_minutes) || end_minutes <= start_minutes {
            return Err(ConfigError::InvalidRecurringInterval {
                start_minutes,
                end_minutes,
            });
        }
        Ok(Self {
            start_minutes,
            end_minutes,
        })
    }
}

/// A committed selection as handed to the public change callback: absolute in
/// date-specific mode, minute offsets in recurring mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    Absolute(TimeInterval),
    Recurring(RecurringInterval),
}
