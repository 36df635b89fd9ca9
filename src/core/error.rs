// Configuration errors
// Fail fast at the boundary instead of silently defaulting

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("missing time zone")]
    MissingTimeZone,

    #[error("missing week start convention")]
    MissingWeekStart,

    #[error("unknown time zone: {0}")]
    UnknownTimeZone(String),

    #[error("invalid available hour range {start}..{end}")]
    InvalidHourRange { start: u8, end: u8 },

    #[error("interval end must be after start ({start} >= {end})")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("invalid recurring interval ({start_minutes}, {end_minutes})")]
    InvalidRecurringInterval {
        start_minutes: i32,
        end_minutes: i32,
    },

    #[error("color must be in hex format (#RRGGBB or #RGB): {0}")]
    InvalidColor(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),
}
