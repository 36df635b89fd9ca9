// Week computation
// Builds the 7-day span around any date, honoring the configured week start.

use chrono::{DateTime, Datelike, Days, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::models::config::WeekStartsOn;
use crate::utils::date::local_datetime;

/// One visible day of a week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayInfo {
    /// Local noon of the day. Noon-anchored so day arithmetic survives
    /// daylight-saving transitions.
    pub date: DateTime<Utc>,
    /// Full weekday name, e.g. "Tuesday"
    pub name: String,
    /// Abbreviated weekday name, e.g. "Tue"
    pub abbreviated: String,
}

/// A computed week: always exactly 7 contiguous days consistent with the
/// configured week start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Week {
    /// Human display string, e.g. "Apr 8 – 14"
    pub interval: String,
    pub days: [DayInfo; 7],
    /// Midnight of the first day
    pub start: DateTime<Utc>,
    /// Midnight of the day after the last day
    pub end: DateTime<Utc>,
}

/// Compute the week containing `at` in `tz`.
///
/// With Monday-started weeks a Sunday date is treated as the tail of the
/// previous week, not the head of the next one.
pub fn week_at(week_starts_on: WeekStartsOn, at: DateTime<Utc>, tz: Tz) -> Week {
    let local = at.with_timezone(&tz);
    let mut date = local.date_naive();

    if week_starts_on == WeekStartsOn::Monday && date.weekday() == Weekday::Sun {
        // Sunday belongs to the Monday-started week that began six days ago.
        date = date - Days::new(1);
    }

    let back = week_starts_on.days_from_week_start(date.weekday());
    let first = date - Days::new(u64::from(back));

    let days: [DayInfo; 7] = std::array::from_fn(|i| {
        let day = first + Days::new(i as u64);
        DayInfo {
            date: local_datetime(tz, day.and_hms_opt(12, 0, 0).unwrap_or_default()),
            name: day.format("%A").to_string(),
            abbreviated: day.format("%a").to_string(),
        }
    });

    let start = local_datetime(tz, first.and_hms_opt(0, 0, 0).unwrap_or_default());
    let end = local_datetime(
        tz,
        (first + Days::new(7)).and_hms_opt(0, 0, 0).unwrap_or_default(),
    );

    Week {
        interval: date_interval_string(days[0].date, days[6].date, tz),
        days,
        start,
        end,
    }
}

/// Display string for a date span: "Apr 8 – 14" within one month, otherwise
/// "Apr 29 – May 5".
pub fn date_interval_string(from: DateTime<Utc>, to: DateTime<Utc>, tz: Tz) -> String {
    let from = from.with_timezone(&tz);
    let to = to.with_timezone(&tz);
    if from.month() == to.month() {
        format!("{} – {}", from.format("%b %-d"), to.format("%-d"))
    } else {
        format!("{} – {}", from.format("%b %-d"), to.format("%b %-d"))
    }
}
