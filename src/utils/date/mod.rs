// Date utility functions
// Zone-aware helpers shared by the core engine

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Resolve a wall-clock time in `tz` to an absolute instant.
///
/// Spring-forward gaps are resolved by trying the following hour; ambiguous
/// times (fall-back) take the earlier instant.
pub fn local_datetime(tz: Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => {
            let shifted = naive + Duration::hours(1);
            match tz.from_local_datetime(&shifted) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
                    dt.with_timezone(&Utc)
                }
                LocalResult::None => Utc.from_utc_datetime(&naive),
            }
        }
    }
}

/// Midnight-to-midnight bounds of the calendar day containing `date` in `tz`.
pub fn day_bounds(date: DateTime<Utc>, tz: Tz) -> (DateTime<Utc>, DateTime<Utc>) {
    let day = date.with_timezone(&tz).date_naive();
    let start = local_datetime(tz, day.and_hms_opt(0, 0, 0).unwrap_or_default());
    let next = day + chrono::Days::new(1);
    let end = local_datetime(tz, next.and_hms_opt(0, 0, 0).unwrap_or_default());
    (start, end)
}
