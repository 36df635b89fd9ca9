// Recurring normalization
// Folds absolute-date selections into minute offsets from a canonical week
// start, and projects them back onto the week containing "today".

use chrono::{DateTime, Datelike, Days, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

use crate::core::week::week_at;
use crate::models::config::WeekStartsOn;
use crate::models::interval::{RecurringInterval, TimeInterval};
use crate::utils::date::local_datetime;

const MINUTES_PER_DAY: i32 = 24 * 60;

/// Encode an absolute interval as minutes elapsed from the configured week
/// start.
///
/// Offsets are derived from the local day-of-week and wall-clock time, which
/// keeps them independent of daylight-saving transitions in the concrete week
/// the interval happens to sit in. `start_minutes` always lands in
/// `[0, 10080)`; the end offset may cross the week boundary for an interval
/// that does.
pub fn make_recurring(
    interval: &TimeInterval,
    tz: Tz,
    week_starts_on: WeekStartsOn,
) -> RecurringInterval {
    let start = interval.start.with_timezone(&tz);
    let end = interval.end.with_timezone(&tz);

    let start_day = week_starts_on.days_from_week_start(start.weekday()) as i32;
    let start_minutes =
        start_day * MINUTES_PER_DAY + (start.hour() * 60 + start.minute()) as i32;

    let day_span = (end.date_naive() - start.date_naive()).num_days() as i32;
    let end_minutes = (start_day + day_span) * MINUTES_PER_DAY
        + (end.hour() * 60 + end.minute()) as i32;

    RecurringInterval {
        start_minutes,
        end_minutes,
    }
}

/// Project minute offsets onto the week containing now, so the UI always
/// displays recurring selections anchored to the current calendar week.
pub fn normalize_recurring_selections(
    selections: &[RecurringInterval],
    tz: Tz,
    week_starts_on: WeekStartsOn,
) -> Vec<TimeInterval> {
    normalize_recurring_selections_at(selections, tz, week_starts_on, Utc::now())
}

/// [`normalize_recurring_selections`] with an explicit "today".
pub fn normalize_recurring_selections_at(
    selections: &[RecurringInterval],
    tz: Tz,
    week_starts_on: WeekStartsOn,
    today: DateTime<Utc>,
) -> Vec<TimeInterval> {
    let week = week_at(week_starts_on, today, tz);
    let first_day = week.days[0].date.with_timezone(&tz).date_naive();

    selections
        .iter()
        .filter_map(|recurring| {
            let start = project(first_day, recurring.start_minutes, tz)?;
            let end = project(first_day, recurring.end_minutes, tz)?;
            match TimeInterval::new(start, end) {
                Ok(interval) => Some(interval),
                Err(err) => {
                    log::warn!("dropping unprojectable recurring selection: {err}");
                    None
                }
            }
        })
        .collect()
}

fn project(
    first_day: chrono::NaiveDate,
    minutes: i32,
    tz: Tz,
) -> Option<DateTime<Utc>> {
    if minutes < 0 {
        return None;
    }
    let day_offset = minutes.div_euclid(MINUTES_PER_DAY);
    let minute_of_day = minutes.rem_euclid(MINUTES_PER_DAY);
    let date = first_day + Days::new(day_offset as u64);
    let time = NaiveTime::from_hms_opt((minute_of_day / 60) as u32, (minute_of_day % 60) as u32, 0)?;
    Some(local_datetime(tz, date.and_time(time)))
}
