// Geometry utilities
// Pixel <-> time conversion against the 07:00-anchored day column, plus the
// overlap scan and per-day event inclusion used across the engine.

use chrono::{DateTime, Duration, Timelike, Utc};
use chrono_tz::Tz;

use crate::core::constants::{DAY_START_HOUR, HOUR_IN_PIXELS, MINUTE_IN_PIXELS, VISIBLE_HOURS};
use crate::models::event::CalendarEvent;
use crate::models::interval::TimeInterval;
use crate::utils::date::local_datetime;

/// True iff both instants fall on the same calendar day in `tz`.
pub fn in_same_day(a: DateTime<Utc>, b: DateTime<Utc>, tz: Tz) -> bool {
    a.with_timezone(&tz).date_naive() == b.with_timezone(&tz).date_naive()
}

/// Pixel offset of `date` within the column of `within_day`.
///
/// Instants on an earlier day clamp to 0, on a later day to the bottom of the
/// 17-hour window. Within the day, hours before 07:00 produce negative
/// offsets, which render above the top edge exactly like the later hours
/// render below it.
pub fn position_in_day(within_day: DateTime<Utc>, date: DateTime<Utc>, tz: Tz) -> f32 {
    if !in_same_day(date, within_day, tz) {
        if date < within_day {
            return 0.0;
        }
        return VISIBLE_HOURS as f32 * HOUR_IN_PIXELS;
    }
    let local = date.with_timezone(&tz);
    (local.hour() as f32 - DAY_START_HOUR as f32) * HOUR_IN_PIXELS
        + local.minute() as f32 * MINUTE_IN_PIXELS
}

/// Inverse of [`position_in_day`]: the instant at `pixels_from_top` in the
/// column of `day`. Floors to the hour, ceils the remainder to the minute,
/// and zeroes seconds.
pub fn to_date(day: DateTime<Utc>, pixels_from_top: f32, tz: Tz) -> DateTime<Utc> {
    let hours = (pixels_from_top / HOUR_IN_PIXELS).floor() as i64;
    let minutes = ((pixels_from_top % HOUR_IN_PIXELS) / HOUR_IN_PIXELS * 60.0).ceil() as i64;
    let total_minutes = (DAY_START_HOUR as i64 + hours) * 60 + minutes;

    let midnight = day
        .with_timezone(&tz)
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default();
    local_datetime(tz, midnight + Duration::minutes(total_minutes))
}

/// Scan `intervals` for a conflict with `[start, end)` and return the first
/// conflicting boundary: another interval's start strictly inside, its end
/// strictly inside, or full containment. `ignore_index` skips the interval
/// being dragged so it cannot conflict with itself. Scan order is list order;
/// first match wins.
pub fn has_overlap(
    intervals: &[TimeInterval],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    ignore_index: Option<usize>,
) -> Option<DateTime<Utc>> {
    for (i, selection) in intervals.iter().enumerate() {
        if Some(i) == ignore_index {
            continue;
        }
        if selection.start > start && selection.start < end {
            // overlapping start
            return Some(selection.start);
        }
        if selection.end > start && selection.end < end {
            // overlapping end
            return Some(selection.end);
        }
        if selection.start <= start && selection.end >= end {
            // inside
            return Some(selection.start);
        }
    }
    None
}

fn timed_span_included(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    day_start: DateTime<Utc>,
    day_end: DateTime<Utc>,
) -> bool {
    (day_start <= start && start < day_end) || (day_start < end && end < day_end)
}

/// Overlay events belonging to the day `[day_start, day_end)`. All-day events
/// are included iff `day_start` falls inside them; timed events iff they
/// start or end within the day (partial overlap counts).
pub fn included_events(
    events: &[CalendarEvent],
    day_start: DateTime<Utc>,
    day_end: DateTime<Utc>,
) -> Vec<CalendarEvent> {
    events
        .iter()
        .filter(|event| {
            if event.all_day {
                day_start >= event.start && day_start < event.end
            } else {
                timed_span_included(event.start, event.end, day_start, day_end)
            }
        })
        .cloned()
        .collect()
}

/// Selection intervals belonging to the day `[day_start, day_end)`, using the
/// timed-event rule.
pub fn included_intervals(
    intervals: &[TimeInterval],
    day_start: DateTime<Utc>,
    day_end: DateTime<Utc>,
) -> Vec<TimeInterval> {
    intervals
        .iter()
        .filter(|interval| timed_span_included(interval.start, interval.end, day_start, day_end))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc() -> Tz {
        "UTC".parse().unwrap()
    }

    fn at(day: u32, h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, h, m, 0).unwrap()
    }

    fn interval(day: u32, sh: u32, sm: u32, eh: u32, em: u32) -> TimeInterval {
        TimeInterval::new(at(day, sh, sm), at(day, eh, em)).unwrap()
    }

    #[test]
    fn test_position_in_day_grid_origin() {
        let day = at(2, 12, 0);
        assert_eq!(position_in_day(day, at(2, 7, 0), utc()), 0.0);
        assert_eq!(position_in_day(day, at(2, 9, 0), utc()), 2.0 * HOUR_IN_PIXELS);
        assert_eq!(
            position_in_day(day, at(2, 9, 30), utc()),
            2.5 * HOUR_IN_PIXELS
        );
    }

    #[test]
    fn test_position_in_day_clamps_other_days() {
        let day = at(2, 12, 0);
        assert_eq!(position_in_day(day, at(1, 23, 0), utc()), 0.0);
        assert_eq!(
            position_in_day(day, at(3, 1, 0), utc()),
            17.0 * HOUR_IN_PIXELS
        );
    }

    #[test]
    fn test_to_date_inverts_position() {
        let day = at(2, 12, 0);
        let date = to_date(day, 2.5 * HOUR_IN_PIXELS, utc());
        assert_eq!(date, at(2, 9, 30));
        assert_eq!(position_in_day(day, date, utc()), 2.5 * HOUR_IN_PIXELS);
    }

    #[test]
    fn test_to_date_zeroes_seconds() {
        let day = at(2, 12, 0);
        let date = to_date(day, 13.0, utc());
        assert_eq!(date.second(), 0);
        assert_eq!(date.nanosecond(), 0);
    }

    #[test]
    fn test_in_same_day_respects_zone() {
        let stockholm: Tz = "Europe/Stockholm".parse().unwrap();
        // 23:30 UTC on Jan 1 is 00:30 Jan 2 in Stockholm
        assert!(!in_same_day(at(1, 23, 30), at(1, 12, 0), stockholm));
        assert!(in_same_day(at(1, 23, 30), at(1, 12, 0), utc()));
    }

    #[test]
    fn test_has_overlap_detects_all_three_cases() {
        let existing = vec![interval(2, 9, 0, 10, 0)];

        // overlapping start
        assert_eq!(
            has_overlap(&existing, at(2, 8, 30), at(2, 9, 30), None),
            Some(at(2, 9, 0))
        );
        // overlapping end
        assert_eq!(
            has_overlap(&existing, at(2, 9, 30), at(2, 10, 30), None),
            Some(at(2, 10, 0))
        );
        // fully inside an existing interval
        assert_eq!(
            has_overlap(&existing, at(2, 9, 15), at(2, 9, 45), None),
            Some(at(2, 9, 0))
        );
        // adjacent is not an overlap
        assert_eq!(has_overlap(&existing, at(2, 10, 0), at(2, 11, 0), None), None);
        assert_eq!(has_overlap(&existing, at(2, 8, 0), at(2, 9, 0), None), None);
    }

    #[test]
    fn test_has_overlap_ignores_own_index() {
        let existing = vec![interval(2, 9, 0, 10, 0)];
        assert_eq!(has_overlap(&existing, at(2, 9, 0), at(2, 10, 30), Some(0)), None);
    }

    #[test]
    fn test_has_overlap_first_match_wins() {
        let existing = vec![interval(2, 9, 0, 10, 0), interval(2, 10, 30, 11, 0)];
        assert_eq!(
            has_overlap(&existing, at(2, 8, 0), at(2, 12, 0), None),
            Some(at(2, 9, 0))
        );
    }

    #[test]
    fn test_included_events_all_day_boundaries() {
        let event = CalendarEvent::builder()
            .title("Conference")
            .start(at(1, 0, 0))
            .end(at(3, 0, 0))
            .all_day(true)
            .build()
            .unwrap();
        let events = vec![event];

        assert_eq!(included_events(&events, at(2, 0, 0), at(3, 0, 0)).len(), 1);
        assert_eq!(included_events(&events, at(3, 0, 0), at(4, 0, 0)).len(), 0);
    }

    #[test]
    fn test_included_events_partial_overlap_counts() {
        let event = CalendarEvent::new("Late", at(1, 23, 0), at(2, 1, 0)).unwrap();
        let events = vec![event];

        // ends within day 2
        assert_eq!(included_events(&events, at(2, 0, 0), at(3, 0, 0)).len(), 1);
        // starts within day 1
        assert_eq!(included_events(&events, at(1, 0, 0), at(2, 0, 0)).len(), 1);
        assert_eq!(included_events(&events, at(3, 0, 0), at(4, 0, 0)).len(), 0);
    }
}
