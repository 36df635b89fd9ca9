// Property-based tests for the week math, recurrence folding, and the
// interaction engine's structural invariants.

use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc};
use proptest::prelude::*;

use slotgrid::core::constants::HOUR_IN_PIXELS;
use slotgrid::models::interval::MINUTES_PER_WEEK;
use slotgrid::core::geometry::has_overlap;
use slotgrid::core::pointer::PointerInput;
use slotgrid::core::recurring::{make_recurring, normalize_recurring_selections_at};
use slotgrid::core::week::week_at;
use slotgrid::models::config::WeekStartsOn;
use slotgrid::models::interval::RecurringInterval;
use slotgrid::{GridConfig, Scheduler, Selection, TimeInterval};

fn arb_instant() -> impl Strategy<Value = DateTime<Utc>> {
    // 2020-01-01 through late 2033, minute precision
    (0i64..7_300_000).prop_map(|offset_minutes| {
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(offset_minutes)
    })
}

fn arb_week_start() -> impl Strategy<Value = WeekStartsOn> {
    prop_oneof![Just(WeekStartsOn::Monday), Just(WeekStartsOn::Sunday)]
}

fn arb_recurring() -> impl Strategy<Value = RecurringInterval> {
    (0..MINUTES_PER_WEEK - 30).prop_flat_map(|start| {
        (Just(start), (start + 30)..=MINUTES_PER_WEEK).prop_map(|(start_minutes, end_minutes)| {
            RecurringInterval {
                start_minutes,
                end_minutes,
            }
        })
    })
}

proptest! {
    /// A computed week always holds exactly 7 noon-anchored days, the first
    /// of which matches the configured week start, and contains the query
    /// instant.
    #[test]
    fn prop_week_shape(at in arb_instant(), week_starts_on in arb_week_start()) {
        let tz = chrono_tz::Europe::Stockholm;
        let week = week_at(week_starts_on, at, tz);

        prop_assert!(week.start <= at && at < week.end);
        prop_assert_eq!(
            week.days[0].date.with_timezone(&tz).weekday(),
            week_starts_on.first_weekday()
        );
        for day in &week.days {
            prop_assert_eq!(day.date.with_timezone(&tz).hour(), 12);
        }
        for pair in week.days.windows(2) {
            let gap = pair[1].date.signed_duration_since(pair[0].date);
            // noon to noon is 23 to 25 hours across DST shifts
            prop_assert!((23..=25).contains(&gap.num_hours()));
        }
    }

    /// Folding an absolute interval to week offsets and projecting it back
    /// into a concrete week lands on the same weekday and wall-clock time.
    #[test]
    fn prop_recurring_round_trip(
        recurring in arb_recurring(),
        today in arb_instant(),
        week_starts_on in arb_week_start(),
    ) {
        let tz = chrono_tz::Europe::Stockholm;
        let projected =
            normalize_recurring_selections_at(&[recurring], tz, week_starts_on, today);
        prop_assert_eq!(projected.len(), 1);

        let folded = make_recurring(&projected[0], tz, week_starts_on);
        // Wall-clock times inside a DST gap shift by an hour when projected;
        // everything else must fold back exactly.
        let drift = (folded.start_minutes - recurring.start_minutes).rem_euclid(MINUTES_PER_WEEK);
        prop_assert!(drift == 0 || drift == 60, "start drifted by {} minutes", drift);
    }

    /// `has_overlap` agrees with a brute-force half-open intersection check
    /// whenever no interval is exempted.
    #[test]
    fn prop_has_overlap_matches_brute_force(
        starts in prop::collection::vec(0i64..500, 0..6),
        candidate_start in 0i64..500,
        candidate_len in 1i64..48,
    ) {
        let base = Utc.with_ymd_and_hms(2024, 4, 8, 0, 0, 0).unwrap();
        let existing: Vec<TimeInterval> = starts
            .iter()
            .map(|&s| {
                TimeInterval::new(
                    base + Duration::minutes(s * 30),
                    base + Duration::minutes(s * 30 + 60),
                )
                .unwrap()
            })
            .collect();
        let start = base + Duration::minutes(candidate_start * 30);
        let end = start + Duration::minutes(candidate_len * 30);

        let brute = existing.iter().any(|i| i.start < end && start < i.end);
        let result = has_overlap(&existing, start, end, None);
        prop_assert_eq!(result.is_some(), brute);
    }

    /// Whatever sequence of presses, drags, and releases runs against a day,
    /// the committed intervals never overlap and are never shorter than 30
    /// minutes.
    #[test]
    fn prop_engine_commits_are_disjoint_and_long_enough(
        gestures in prop::collection::vec((0usize..7, 0f32..800.0, 0f32..850.0), 1..12),
    ) {
        let config = GridConfig::builder()
            .time_zone_name("UTC")
            .unwrap()
            .build()
            .unwrap();
        let now = Utc.with_ymd_and_hms(2024, 4, 8, 0, 0, 0).unwrap();
        let mut scheduler = Scheduler::new_at(config, Vec::new(), now).unwrap();

        for (day, press_y, drag_y) in gestures {
            scheduler.engine_mut().pointer(day, PointerInput::down(press_y));
            scheduler.engine_mut().pointer(day, PointerInput::moved(drag_y));
            if let Some(change) = scheduler.engine_mut().pointer(day, PointerInput::up()) {
                scheduler.apply(change);
            }
        }

        let intervals: Vec<TimeInterval> = scheduler
            .selections()
            .into_iter()
            .map(|s| match s {
                Selection::Absolute(interval) => interval,
                Selection::Recurring(_) => unreachable!("non-recurring config"),
            })
            .collect();

        for interval in &intervals {
            prop_assert!(interval.duration() >= Duration::minutes(30));
        }
        for (i, a) in intervals.iter().enumerate() {
            for b in intervals.iter().skip(i + 1) {
                prop_assert!(
                    a.end <= b.start || b.end <= a.start,
                    "{:?} overlaps {:?}", a, b
                );
            }
        }
    }

    /// Created intervals always snap to the grid: starts on half hours for
    /// presses, pixel math never produces sub-minute precision.
    #[test]
    fn prop_presses_snap_to_half_hours(day in 0usize..7, press_y in 0f32..820.0) {
        let config = GridConfig::builder()
            .time_zone_name("UTC")
            .unwrap()
            .build()
            .unwrap();
        let now = Utc.with_ymd_and_hms(2024, 4, 8, 0, 0, 0).unwrap();
        let mut scheduler = Scheduler::new_at(config, Vec::new(), now).unwrap();

        scheduler.engine_mut().pointer(day, PointerInput::down(press_y));
        if let Some(change) = scheduler.engine_mut().pointer(day, PointerInput::up()) {
            let selections = scheduler.apply(change);
            prop_assert_eq!(selections.len(), 1);
            let Selection::Absolute(interval) = selections[0] else {
                return Err(proptest::test_runner::TestCaseError::fail(
                    "expected absolute selection",
                ));
            };
            let minute = interval.start.minute();
            prop_assert!(minute == 0 || minute == 30);
            prop_assert_eq!(interval.duration(), Duration::minutes(30));
        }
    }
}

#[test]
fn test_hour_pixel_constants_are_consistent() {
    // the grid shows 17 hours, so positions past the bottom edge clamp there
    assert!((HOUR_IN_PIXELS * 17.0 - 850.0).abs() < f32::EPSILON);
}
