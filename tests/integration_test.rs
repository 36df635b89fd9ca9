// End-to-end gesture scenarios driven through the public scheduler API.

use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use test_case::test_case;

use slotgrid::core::constants::{HOUR_IN_PIXELS, MINUTE_IN_PIXELS, WEEKS_PER_TIMESPAN};
use slotgrid::core::pointer::PointerInput;
use slotgrid::models::config::WeekStartsOn;
use slotgrid::models::interval::RecurringInterval;
use slotgrid::{GridConfig, Scheduler, Selection, TimeInterval};

// Monday 2024-04-08, well before the grid's first day ends.
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 8, 5, 0, 0).unwrap()
}

fn config() -> GridConfig {
    GridConfig::builder()
        .time_zone_name("UTC")
        .unwrap()
        .week_starts_on(WeekStartsOn::Monday)
        .delete_grace_ms(0)
        .build()
        .unwrap()
}

fn scheduler_with(selections: Vec<Selection>) -> Scheduler {
    Scheduler::new_at(config(), selections, now()).unwrap()
}

// Pixel offset from the top of the drag surface for a wall-clock hour.
fn y(hour: f32) -> f32 {
    (hour - 7.0) * HOUR_IN_PIXELS
}

fn absolute(selections: &[Selection]) -> Vec<TimeInterval> {
    selections
        .iter()
        .map(|s| match s {
            Selection::Absolute(interval) => *interval,
            Selection::Recurring(_) => panic!("expected absolute selection"),
        })
        .collect()
}

#[test]
fn test_press_creates_half_hour_slot() {
    let mut scheduler = scheduler_with(Vec::new());

    // press at 09:00 on Tuesday, release without moving
    scheduler.engine_mut().pointer(1, PointerInput::down(y(9.0)));
    let change = scheduler
        .engine_mut()
        .pointer(1, PointerInput::up())
        .expect("release should commit");
    let selections = scheduler.apply(change);

    let intervals = absolute(&selections);
    assert_eq!(
        intervals,
        vec![TimeInterval::new(
            Utc.with_ymd_and_hms(2024, 4, 9, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 4, 9, 9, 30, 0).unwrap(),
        )
        .unwrap()]
    );
}

#[test]
fn test_drag_down_stretches_to_pointer() {
    let mut scheduler = scheduler_with(Vec::new());

    scheduler.engine_mut().pointer(1, PointerInput::down(y(9.0)));
    scheduler
        .engine_mut()
        .pointer(1, PointerInput::moved(y(10.0) + 15.0 * MINUTE_IN_PIXELS));
    let change = scheduler
        .engine_mut()
        .pointer(1, PointerInput::up())
        .expect("release should commit");
    let intervals = absolute(&scheduler.apply(change));

    assert_eq!(
        intervals[0].end,
        Utc.with_ymd_and_hms(2024, 4, 9, 10, 15, 0).unwrap()
    );
}

#[test]
fn test_resize_stops_at_neighbor() {
    let nine = Utc.with_ymd_and_hms(2024, 4, 9, 9, 0, 0).unwrap();
    let existing = TimeInterval::new(
        Utc.with_ymd_and_hms(2024, 4, 9, 10, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 4, 9, 11, 0, 0).unwrap(),
    )
    .unwrap();
    let created = TimeInterval::new(
        nine,
        Utc.with_ymd_and_hms(2024, 4, 9, 9, 30, 0).unwrap(),
    )
    .unwrap();
    let mut scheduler =
        scheduler_with(vec![Selection::Absolute(existing), Selection::Absolute(created)]);

    // stretch the 09:00 slot toward 10:15; the step into the neighbor is a
    // no-op, so the last consistent end wins
    scheduler.engine_mut().begin_resize(1, created, y(9.5));
    scheduler.engine_mut().pointer(1, PointerInput::moved(y(10.0)));
    scheduler
        .engine_mut()
        .pointer(1, PointerInput::moved(y(10.0) + 15.0 * MINUTE_IN_PIXELS));
    let change = scheduler
        .engine_mut()
        .pointer(1, PointerInput::up())
        .expect("release should commit");
    let intervals = absolute(&scheduler.apply(change));

    assert_eq!(intervals.len(), 2);
    let resized = intervals.iter().find(|i| i.start == nine).unwrap();
    assert_eq!(
        resized.end,
        Utc.with_ymd_and_hms(2024, 4, 9, 10, 0, 0).unwrap()
    );
}

#[test]
fn test_move_keeps_duration() {
    let interval = TimeInterval::new(
        Utc.with_ymd_and_hms(2024, 4, 9, 9, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 4, 9, 10, 0, 0).unwrap(),
    )
    .unwrap();
    let mut scheduler = scheduler_with(vec![Selection::Absolute(interval)]);

    scheduler.engine_mut().begin_move(1, interval, y(9.5));
    scheduler.engine_mut().pointer(1, PointerInput::moved(y(11.5)));
    let change = scheduler
        .engine_mut()
        .pointer(1, PointerInput::up())
        .expect("release should commit");
    let intervals = absolute(&scheduler.apply(change));

    assert_eq!(
        intervals,
        vec![TimeInterval::new(
            Utc.with_ymd_and_hms(2024, 4, 9, 11, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 4, 9, 12, 0, 0).unwrap(),
        )
        .unwrap()]
    );
}

#[test]
fn test_delete_after_grace_period() {
    let interval = TimeInterval::new(
        Utc.with_ymd_and_hms(2024, 4, 9, 9, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 4, 9, 10, 0, 0).unwrap(),
    )
    .unwrap();
    let mut scheduler = scheduler_with(vec![Selection::Absolute(interval)]);

    let change = scheduler
        .engine_mut()
        .delete(1, interval)
        .expect("seeded entries delete immediately");
    assert!(scheduler.apply(change).is_empty());
}

#[test]
fn test_recurring_round_trip() {
    let tuesday_14 = RecurringInterval::new(24 * 60 + 14 * 60, 24 * 60 + 15 * 60).unwrap();
    let config = GridConfig::builder()
        .time_zone_name("UTC")
        .unwrap()
        .recurring(true)
        .build()
        .unwrap();
    let scheduler =
        Scheduler::new_at(config, vec![Selection::Recurring(tuesday_14)], now()).unwrap();

    assert_eq!(
        scheduler.selections(),
        vec![Selection::Recurring(tuesday_14)]
    );
}

#[test]
fn test_forward_navigation_expands_once() {
    let mut scheduler = scheduler_with(Vec::new());
    assert_eq!(scheduler.weeks().len(), WEEKS_PER_TIMESPAN);

    assert!(scheduler.move_by(1));
    assert!(!scheduler.move_by(1));

    assert_eq!(scheduler.weeks().len(), 2 * WEEKS_PER_TIMESPAN);
    assert_eq!(scheduler.current_week_index(), 1);
}

#[test_case(-1, 0 ; "backward from home is pinned")]
#[test_case(1, 1 ; "forward moves one week")]
#[test_case(5, 0 ; "a jump outside the window is rejected")]
fn test_move_by_clamps(increment: i32, expected_index: usize) {
    let mut scheduler = scheduler_with(Vec::new());
    scheduler.move_by(increment);
    assert_eq!(scheduler.current_week_index(), expected_index);
}

#[test]
fn test_selection_survives_navigation_round_trip() {
    let mut scheduler = scheduler_with(Vec::new());

    scheduler.engine_mut().pointer(2, PointerInput::down(y(13.0)));
    let change = scheduler.engine_mut().pointer(2, PointerInput::up()).unwrap();
    scheduler.apply(change);

    scheduler.move_by(1);
    scheduler.go_home();

    let intervals = absolute(&scheduler.selections());
    assert_eq!(
        intervals[0].start,
        Utc.with_ymd_and_hms(2024, 4, 10, 13, 0, 0).unwrap()
    );
}

#[test]
fn test_pointer_leave_commits_like_release() {
    // The widget sends an Up when the pointer leaves the column; the engine
    // treats it exactly like a release.
    let mut scheduler = scheduler_with(Vec::new());

    scheduler.engine_mut().pointer(1, PointerInput::down(y(9.0)));
    scheduler.engine_mut().pointer(1, PointerInput::moved(y(10.0)));
    let change = scheduler
        .engine_mut()
        .pointer(1, PointerInput::up())
        .expect("leaving the surface commits the drag");
    let intervals = absolute(&scheduler.apply(change));

    assert_eq!(intervals.len(), 1);
    assert!(!scheduler.engine().is_dragging());
}

#[test]
fn test_past_days_reject_creation() {
    let mut scheduler = scheduler_with(Vec::new());

    // Monday is already underway relative to `now`, but not over; creation on
    // it stays allowed while nothing earlier exists in a Monday-start week.
    scheduler.engine_mut().pointer(0, PointerInput::down(y(9.0)));
    assert!(scheduler.engine().is_dragging());
    scheduler.engine_mut().pointer(0, PointerInput::up());

    // A scheduler anchored mid-week sees the earlier days as past.
    let midweek = Utc.with_ymd_and_hms(2024, 4, 11, 5, 0, 0).unwrap(); // Thursday
    let mut scheduler = Scheduler::new_at(config(), Vec::new(), midweek).unwrap();
    scheduler.engine_mut().pointer(1, PointerInput::down(y(9.0)));
    assert!(!scheduler.engine().is_dragging());
    assert!(scheduler.engine_mut().pointer(1, PointerInput::up()).is_none());
}
