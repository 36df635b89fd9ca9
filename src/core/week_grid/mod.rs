// Week aggregation
// Composes 7 day engines, buckets flat event/selection lists per day, and
// merges day-level commits back into one week-level change.

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;

use crate::core::constants::HOUR_IN_PIXELS;
use crate::core::day::DayEngine;
use crate::core::geometry::{included_events, included_intervals};
use crate::core::pointer::PointerInput;
use crate::core::week::Week;
use crate::models::config::{GridConfig, HourRange};
use crate::models::event::CalendarEvent;
use crate::models::interval::TimeInterval;
use crate::utils::date::day_bounds;

/// Pixel blockers derived from the available hour range, relative to the
/// 07:00 grid origin: a grayed region above `top`, a grayed region of
/// `bottom_height` starting at `bottom`, and a draggable region of `height`
/// in between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourLimits {
    pub top: f32,
    pub bottom: f32,
    pub bottom_height: f32,
    pub height: f32,
}

impl HourLimits {
    pub fn from_range(range: HourRange) -> Self {
        let grid_start = crate::core::constants::DAY_START_HOUR as f32;
        let start = (range.start as f32).max(grid_start);
        let end = (range.end as f32).max(start);

        let top = (start - grid_start) * HOUR_IN_PIXELS;
        let bottom = (end - grid_start) * HOUR_IN_PIXELS;
        Self {
            top,
            bottom,
            bottom_height: (24.0 - end) * HOUR_IN_PIXELS,
            height: bottom - top,
        }
    }
}

/// A committed week-level change: the week it belongs to (keyed by its start)
/// and the flat interval list in day-then-creation order.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekChange {
    pub week_start: DateTime<Utc>,
    pub intervals: Vec<TimeInterval>,
}

/// Aggregates one week of day engines plus the read-only overlay buckets.
pub struct WeekEngine {
    week: Week,
    tz: Tz,
    hour_limits: HourLimits,
    days: Vec<DayEngine>,
    day_events: Vec<Vec<CalendarEvent>>,
}

impl WeekEngine {
    /// Build the engine for `week`. `selections` and `events` are flat lists;
    /// both are split into 7 per-day buckets against midnight-to-midnight
    /// boundaries, so entries outside this week simply fall away.
    pub fn new(
        week: Week,
        config: &GridConfig,
        selections: &[TimeInterval],
        events: &[CalendarEvent],
        now: DateTime<Utc>,
    ) -> Self {
        let tz = config.time_zone;
        let hour_limits = HourLimits::from_range(config.available_hour_range);

        let mut days = Vec::with_capacity(7);
        let mut day_events = Vec::with_capacity(7);
        for (index, day) in week.days.iter().enumerate() {
            let (day_start, day_end) = day_bounds(day.date, tz);
            let available = day_available(config, day.date, now);
            days.push(DayEngine::new(
                index,
                day.date,
                included_intervals(selections, day_start, day_end),
                hour_limits,
                available,
                config,
            ));
            day_events.push(included_events(events, day_start, day_end));
        }

        Self {
            week,
            tz,
            hour_limits,
            days,
            day_events,
        }
    }

    pub fn week(&self) -> &Week {
        &self.week
    }

    pub fn hour_limits(&self) -> HourLimits {
        self.hour_limits
    }

    pub fn day(&self, index: usize) -> Option<&DayEngine> {
        self.days.get(index)
    }

    pub fn events_for_day(&self, index: usize) -> &[CalendarEvent] {
        self.day_events
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_dragging(&self) -> bool {
        self.days.iter().any(DayEngine::is_dragging)
    }

    /// Replace the overlay buckets without touching selection or drag state.
    pub fn set_events(&mut self, events: &[CalendarEvent]) {
        for (bucket, day) in self.day_events.iter_mut().zip(self.week.days.iter()) {
            let (day_start, day_end) = day_bounds(day.date, self.tz);
            *bucket = included_events(events, day_start, day_end);
        }
    }

    /// Flatten all day buckets into day-then-creation order.
    fn flatten(&self) -> Vec<TimeInterval> {
        self.days
            .iter()
            .flat_map(|day| day.selections().iter().copied())
            .collect()
    }

    fn change(&self) -> WeekChange {
        WeekChange {
            week_start: self.week.start,
            intervals: self.flatten(),
        }
    }

    /// Route a pointer sample to one day engine; a commit from the day is
    /// merged into a week-level change.
    pub fn pointer(&mut self, day_index: usize, input: PointerInput) -> Option<WeekChange> {
        self.days.get_mut(day_index)?.handle_pointer(input)?;
        Some(self.change())
    }

    pub fn begin_move(&mut self, day_index: usize, target: TimeInterval, y: f32) {
        if let Some(day) = self.days.get_mut(day_index) {
            day.begin_move(target, y);
        }
    }

    pub fn begin_resize(&mut self, day_index: usize, target: TimeInterval, y: f32) {
        if let Some(day) = self.days.get_mut(day_index) {
            day.begin_resize(target, y);
        }
    }

    pub fn delete(&mut self, day_index: usize, target: TimeInterval) -> Option<WeekChange> {
        self.days.get_mut(day_index)?.delete(target)?;
        Some(self.change())
    }

    pub fn touch_start(&mut self, day_index: usize, x: f32, y: f32) {
        if let Some(day) = self.days.get_mut(day_index) {
            day.touch_start(x, y);
        }
    }

    pub fn touch_move(&mut self, day_index: usize, x: f32, y: f32) {
        if let Some(day) = self.days.get_mut(day_index) {
            day.touch_move(x, y);
        }
    }

    pub fn touch_end(&mut self, day_index: usize) -> Option<WeekChange> {
        self.days.get_mut(day_index)?.touch_end()?;
        Some(self.change())
    }
}

fn day_available(config: &GridConfig, day: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    let weekday = day.with_timezone(&config.time_zone).weekday();
    if !config.available_days.contains(&weekday) {
        return false;
    }
    // In recurring mode the canonical week is timeless; otherwise only days
    // that have not yet passed accept new intervals.
    config.recurring || now < day
}
