// Multi-week orchestration
// Maintains the rolling week window, the authoritative per-week selection
// cache, and produces the public change payload (absolute or
// recurrence-encoded).

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Duration, Utc};

use crate::core::constants::WEEKS_PER_TIMESPAN;
use crate::core::error::ConfigError;
use crate::core::recurring::{make_recurring, normalize_recurring_selections_at};
use crate::core::week::{week_at, Week};
use crate::core::week_grid::{WeekChange, WeekEngine};
use crate::models::config::GridConfig;
use crate::models::event::{CalendarEvent, CalendarSource};
use crate::models::interval::{RecurringInterval, Selection, TimeInterval};

/// Top-level engine behind the widget: owns the append-only week sequence,
/// the current week pointer, and the week-start-keyed selection cache that
/// individual day/week engines only ever hold derived copies of.
pub struct Scheduler {
    config: GridConfig,
    now: DateTime<Utc>,
    weeks: Vec<Week>,
    current_week_index: usize,
    /// Authoritative store, keyed by week-start millis. Mutated only through
    /// [`apply`].
    ///
    /// [`apply`]: Scheduler::apply
    selections: BTreeMap<i64, Vec<TimeInterval>>,
    events: Vec<CalendarEvent>,
    calendars: Vec<CalendarSource>,
    selected_calendars: HashSet<String>,
    engine: WeekEngine,
}

impl Scheduler {
    /// Build a scheduler around validated `config`, seeding the cache from
    /// `initial_selections`. Malformed seeds are rejected with a typed error
    /// rather than rendered undefined.
    pub fn new(config: GridConfig, initial_selections: Vec<Selection>) -> Result<Self, ConfigError> {
        Self::new_at(config, initial_selections, Utc::now())
    }

    /// [`Scheduler::new`] with an explicit "now", the anchor for the first
    /// week and day availability.
    pub fn new_at(
        config: GridConfig,
        initial_selections: Vec<Selection>,
        now: DateTime<Utc>,
    ) -> Result<Self, ConfigError> {
        let normalized = normalize_seeds(&config, &initial_selections, now)?;

        let mut selections: BTreeMap<i64, Vec<TimeInterval>> = BTreeMap::new();
        for interval in &normalized {
            let week = week_at(config.week_starts_on, interval.start, config.time_zone);
            selections
                .entry(week.start.timestamp_millis())
                .or_default()
                .push(*interval);
        }

        let mut weeks = Vec::new();
        expand_weeks(&mut weeks, 0, &config, now);

        let engine = WeekEngine::new(weeks[0].clone(), &config, &normalized, &[], now);

        Ok(Self {
            config,
            now,
            weeks,
            current_week_index: 0,
            selections,
            events: Vec::new(),
            calendars: Vec::new(),
            selected_calendars: HashSet::new(),
            engine,
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    pub fn current_week_index(&self) -> usize {
        self.current_week_index
    }

    pub fn current_week(&self) -> &Week {
        &self.weeks[self.current_week_index]
    }

    pub fn calendars(&self) -> &[CalendarSource] {
        &self.calendars
    }

    /// The week engine for the currently displayed week. Pointer input from
    /// the presentation layer is routed here; any returned [`WeekChange`]
    /// must be fed back through [`apply`].
    ///
    /// [`apply`]: Scheduler::apply
    pub fn engine_mut(&mut self) -> &mut WeekEngine {
        &mut self.engine
    }

    pub fn engine(&self) -> &WeekEngine {
        &self.engine
    }

    /// Navigate by whole weeks. The visible window is a sliding two-frame
    /// range, so targets outside `[0, 1]` are rejected; recurring mode pins
    /// the single canonical week and rejects all navigation.
    pub fn move_by(&mut self, increment: i32) -> bool {
        if self.config.recurring {
            return false;
        }
        let next = self.current_week_index as i32 + increment;
        if !(0..=1).contains(&next) {
            return false;
        }
        let next = next as usize;
        expand_weeks(&mut self.weeks, next, &self.config, self.now);
        self.current_week_index = next;
        self.rebuild_engine();
        log::debug!("moved to week {} ({})", next, self.current_week().interval);
        true
    }

    pub fn go_home(&mut self) {
        if self.current_week_index != 0 {
            self.current_week_index = 0;
            self.rebuild_engine();
        }
    }

    /// Commit a week-level change into the authoritative cache and return the
    /// full flattened payload for the public change callback.
    pub fn apply(&mut self, change: WeekChange) -> Vec<Selection> {
        self.selections
            .insert(change.week_start.timestamp_millis(), change.intervals);
        self.selections()
    }

    /// The current flattened selection list: absolute intervals in
    /// day-then-creation order, or recurrence-encoded minute offsets for
    /// entries within the canonical (first) week in recurring mode.
    pub fn selections(&self) -> Vec<Selection> {
        let flat: Vec<TimeInterval> = self
            .selections
            .values()
            .flat_map(|intervals| intervals.iter().copied())
            .collect();

        if self.config.recurring {
            let Some(first_week) = self.weeks.first() else {
                return Vec::new();
            };
            flat.iter()
                .filter(|interval| interval.start < first_week.end)
                .map(|interval| {
                    Selection::Recurring(make_recurring(
                        interval,
                        self.config.time_zone,
                        self.config.week_starts_on,
                    ))
                })
                .collect()
        } else {
            flat.into_iter().map(Selection::Absolute).collect()
        }
    }

    /// Replace the read-only overlay events. Does not disturb an in-progress
    /// drag; only the overlay buckets are re-derived.
    pub fn set_events(&mut self, events: Vec<CalendarEvent>) {
        self.events = events;
        let visible = self.visible_events();
        self.engine.set_events(&visible);
    }

    pub fn set_calendars(&mut self, calendars: Vec<CalendarSource>) {
        self.selected_calendars = calendars
            .iter()
            .filter(|calendar| calendar.selected)
            .map(|calendar| calendar.id.clone())
            .collect();
        self.calendars = calendars;
        let visible = self.visible_events();
        self.engine.set_events(&visible);
    }

    pub fn is_calendar_selected(&self, id: &str) -> bool {
        self.selected_calendars.contains(id)
    }

    pub fn toggle_calendar(&mut self, id: &str) {
        if !self.selected_calendars.remove(id) {
            self.selected_calendars.insert(id.to_string());
        }
        let visible = self.visible_events();
        self.engine.set_events(&visible);
    }

    fn visible_events(&self) -> Vec<CalendarEvent> {
        self.events
            .iter()
            .filter(|event| match &event.calendar_id {
                Some(id) => self.selected_calendars.contains(id),
                None => true,
            })
            .cloned()
            .collect()
    }

    fn rebuild_engine(&mut self) {
        let flat: Vec<TimeInterval> = self
            .selections
            .values()
            .flat_map(|intervals| intervals.iter().copied())
            .collect();
        let visible = self.visible_events();
        self.engine = WeekEngine::new(
            self.weeks[self.current_week_index].clone(),
            &self.config,
            &flat,
            &visible,
            self.now,
        );
    }
}

/// Validate seeds and project them into absolute intervals. Recurring seeds
/// land in the week containing `now`; absolute seeds pass through.
fn normalize_seeds(
    config: &GridConfig,
    seeds: &[Selection],
    now: DateTime<Utc>,
) -> Result<Vec<TimeInterval>, ConfigError> {
    let mut recurring: Vec<RecurringInterval> = Vec::new();
    let mut absolute: Vec<TimeInterval> = Vec::new();

    for seed in seeds {
        match seed {
            Selection::Absolute(interval) => {
                absolute.push(TimeInterval::new(interval.start, interval.end)?);
            }
            Selection::Recurring(interval) => {
                recurring.push(RecurringInterval::new(
                    interval.start_minutes,
                    interval.end_minutes,
                )?);
            }
        }
    }

    let mut normalized = normalize_recurring_selections_at(
        &recurring,
        config.time_zone,
        config.week_starts_on,
        now,
    );
    normalized.extend(absolute);
    Ok(normalized)
}

/// Append weeks until the remaining buffer past `week_index` exceeds the
/// look-ahead threshold. Each expansion appends exactly
/// [`WEEKS_PER_TIMESPAN`] consecutive weeks.
fn expand_weeks(weeks: &mut Vec<Week>, week_index: usize, config: &GridConfig, now: DateTime<Utc>) {
    if weeks.len() > week_index + WEEKS_PER_TIMESPAN {
        // no need to expand
        return;
    }
    for _ in 0..WEEKS_PER_TIMESPAN {
        let next = match weeks.last() {
            Some(last) => week_at(
                config.week_starts_on,
                one_week_ahead(last.days[3].date),
                config.time_zone,
            ),
            None => week_at(config.week_starts_on, now, config.time_zone),
        };
        weeks.push(next);
    }
}

fn one_week_ahead(date: DateTime<Utc>) -> DateTime<Utc> {
    // noon-anchored, so a DST shift cannot move it across a day boundary
    date + Duration::days(7)
}
