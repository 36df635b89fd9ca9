// Day interaction engine
// State machine owning pointer/touch gestures over one day column: create,
// move, resize and delete intervals with collision avoidance and the
// 30-minute minimum.

use std::time::{Duration as StdDuration, Instant};

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

use crate::core::constants::{
    CREATION_ROUND_MINS, HOUR_IN_PIXELS, MINUTE_IN_PIXELS, MIN_SELECTION_MINS,
    ROUND_TO_NEAREST_MINS,
};
use crate::core::geometry::{has_overlap, position_in_day, to_date};
use crate::core::pointer::{PointerInput, PointerPhase, TouchTracker};
use crate::core::week_grid::HourLimits;
use crate::models::config::GridConfig;
use crate::models::interval::TimeInterval;

/// Which edge of a selection a drag manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEdge {
    /// Stretch-resize of the end edge
    End,
    /// Move of the whole interval
    Both,
}

/// Transient state of an in-progress drag.
#[derive(Debug, Clone, Copy)]
struct DragState {
    edge: DragEdge,
    index: usize,
    last_known_position: f32,
    min_length_mins: i64,
}

/// The interaction engine for one day column. Holds the day's ordered
/// selection list and the active drag, if any. Committed lists flow upward
/// through the return values of [`pointer_up`], [`delete`] and [`touch_end`].
///
/// [`pointer_up`]: DayEngine::pointer_up
/// [`delete`]: DayEngine::delete
/// [`touch_end`]: DayEngine::touch_end
pub struct DayEngine {
    index: usize,
    date: DateTime<Utc>,
    tz: Tz,
    selections: Vec<TimeInterval>,
    /// Creation instants parallel to `selections`; `None` for seeded entries.
    created: Vec<Option<Instant>>,
    drag: Option<DragState>,
    touch: Option<TouchTracker>,
    hour_limits: HourLimits,
    available: bool,
    editable: bool,
    addable: bool,
    only_30_min: bool,
    delete_grace: StdDuration,
}

impl DayEngine {
    pub fn new(
        index: usize,
        date: DateTime<Utc>,
        initial_selections: Vec<TimeInterval>,
        hour_limits: HourLimits,
        available: bool,
        config: &GridConfig,
    ) -> Self {
        let created = vec![None; initial_selections.len()];
        Self {
            index,
            date,
            tz: config.time_zone,
            selections: initial_selections,
            created,
            drag: None,
            touch: None,
            hour_limits,
            available,
            editable: config.editable,
            addable: config.addable,
            only_30_min: config.only_30_min,
            delete_grace: StdDuration::from_millis(config.delete_grace_ms),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn available(&self) -> bool {
        self.available
    }

    pub fn selections(&self) -> &[TimeInterval] {
        &self.selections
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Index of the selection currently being created, moved, or resized.
    pub fn active_index(&self) -> Option<usize> {
        self.drag.as_ref().map(|drag| drag.index)
    }

    /// Snap a raw surface-relative pixel offset to the grid: apply the top
    /// blocker offset, then round down to the nearest `rounding_mins`.
    fn relative_y(&self, raw_y: f32, rounding_mins: f32) -> f32 {
        let real_y = raw_y + self.hour_limits.top;
        let snap_to = rounding_mins / 60.0 * HOUR_IN_PIXELS;
        (real_y / snap_to).floor() * snap_to
    }

    fn find_selection_at(&self, date: DateTime<Utc>) -> bool {
        self.selections.iter().any(|s| s.contains(date))
    }

    /// Route a full pointer sample. `Down` may create, `Move` advances an
    /// active drag, `Up` commits.
    pub fn handle_pointer(&mut self, input: PointerInput) -> Option<Vec<TimeInterval>> {
        match input.phase {
            PointerPhase::Down => {
                self.pointer_down(input.y);
                None
            }
            PointerPhase::Move => {
                self.pointer_move(input.y);
                None
            }
            PointerPhase::Up => self.pointer_up(),
        }
    }

    /// Pointer-down in empty space starts creating a half-hour interval and
    /// enters the creating state. Rejected on top of an existing interval, or
    /// when clipping against neighbors leaves less than 30 minutes.
    pub fn pointer_down(&mut self, raw_y: f32) {
        if !(self.editable && self.addable && self.available) {
            return;
        }
        let position = self.relative_y(raw_y, CREATION_ROUND_MINS);
        let date_at_position = to_date(self.date, position, self.tz);

        if self.find_selection_at(date_at_position) {
            return;
        }

        let mut end = to_date(self.date, position + HOUR_IN_PIXELS / 2.0, self.tz);
        if let Some(boundary) = has_overlap(&self.selections, date_at_position, end, None) {
            end = boundary;
        }
        if end - date_at_position < Duration::minutes(MIN_SELECTION_MINS) {
            // slot is less than 30 mins
            log::debug!("day {}: rejected creation under minimum length", self.index);
            return;
        }

        self.selections.push(TimeInterval {
            start: date_at_position,
            end,
        });
        self.created.push(Some(Instant::now()));
        self.drag = Some(DragState {
            edge: DragEdge::End,
            index: self.selections.len() - 1,
            last_known_position: position,
            min_length_mins: MIN_SELECTION_MINS,
        });
    }

    /// Start a stretch-resize of the end edge of `target`.
    pub fn begin_resize(&mut self, target: TimeInterval, raw_y: f32) {
        self.begin_drag(DragEdge::End, target, raw_y);
    }

    /// Start moving the whole of `target`.
    pub fn begin_move(&mut self, target: TimeInterval, raw_y: f32) {
        self.begin_drag(DragEdge::Both, target, raw_y);
    }

    fn begin_drag(&mut self, edge: DragEdge, target: TimeInterval, raw_y: f32) {
        if !self.editable {
            return;
        }
        let position = self.relative_y(raw_y, ROUND_TO_NEAREST_MINS);
        if let Some(index) = self.selections.iter().position(|s| *s == target) {
            self.drag = Some(DragState {
                edge,
                index,
                last_known_position: position,
                min_length_mins: MIN_SELECTION_MINS,
            });
        }
    }

    /// Advance an active drag to the pointer position. A step that would
    /// overlap another interval, or push past an hour-limit blocker in the
    /// direction of travel, is a no-op: the gesture continues from the last
    /// accepted position.
    pub fn pointer_move(&mut self, raw_y: f32) {
        let Some(drag) = self.drag else {
            return;
        };
        let position = self.relative_y(raw_y, ROUND_TO_NEAREST_MINS);
        let Some(selection) = self.selections.get(drag.index).copied() else {
            return;
        };

        match drag.edge {
            DragEdge::Both => {
                let diff = to_date(self.date, position, self.tz)
                    - to_date(self.date, drag.last_known_position, self.tz);
                let new_start = selection.start + diff;
                let new_end = selection.end + diff;

                if has_overlap(&self.selections, new_start, new_end, Some(drag.index)).is_some() {
                    return;
                }

                let top = position_in_day(self.date, selection.start, self.tz);
                let bottom = position_in_day(self.date, selection.end, self.tz);
                if top <= self.hour_limits.top && diff < Duration::zero() {
                    return;
                }
                if bottom >= self.hour_limits.bottom && diff > Duration::zero() {
                    return;
                }

                self.selections[drag.index] = TimeInterval {
                    start: new_start,
                    end: new_end,
                };
            }
            DragEdge::End => {
                if !self.addable || self.only_30_min {
                    return;
                }
                let start_pos = position_in_day(self.date, selection.start, self.tz);
                let min_pos = start_pos + drag.min_length_mins as f32 * MINUTE_IN_PIXELS;
                let new_end = to_date(self.date, min_pos.max(position), self.tz);

                if has_overlap(&self.selections, selection.start, new_end, Some(drag.index))
                    .is_some()
                {
                    return;
                }
                self.selections[drag.index].end = new_end;
            }
        }

        if let Some(drag) = self.drag.as_mut() {
            drag.last_known_position = position;
        }
    }

    /// Pointer-up (and pointer-leave, which commits rather than cancels)
    /// ends the active drag and returns the committed interval list.
    pub fn pointer_up(&mut self) -> Option<Vec<TimeInterval>> {
        self.drag.take()?;
        Some(self.selections.clone())
    }

    /// Remove `target` by `{start, end}` identity and commit immediately.
    /// A slot created less than the grace period ago ignores the delete, so
    /// the click that created it cannot also remove it.
    pub fn delete(&mut self, target: TimeInterval) -> Option<Vec<TimeInterval>> {
        if !self.editable || self.drag.is_some() {
            return None;
        }
        let index = self.selections.iter().position(|s| *s == target)?;
        if let Some(Some(created)) = self.created.get(index) {
            if created.elapsed() < self.delete_grace {
                // Just created. Likely the same physical click that created it.
                return None;
            }
        }
        self.selections.remove(index);
        self.created.remove(index);
        Some(self.selections.clone())
    }

    pub fn touch_start(&mut self, x: f32, y: f32) {
        self.touch = Some(TouchTracker::start(x, y));
    }

    pub fn touch_move(&mut self, x: f32, y: f32) {
        if let Some(touch) = self.touch.as_mut() {
            touch.update(x, y);
        }
    }

    /// End a touch sequence. A tap replays as a synthetic down-then-up,
    /// enabling tap-to-create without a drag.
    pub fn touch_end(&mut self) -> Option<Vec<TimeInterval>> {
        let tracker = self.touch.take()?;
        let y = tracker.finish()?;
        self.pointer_down(y);
        self.pointer_up()
    }
}
