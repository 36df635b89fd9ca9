use egui::{Align2, CursorIcon, FontId, Pos2, Rect, Sense, Stroke};

use crate::core::constants::HOUR_IN_PIXELS;
use crate::core::geometry::position_in_day;
use crate::core::pointer::PointerInput;
use crate::core::scheduler::Scheduler;
use crate::core::week_grid::WeekChange;
use crate::models::interval::TimeInterval;
use crate::ui_egui::{parse_hex_color, timespan_label};

const HANDLE_HEIGHT: f32 = 10.0;
const DELETE_SIZE: f32 = 16.0;

/// What the pointer did to this column this frame, resolved after all hit
/// regions have been considered so the topmost one wins.
enum Pending {
    Create(f32),
    Move(TimeInterval, f32),
    Resize(TimeInterval, f32),
    Delete(TimeInterval),
}

/// Render one day column and feed its pointer interactions into the engine.
/// Returns the committed change if a gesture finished this frame.
pub(crate) fn render_day_column(
    ui: &mut egui::Ui,
    scheduler: &mut Scheduler,
    day_index: usize,
    rect: Rect,
) -> Option<WeekChange> {
    let tz = scheduler.config().time_zone;
    let convention = scheduler.config().time_convention;
    let touch_to_delete = scheduler.config().touch_to_delete;

    let engine = scheduler.engine();
    let limits = engine.hour_limits();
    let day = engine.day(day_index)?;
    let date = day.date();
    let available = day.available();
    let dragging = day.is_dragging();
    let active_index = day.active_index();
    let selections: Vec<TimeInterval> = day.selections().to_vec();
    let events = engine.events_for_day(day_index).to_vec();

    let painter = ui.painter_at(rect);
    let visuals = ui.visuals().clone();
    let grid_line = visuals.widgets.noninteractive.bg_stroke.color;
    let blocker_fill = visuals.faint_bg_color;

    painter.rect_filled(rect, 0.0, visuals.extreme_bg_color);
    for hour in 0..=17 {
        let y = rect.top() + hour as f32 * HOUR_IN_PIXELS;
        painter.hline(rect.x_range(), y, Stroke::new(1.0, grid_line));
    }

    // Blockers outside the available hour range.
    if limits.top > 0.0 {
        painter.rect_filled(
            Rect::from_min_max(rect.left_top(), egui::pos2(rect.right(), rect.top() + limits.top)),
            0.0,
            blocker_fill,
        );
    }
    if limits.bottom_height > 0.0 {
        painter.rect_filled(
            Rect::from_min_max(
                egui::pos2(rect.left(), rect.top() + limits.bottom),
                rect.right_bottom(),
            ),
            0.0,
            blocker_fill,
        );
    }
    if !available {
        painter.rect_filled(rect, 0.0, blocker_fill.gamma_multiply(1.4));
    }

    // Read-only overlay events underneath the selections.
    for event in &events {
        let (top, bottom) = if event.all_day {
            (rect.top(), rect.bottom())
        } else {
            (
                rect.top() + position_in_day(date, event.start, tz),
                rect.top() + position_in_day(date, event.end, tz),
            )
        };
        let width = event.width.unwrap_or(1.0) * rect.width();
        let left = rect.left() + event.offset.unwrap_or(0.0) * rect.width();
        let event_rect = Rect::from_min_max(egui::pos2(left, top), egui::pos2(left + width, bottom));

        let fill = event
            .background_color
            .as_deref()
            .and_then(parse_hex_color)
            .unwrap_or(visuals.widgets.inactive.bg_fill);
        let text_color = event
            .foreground_color
            .as_deref()
            .and_then(parse_hex_color)
            .unwrap_or(visuals.text_color());

        painter.rect_filled(event_rect, 2.0, fill.gamma_multiply(0.6));
        painter.text(
            event_rect.left_top() + egui::vec2(4.0, 2.0),
            Align2::LEFT_TOP,
            &event.title,
            FontId::proportional(11.0),
            text_color,
        );
    }

    // The interactive surface excludes the blockers, matching the engine's
    // y origin.
    let surface = Rect::from_min_max(
        egui::pos2(rect.left(), rect.top() + limits.top),
        egui::pos2(rect.right(), rect.top() + limits.bottom),
    );
    let raw_y = |pos: Pos2| pos.y - surface.top();

    let col_id = ui.id().with(("day_column", day_index));
    let column_response = ui.interact(surface, col_id, Sense::click_and_drag());

    let mut pending: Option<Pending> = None;
    // a clean click (tap) also creates; the release in the same frame commits
    // the bare 30-minute slot
    if column_response.drag_started() || column_response.clicked() {
        if let Some(pos) = column_response.interact_pointer_pos() {
            pending = Some(Pending::Create(raw_y(pos)));
        }
    }

    // Selections on top of everything else; their hit regions are registered
    // after the column so they win the press.
    let accent = visuals.selection.bg_fill;
    for (i, selection) in selections.iter().enumerate() {
        let top = rect.top() + position_in_day(date, selection.start, tz);
        let bottom = rect.top() + position_in_day(date, selection.end, tz);
        let slot_rect = Rect::from_min_max(
            egui::pos2(rect.left() + 1.0, top),
            egui::pos2(rect.right() - 1.0, bottom),
        );

        painter.rect(slot_rect, 3.0, accent, Stroke::new(1.0, accent.gamma_multiply(1.3)));
        let frozen = active_index != Some(i);
        painter.text(
            slot_rect.left_top() + egui::vec2(4.0, 2.0),
            Align2::LEFT_TOP,
            timespan_label(selection.start, selection.end, tz, convention, frozen),
            FontId::proportional(10.0),
            visuals.selection.stroke.color,
        );

        let body_response = ui
            .interact(slot_rect, col_id.with(("slot", i)), Sense::click_and_drag())
            .on_hover_cursor(CursorIcon::Grab);
        if body_response.drag_started() {
            if let Some(pos) = body_response.interact_pointer_pos() {
                pending = Some(Pending::Move(*selection, raw_y(pos)));
            }
        } else if body_response.clicked() && touch_to_delete {
            pending = Some(Pending::Delete(*selection));
        }

        let handle_rect = Rect::from_min_max(
            egui::pos2(slot_rect.left(), slot_rect.bottom() - HANDLE_HEIGHT),
            slot_rect.right_bottom(),
        );
        let handle_response = ui
            .interact(handle_rect, col_id.with(("handle", i)), Sense::drag())
            .on_hover_cursor(CursorIcon::ResizeVertical);
        if handle_response.drag_started() {
            if let Some(pos) = handle_response.interact_pointer_pos() {
                pending = Some(Pending::Resize(*selection, raw_y(pos)));
            }
        }

        if !touch_to_delete {
            let delete_rect = Rect::from_min_max(
                egui::pos2(slot_rect.right() - DELETE_SIZE, slot_rect.top()),
                egui::pos2(slot_rect.right(), slot_rect.top() + DELETE_SIZE),
            );
            let delete_response = ui
                .interact(delete_rect, col_id.with(("delete", i)), Sense::click())
                .on_hover_cursor(CursorIcon::PointingHand);
            painter.text(
                delete_rect.center(),
                Align2::CENTER_CENTER,
                "×",
                FontId::proportional(12.0),
                visuals.selection.stroke.color,
            );
            if delete_response.clicked() {
                pending = Some(Pending::Delete(*selection));
            }
        }
    }

    let mut commit = None;
    match pending {
        Some(Pending::Create(y)) => {
            scheduler.engine_mut().pointer(day_index, PointerInput::down(y));
        }
        Some(Pending::Move(target, y)) => scheduler.engine_mut().begin_move(day_index, target, y),
        Some(Pending::Resize(target, y)) => {
            scheduler.engine_mut().begin_resize(day_index, target, y)
        }
        Some(Pending::Delete(target)) => {
            commit = scheduler.engine_mut().delete(day_index, target);
        }
        None => {}
    }

    // While the engine is dragging in this column, track the pointer each
    // frame; leaving the column or releasing the button commits.
    if dragging || scheduler.engine().day(day_index).is_some_and(|d| d.is_dragging()) {
        let pointer_pos = ui.input(|i| i.pointer.latest_pos());
        let released = ui.input(|i| i.pointer.any_released());

        if let Some(pos) = pointer_pos {
            if !released && surface.contains(pos) {
                scheduler
                    .engine_mut()
                    .pointer(day_index, PointerInput::moved(raw_y(pos)));
            }
        }

        let left_column = pointer_pos.is_some_and(|pos| !rect.contains(pos));
        if released || left_column {
            if let Some(change) = scheduler.engine_mut().pointer(day_index, PointerInput::up()) {
                commit = Some(change);
            }
        }
    }

    commit
}
