use chrono::Datelike;
use egui::{Rect, RichText, Stroke, Vec2};

use crate::core::constants::{HOUR_IN_PIXELS, RULER_WIDTH_IN_PIXELS, VISIBLE_HOURS};
use crate::core::scheduler::Scheduler;
use crate::models::interval::Selection;
use crate::ui_egui::day_column::render_day_column;
use crate::ui_egui::ruler::render_ruler;

const HEADER_HEIGHT: f32 = 40.0;

/// The week-grid widget. Immediate mode: build one per frame around the
/// long-lived [`Scheduler`] and call [`show`].
///
/// [`show`]: SlotGrid::show
pub struct SlotGrid<'a> {
    scheduler: &'a mut Scheduler,
}

impl<'a> SlotGrid<'a> {
    pub fn new(scheduler: &'a mut Scheduler) -> Self {
        Self { scheduler }
    }

    /// Render the toolbar, day header, and scrollable grid. Returns the full
    /// flattened selection list when a gesture committed this frame.
    pub fn show(self, ui: &mut egui::Ui) -> Option<Vec<Selection>> {
        let scheduler = self.scheduler;

        Self::toolbar(ui, scheduler);
        ui.add_space(4.0);
        Self::day_header(ui, scheduler);

        let mut committed = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |scroll_ui| {
                let grid_height = VISIBLE_HOURS as f32 * HOUR_IN_PIXELS;
                let width = scroll_ui.available_width();
                let (grid_rect, _) = scroll_ui
                    .allocate_exact_size(Vec2::new(width, grid_height), egui::Sense::hover());

                render_ruler(
                    scroll_ui,
                    Rect::from_min_size(
                        grid_rect.left_top(),
                        Vec2::new(RULER_WIDTH_IN_PIXELS, grid_height),
                    ),
                    scheduler.config().time_convention,
                );

                let col_width = (grid_rect.width() - RULER_WIDTH_IN_PIXELS) / 7.0;
                for day_index in 0..7 {
                    let left = grid_rect.left()
                        + RULER_WIDTH_IN_PIXELS
                        + day_index as f32 * col_width;
                    let col_rect = Rect::from_min_size(
                        egui::pos2(left, grid_rect.top()),
                        Vec2::new(col_width, grid_height),
                    );
                    if let Some(change) =
                        render_day_column(scroll_ui, scheduler, day_index, col_rect)
                    {
                        committed = Some(scheduler.apply(change));
                    }
                }
            });

        committed
    }

    fn toolbar(ui: &mut egui::Ui, scheduler: &mut Scheduler) {
        ui.horizontal(|ui| {
            if !scheduler.config().recurring {
                if ui.button("‹").clicked() {
                    scheduler.move_by(-1);
                }
                if ui.button("›").clicked() {
                    scheduler.move_by(1);
                }
                if scheduler.current_week_index() != 0 && ui.button("Today").clicked() {
                    scheduler.go_home();
                }
            }

            ui.label(RichText::new(scheduler.current_week().interval.as_str()).strong());

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let toggles: Vec<(String, String, bool)> = scheduler
                    .calendars()
                    .iter()
                    .map(|calendar| {
                        (
                            calendar.id.clone(),
                            calendar.title.clone(),
                            scheduler.is_calendar_selected(&calendar.id),
                        )
                    })
                    .collect();
                for (id, title, selected) in toggles {
                    let mut checked = selected;
                    if ui.checkbox(&mut checked, title).changed() {
                        scheduler.toggle_calendar(&id);
                    }
                }
            });
        });
    }

    fn day_header(ui: &mut egui::Ui, scheduler: &Scheduler) {
        let tz = scheduler.config().time_zone;
        let week = scheduler.current_week().clone();

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            ui.add_space(RULER_WIDTH_IN_PIXELS);

            let col_width = (ui.available_width()) / 7.0;
            for day in &week.days {
                let local = day.date.with_timezone(&tz);
                ui.allocate_ui_with_layout(
                    Vec2::new(col_width, HEADER_HEIGHT),
                    egui::Layout::top_down(egui::Align::Center),
                    |cell| {
                        cell.label(RichText::new(day.abbreviated.as_str()).size(12.0).strong());
                        cell.label(
                            RichText::new(local.day().to_string())
                                .size(11.0)
                                .color(cell.visuals().weak_text_color()),
                        );
                    },
                );
            }
        });

        let line_y = ui.min_rect().bottom();
        ui.painter().hline(
            ui.min_rect().x_range(),
            line_y,
            Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color),
        );
    }
}
