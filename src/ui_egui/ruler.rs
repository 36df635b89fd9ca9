use egui::{Align2, FontId, Rect, Stroke};

use crate::core::constants::HOUR_IN_PIXELS;
use crate::models::config::TimeConvention;
use crate::ui_egui::hour_labels;

/// Draw the hour ruler down the left edge of the grid. One cell per visible
/// hour; the topmost 24-hour label ("07") is suppressed so it does not
/// collide with the day header directly above it.
pub(crate) fn render_ruler(ui: &egui::Ui, rect: Rect, convention: TimeConvention) {
    let painter = ui.painter_at(rect);
    let label_color = ui.visuals().weak_text_color();
    let line_color = ui.visuals().widgets.noninteractive.bg_stroke.color;

    for (i, label) in hour_labels(convention).iter().enumerate() {
        let top = rect.top() + i as f32 * HOUR_IN_PIXELS;
        painter.line_segment(
            [
                egui::pos2(rect.right() - 4.0, top),
                egui::pos2(rect.right(), top),
            ],
            Stroke::new(1.0, line_color),
        );
        if label == "07" {
            continue;
        }
        painter.text(
            egui::pos2(rect.right() - 8.0, top),
            Align2::RIGHT_CENTER,
            label,
            FontId::proportional(11.0),
            label_color,
        );
    }
}
