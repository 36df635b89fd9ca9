//! egui presentation layer.
//!
//! Pure rendering and input translation on top of [`Scheduler`]: pointer
//! samples from egui are mapped into the engine's pixel space, and commits
//! coming back out of the engine are surfaced to the host application.
//!
//! [`Scheduler`]: crate::core::scheduler::Scheduler

mod day_column;
mod ruler;
mod widget;

pub use widget::SlotGrid;

use chrono::{DateTime, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use egui::Color32;

use crate::models::config::TimeConvention;

/// Format a wall-clock time for a slot label. Frozen slots on a whole hour
/// collapse to the short form ("3pm" / "15"), anything else keeps minutes
/// ("03:15pm" / "15:15").
pub(crate) fn format_time(
    at: DateTime<Utc>,
    tz: Tz,
    convention: TimeConvention,
    frozen: bool,
) -> String {
    let local = at.with_timezone(&tz);
    match convention {
        TimeConvention::TwelveHour => {
            if frozen && local.minute() == 0 {
                local.format("%-I%P").to_string()
            } else {
                local.format("%I:%M%P").to_string()
            }
        }
        TimeConvention::TwentyFourHour => {
            if frozen && local.minute() == 0 {
                local.format("%H").to_string()
            } else {
                local.format("%H:%M").to_string()
            }
        }
    }
}

pub(crate) fn timespan_label(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    tz: Tz,
    convention: TimeConvention,
    frozen: bool,
) -> String {
    format!(
        "{} - {}",
        format_time(start, tz, convention, frozen),
        format_time(end, tz, convention, frozen)
    )
}

/// Ruler labels for the 17 visible hours, 07:00 through 23:00. Only the hour
/// matters, so any date works as the formatting carrier.
pub(crate) fn hour_labels(convention: TimeConvention) -> Vec<String> {
    let carrier = NaiveDate::from_ymd_opt(2000, 1, 1).expect("fixed date");
    (7..24)
        .map(|hour| {
            let at = Utc
                .from_utc_datetime(&carrier.and_hms_opt(hour, 0, 0).expect("valid hour"));
            match convention {
                TimeConvention::TwelveHour => at.format("%-I%P").to_string(),
                TimeConvention::TwentyFourHour => at.format("%H").to_string(),
            }
        })
        .collect()
}

/// Parse a `#rgb` or `#rrggbb` color into an egui color.
pub(crate) fn parse_hex_color(hex: &str) -> Option<Color32> {
    let digits = hex.strip_prefix('#')?;
    let (r, g, b) = match digits.len() {
        3 => {
            let mut chunks = digits.chars().map(|c| c.to_digit(16));
            let r = chunks.next()??;
            let g = chunks.next()??;
            let b = chunks.next()??;
            (r * 17, g * 17, b * 17)
        }
        6 => (
            u32::from_str_radix(&digits[0..2], 16).ok()?,
            u32::from_str_radix(&digits[2..4], 16).ok()?,
            u32::from_str_radix(&digits[4..6], 16).ok()?,
        ),
        _ => return None,
    };
    Some(Color32::from_rgb(r as u8, g as u8, b as u8))
}
