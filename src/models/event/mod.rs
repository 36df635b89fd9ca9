// Event module
// Read-only overlay events and the external calendars they come from

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;

/// An event from an external calendar, rendered behind the selection layer.
/// Never mutated by the engine, only filtered per day and drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub all_day: bool,
    /// Hex color, e.g. `#FF5733`
    pub background_color: Option<String>,
    pub foreground_color: Option<String>,
    /// Fraction of the column width occupied, used to signal overlap
    pub width: Option<f32>,
    /// Fractional left offset within the column
    pub offset: Option<f32>,
    /// Id of the [`CalendarSource`] this event belongs to
    pub calendar_id: Option<String>,
}

impl CalendarEvent {
    /// Create an event with required fields; optional fields via [`builder`].
    ///
    /// [`builder`]: CalendarEvent::builder
    pub fn new(
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, ConfigError> {
        if end <= start {
            return Err(ConfigError::InvalidInterval { start, end });
        }
        Ok(Self {
            title: title.into(),
            start,
            end,
            all_day: false,
            background_color: None,
            foreground_color: None,
            width: None,
            offset: None,
            calendar_id: None,
        })
    }

    pub fn builder() -> CalendarEventBuilder {
        CalendarEventBuilder::default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.end <= self.start {
            return Err(ConfigError::InvalidInterval {
                start: self.start,
                end: self.end,
            });
        }
        for color in [&self.background_color, &self.foreground_color]
            .into_iter()
            .flatten()
        {
            validate_hex_color(color)?;
        }
        Ok(())
    }
}

fn validate_hex_color(color: &str) -> Result<(), ConfigError> {
    if !color.starts_with('#') || (color.len() != 7 && color.len() != 4) {
        return Err(ConfigError::InvalidColor(color.to_string()));
    }
    Ok(())
}

/// Builder for overlay events with optional fields
#[derive(Default)]
pub struct CalendarEventBuilder {
    title: Option<String>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    all_day: bool,
    background_color: Option<String>,
    foreground_color: Option<String>,
    width: Option<f32>,
    offset: Option<f32>,
    calendar_id: Option<String>,
}

impl CalendarEventBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    pub fn background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn foreground_color(mut self, color: impl Into<String>) -> Self {
        self.foreground_color = Some(color.into());
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn offset(mut self, offset: f32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn calendar_id(mut self, id: impl Into<String>) -> Self {
        self.calendar_id = Some(id.into());
        self
    }

    pub fn build(self) -> Result<CalendarEvent, ConfigError> {
        let title = self.title.ok_or(ConfigError::MissingField("title"))?;
        let start = self.start.ok_or(ConfigError::MissingField("start"))?;
        let end = self.end.ok_or(ConfigError::MissingField("end"))?;

        let event = CalendarEvent {
            title,
            start,
            end,
            all_day: self.all_day,
            background_color: self.background_color,
            foreground_color: self.foreground_color,
            width: self.width,
            offset: self.offset,
            calendar_id: self.calendar_id,
        };
        event.validate()?;
        Ok(event)
    }
}

/// An external calendar entry shown in the toolbar; toggling `selected`
/// controls which overlay events are visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSource {
    pub id: String,
    pub title: String,
    pub color: Option<String>,
    pub selected: bool,
}
