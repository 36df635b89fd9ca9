// Configuration module
// Validated widget configuration built from the public option set

use chrono::Weekday;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;

/// First day of computed weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStartsOn {
    Sunday,
    Monday,
}

impl WeekStartsOn {
    pub fn first_weekday(self) -> Weekday {
        match self {
            WeekStartsOn::Sunday => Weekday::Sun,
            WeekStartsOn::Monday => Weekday::Mon,
        }
    }

    /// Days elapsed from the week start to `weekday` (0..=6).
    pub fn days_from_week_start(self, weekday: Weekday) -> u32 {
        match self {
            WeekStartsOn::Sunday => weekday.num_days_from_sunday(),
            WeekStartsOn::Monday => weekday.num_days_from_monday(),
        }
    }
}

/// Clock display convention for labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeConvention {
    #[serde(rename = "12h")]
    TwelveHour,
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
}

/// Hours of the day (0..=24) that accept new intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourRange {
    pub start: u8,
    pub end: u8,
}

impl Default for HourRange {
    fn default() -> Self {
        Self { start: 0, end: 24 }
    }
}

impl HourRange {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start >= self.end || self.end > 24 {
            return Err(ConfigError::InvalidHourRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

/// Validated configuration for the whole widget. Construct via
/// [`GridConfig::builder`]; missing required options fail fast rather than
/// silently defaulting, since a guessed time zone would corrupt displayed
/// time math.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub time_zone: Tz,
    pub week_starts_on: WeekStartsOn,
    pub time_convention: TimeConvention,
    /// Collapse all weeks to one canonical week; output as minute offsets
    pub recurring: bool,
    /// Gate interval creation
    pub addable: bool,
    /// Gate any modification
    pub editable: bool,
    /// Disable the stretch-resize gesture entirely
    pub only_30_min: bool,
    /// Tap-to-delete instead of the drag-handle delete affordance
    pub touch_to_delete: bool,
    /// Which weekdays accept new intervals
    pub available_days: Vec<Weekday>,
    /// Which hours accept new intervals
    pub available_hour_range: HourRange,
    /// How long a freshly created slot ignores its own delete, in ms.
    /// Guards against the click that created a slot also deleting it.
    pub delete_grace_ms: u64,
}

impl GridConfig {
    pub fn builder() -> GridConfigBuilder {
        GridConfigBuilder::default()
    }
}

pub struct GridConfigBuilder {
    time_zone: Option<Tz>,
    week_starts_on: Option<WeekStartsOn>,
    time_convention: TimeConvention,
    recurring: bool,
    addable: bool,
    editable: bool,
    only_30_min: bool,
    touch_to_delete: bool,
    available_days: Vec<Weekday>,
    available_hour_range: HourRange,
    delete_grace_ms: u64,
}

impl Default for GridConfigBuilder {
    fn default() -> Self {
        Self {
            time_zone: None,
            week_starts_on: Some(WeekStartsOn::Monday),
            time_convention: TimeConvention::default(),
            recurring: false,
            addable: true,
            editable: true,
            only_30_min: false,
            touch_to_delete: false,
            available_days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
                Weekday::Sun,
            ],
            available_hour_range: HourRange::default(),
            delete_grace_ms: 500,
        }
    }
}

impl GridConfigBuilder {
    pub fn time_zone(mut self, tz: Tz) -> Self {
        self.time_zone = Some(tz);
        self
    }

    /// Parse an IANA zone name, e.g. `"Europe/Stockholm"`.
    pub fn time_zone_name(mut self, name: &str) -> Result<Self, ConfigError> {
        let tz = name
            .parse::<Tz>()
            .map_err(|_| ConfigError::UnknownTimeZone(name.to_string()))?;
        self.time_zone = Some(tz);
        Ok(self)
    }

    pub fn week_starts_on(mut self, week_starts_on: WeekStartsOn) -> Self {
        self.week_starts_on = Some(week_starts_on);
        self
    }

    pub fn time_convention(mut self, convention: TimeConvention) -> Self {
        self.time_convention = convention;
        self
    }

    pub fn recurring(mut self, recurring: bool) -> Self {
        self.recurring = recurring;
        self
    }

    pub fn addable(mut self, addable: bool) -> Self {
        self.addable = addable;
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn only_30_min(mut self, only_30_min: bool) -> Self {
        self.only_30_min = only_30_min;
        self
    }

    pub fn touch_to_delete(mut self, touch_to_delete: bool) -> Self {
        self.touch_to_delete = touch_to_delete;
        self
    }

    pub fn available_days(mut self, days: Vec<Weekday>) -> Self {
        self.available_days = days;
        self
    }

    pub fn available_hour_range(mut self, range: HourRange) -> Self {
        self.available_hour_range = range;
        self
    }

    pub fn delete_grace_ms(mut self, ms: u64) -> Self {
        self.delete_grace_ms = ms;
        self
    }

    pub fn build(self) -> Result<GridConfig, ConfigError> {
        let time_zone = self.time_zone.ok_or(ConfigError::MissingTimeZone)?;
        let week_starts_on = self.week_starts_on.ok_or(ConfigError::MissingWeekStart)?;
        self.available_hour_range.validate()?;

        Ok(GridConfig {
            time_zone,
            week_starts_on,
            time_convention: self.time_convention,
            recurring: self.recurring,
            addable: self.addable,
            editable: self.editable,
            only_30_min: self.only_30_min,
            touch_to_delete: self.touch_to_delete,
            available_days: self.available_days,
            available_hour_range: self.available_hour_range,
            delete_grace_ms: self.delete_grace_ms,
        })
    }
}
