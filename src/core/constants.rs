// Grid constants
// The visible grid is a 17-hour window starting at 07:00 local time.

pub const HOUR_IN_PIXELS: f32 = 50.0;
pub const MINUTE_IN_PIXELS: f32 = HOUR_IN_PIXELS / 60.0;
pub const RULER_WIDTH_IN_PIXELS: f32 = 40.0;

/// First hour shown in a day column.
pub const DAY_START_HOUR: u32 = 7;
/// Number of hours shown in a day column.
pub const VISIBLE_HOURS: u32 = 17;

/// How many weeks are appended per lazy expansion, and the remaining-buffer
/// threshold that triggers one.
pub const WEEKS_PER_TIMESPAN: usize = 4;

/// Default drag snapping, in minutes.
pub const ROUND_TO_NEAREST_MINS: f32 = 15.0;
/// Coarser snapping used for interval creation.
pub const CREATION_ROUND_MINS: f32 = 30.0;
/// Minimum length of a created or resized interval, in minutes.
pub const MIN_SELECTION_MINS: i64 = 30;
