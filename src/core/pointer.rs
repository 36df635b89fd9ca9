// Pointer abstraction
// Mouse and touch input collapse into one internal pointer representation;
// the touch adapter reinterprets short touches as taps.

/// Phase of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// A pointer sample in day-column coordinates: `y` is pixels from the top of
/// the interactive surface (scroll already compensated by the caller).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub y: f32,
    pub phase: PointerPhase,
}

impl PointerInput {
    pub fn down(y: f32) -> Self {
        Self {
            y,
            phase: PointerPhase::Down,
        }
    }

    pub fn moved(y: f32) -> Self {
        Self {
            y,
            phase: PointerPhase::Move,
        }
    }

    pub fn up() -> Self {
        Self {
            y: 0.0,
            phase: PointerPhase::Up,
        }
    }
}

/// A touch that travels less than this in both axes is treated as a tap.
pub const TOUCH_TAP_THRESHOLD: f32 = 20.0;

/// Tracks one touch sequence and decides on release whether it was a tap.
#[derive(Debug, Clone, Copy)]
pub struct TouchTracker {
    start_x: f32,
    start_y: f32,
    current_x: Option<f32>,
    current_y: Option<f32>,
}

impl TouchTracker {
    pub fn start(x: f32, y: f32) -> Self {
        Self {
            start_x: x,
            start_y: y,
            current_x: None,
            current_y: None,
        }
    }

    pub fn update(&mut self, x: f32, y: f32) {
        self.current_x = Some(x);
        self.current_y = Some(y);
    }

    /// Consume the sequence. Returns the starting `y` when the touch counts
    /// as a tap (to be replayed as a synthetic down-then-up), `None` when it
    /// moved too far.
    pub fn finish(self) -> Option<f32> {
        let moved_x = (self.start_x - self.current_x.unwrap_or(self.start_x)).abs();
        let moved_y = (self.start_y - self.current_y.unwrap_or(self.start_y)).abs();
        if moved_x < TOUCH_TAP_THRESHOLD && moved_y < TOUCH_TAP_THRESHOLD {
            Some(self.start_y)
        } else {
            None
        }
    }
}
