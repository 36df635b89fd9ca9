// Core selection/interaction engine
// Pure functional core: geometry, week math, recurrence folding, and the
// pointer-driven state machines. No rendering concerns live here.

pub mod constants;
pub mod day;
pub mod error;
pub mod geometry;
pub mod pointer;
pub mod recurring;
pub mod scheduler;
pub mod week;
pub mod week_grid;
