// Slotgrid Library
// Exports all modules for testing and embedding

pub mod core;
pub mod models;
pub mod ui_egui;
pub mod utils;

pub use crate::core::scheduler::Scheduler;
pub use crate::models::config::GridConfig;
pub use crate::models::interval::{Selection, TimeInterval};
pub use crate::ui_egui::SlotGrid;
