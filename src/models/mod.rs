// Model module exports

pub mod config;
pub mod event;
pub mod interval;
