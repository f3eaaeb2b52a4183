// File: ./src/model/mod.rs
pub mod display;
pub mod item;
pub mod parser;

pub use item::{DailyGoals, DayKind, WEEKEND_SENTINEL};
pub use parser::Markers;
