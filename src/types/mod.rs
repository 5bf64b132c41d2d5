//! Value types shared by the persisted records.

pub mod json_column;
pub mod time_of_day;

pub use json_column::{JsonColumn, StorageValue};
pub use time_of_day::TimeOfDay;
