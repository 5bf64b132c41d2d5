pub mod config;
pub mod db;
pub mod error;
pub mod types;

pub use error::{DecodeFailure, SchedError};
pub use types::{JsonColumn, StorageValue, TimeOfDay};
