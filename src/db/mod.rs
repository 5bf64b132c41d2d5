//! Database module: records and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: pool setup and schema bootstrap

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Appointment, AuditTrail, DoctorAvailability, SystemLog};
pub use schema::SQLITE_INIT;
pub use sqlite::{SchedStorage, SqlitePool};
