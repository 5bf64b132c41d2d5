//! SQL DDL for the scheduling tables.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - time-of-day columns as TEXT `HH:MM:SS`
/// - free-form JSON columns as BLOB, defaulting to an empty object
/// - timestamps as TEXT (RFC3339)
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS appointments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id INTEGER NOT NULL,
    provider_type TEXT NOT NULL,
    doctor_id INTEGER NULL,
    home_care_provider_id INTEGER NULL,
    appointment_date TEXT NOT NULL,
    start_time TEXT NOT NULL,
    end_time TEXT NOT NULL,
    status TEXT NOT NULL,
    cancellation_reason TEXT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_appointments_patient_id ON appointments(patient_id);

CREATE TABLE IF NOT EXISTS doctor_availability (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    doctor_id INTEGER NOT NULL,
    day_of_week INTEGER NOT NULL,
    start_time TEXT NOT NULL,
    end_time TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS audit_trails (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    table_name TEXT NOT NULL,
    record_id INTEGER NOT NULL,
    action TEXT NOT NULL,
    changed_fields BLOB NOT NULL DEFAULT (CAST('{}' AS BLOB)),
    changed_by INTEGER NOT NULL,
    changed_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS system_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp TEXT NOT NULL,
    user_id INTEGER NOT NULL,
    user_type TEXT NOT NULL,
    action_type TEXT NOT NULL,
    action_description TEXT NOT NULL,
    entity_type TEXT NOT NULL,
    entity_id INTEGER NOT NULL,
    old_value BLOB NOT NULL DEFAULT (CAST('{}' AS BLOB)),
    new_value BLOB NOT NULL DEFAULT (CAST('{}' AS BLOB)),
    ip_address TEXT NOT NULL,
    user_agent TEXT NOT NULL,
    additional_info BLOB NOT NULL DEFAULT (CAST('{}' AS BLOB))
);
"#;
