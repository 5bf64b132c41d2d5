use chrono::{TimeZone, Utc};
use medsched::db::{Appointment, AuditTrail, DoctorAvailability, SchedStorage, SystemLog};
use medsched::{JsonColumn, TimeOfDay};
use serde_json::json;
use sqlx::sqlite::SqlitePoolOptions;

async fn storage() -> SchedStorage {
    // One connection so every query sees the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory sqlite");
    let storage = SchedStorage::new(pool);
    storage.init_schema().await.expect("schema init failed");
    storage
}

fn diff(value: serde_json::Value) -> JsonColumn {
    JsonColumn::try_from(value).expect("diff must be a JSON object")
}

#[tokio::test]
async fn audit_trail_json_column_round_trips() {
    let storage = storage().await;
    let changed = diff(json!({"status": "cancelled", "old_status": "confirmed"}));
    let changed_at = Utc.with_ymd_and_hms(2024, 5, 2, 10, 15, 0).unwrap();

    sqlx::query(
        "INSERT INTO audit_trails (table_name, record_id, action, changed_fields, changed_by, changed_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind("appointments")
    .bind(7_i64)
    .bind("update")
    .bind(&changed)
    .bind(3_i64)
    .bind(changed_at)
    .execute(storage.pool())
    .await
    .expect("insert failed");

    let row: AuditTrail = sqlx::query_as("SELECT * FROM audit_trails WHERE record_id = ?")
        .bind(7_i64)
        .fetch_one(storage.pool())
        .await
        .expect("fetch failed");

    assert_eq!(row.changed_fields, changed);
    assert_eq!(row.changed_at, changed_at);

    let stored_type: (String,) =
        sqlx::query_as("SELECT typeof(changed_fields) FROM audit_trails WHERE id = ?")
            .bind(row.id)
            .fetch_one(storage.pool())
            .await
            .expect("typeof failed");
    assert_eq!(stored_type.0, "blob");
}

#[tokio::test]
async fn system_log_defaults_to_empty_objects() {
    let storage = storage().await;
    let new_value = diff(json!({"fee": 40.0, "tags": ["follow-up"]}));

    sqlx::query(
        "INSERT INTO system_logs (timestamp, user_id, user_type, action_type, action_description,
            entity_type, entity_id, new_value, ip_address, user_agent)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(Utc::now())
    .bind(1_i64)
    .bind("admin")
    .bind("create")
    .bind("created consultation")
    .bind("consultation")
    .bind(12_i64)
    .bind(&new_value)
    .bind("127.0.0.1")
    .bind("test-agent")
    .execute(storage.pool())
    .await
    .expect("insert failed");

    let row: SystemLog = sqlx::query_as("SELECT * FROM system_logs")
        .fetch_one(storage.pool())
        .await
        .expect("fetch failed");

    assert!(row.old_value.is_empty());
    assert!(row.additional_info.is_empty());
    assert_eq!(row.new_value, new_value);
}

#[tokio::test]
async fn json_column_rejects_non_blob_storage() {
    let storage = storage().await;

    // Same columns as audit_trails but unconstrained, so any storage class fits.
    sqlx::query(
        "CREATE TABLE scratch_audit (
            id INTEGER PRIMARY KEY, table_name TEXT, record_id INTEGER, action TEXT,
            changed_fields BLOB, changed_by INTEGER, changed_at TEXT)",
    )
    .execute(storage.pool())
    .await
    .expect("scratch table failed");

    for (record_id, literal) in [(1_i64, r#"'{"a": 1}'"#), (2, "42"), (3, "4.5"), (4, "NULL")] {
        sqlx::query(&format!(
            "INSERT INTO scratch_audit (table_name, record_id, action, changed_fields, changed_by, changed_at)
             VALUES ('appointments', {record_id}, 'update', {literal}, 1, '2024-05-02T10:15:00Z')"
        ))
        .execute(storage.pool())
        .await
        .expect("insert failed");

        let err = sqlx::query_as::<_, AuditTrail>("SELECT * FROM scratch_audit WHERE record_id = ?")
            .bind(record_id)
            .fetch_one(storage.pool())
            .await
            .expect_err("non-blob JSON column must not decode");

        assert!(
            matches!(err, sqlx::Error::ColumnDecode { .. }),
            "unexpected error for {literal}: {err:?}"
        );
        assert!(
            err.to_string().contains("unexpected storage representation"),
            "unexpected message for {literal}: {err}"
        );
    }
}

#[tokio::test]
async fn json_column_rejects_malformed_blob() {
    let storage = storage().await;

    sqlx::query(
        "INSERT INTO audit_trails (table_name, record_id, action, changed_fields, changed_by, changed_at)
         VALUES ('appointments', 9, 'update', CAST('{invalid' AS BLOB), 1, '2024-05-02T10:15:00Z')",
    )
    .execute(storage.pool())
    .await
    .expect("insert failed");

    let err = sqlx::query_as::<_, AuditTrail>("SELECT * FROM audit_trails WHERE record_id = 9")
        .fetch_one(storage.pool())
        .await
        .expect_err("malformed JSON must not decode");

    assert!(matches!(err, sqlx::Error::ColumnDecode { .. }), "{err:?}");
    assert!(err.to_string().contains("invalid JSON"), "{err}");
}

#[tokio::test]
async fn appointment_time_columns_round_trip() {
    let storage = storage().await;
    let start: TimeOfDay = "08:00:00".parse().unwrap();
    let end: TimeOfDay = "09:30:00".parse().unwrap();
    let day = Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap();

    sqlx::query(
        "INSERT INTO appointments (patient_id, provider_type, doctor_id, appointment_date,
            start_time, end_time, status, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(5_i64)
    .bind("doctor")
    .bind(Some(2_i64))
    .bind(day)
    .bind(start)
    .bind(end)
    .bind("confirmed")
    .bind(day)
    .bind(day)
    .execute(storage.pool())
    .await
    .expect("insert failed");

    let stored: (String, String) =
        sqlx::query_as("SELECT start_time, end_time FROM appointments WHERE patient_id = 5")
            .fetch_one(storage.pool())
            .await
            .expect("raw fetch failed");
    assert_eq!(stored, ("08:00:00".to_string(), "09:30:00".to_string()));

    let row: Appointment = sqlx::query_as("SELECT * FROM appointments WHERE patient_id = 5")
        .fetch_one(storage.pool())
        .await
        .expect("fetch failed");
    assert_eq!(row.start_time, start);
    assert_eq!(row.end_time, end);
    assert!(row.start_time.before(&row.end_time));
    assert_eq!(row.doctor_id, Some(2));
    assert_eq!(row.home_care_provider_id, None);

    let body = serde_json::to_value(&row).unwrap();
    assert_eq!(body["start_time"], json!("08:00:00"));
    assert_eq!(body["end_time"], json!("09:30:00"));
    assert!(body.get("home_care_provider_id").is_none());
    assert!(body.get("cancellation_reason").is_none());
}

#[tokio::test]
async fn malformed_time_column_fails_to_decode() {
    let storage = storage().await;

    sqlx::query(
        "INSERT INTO doctor_availability (doctor_id, day_of_week, start_time, end_time)
         VALUES (4, 1, '9:00', '17:00:00')",
    )
    .execute(storage.pool())
    .await
    .expect("insert failed");

    let err = sqlx::query_as::<_, DoctorAvailability>("SELECT * FROM doctor_availability")
        .fetch_one(storage.pool())
        .await
        .expect_err("short time must not decode");

    assert!(matches!(err, sqlx::Error::ColumnDecode { .. }), "{err:?}");
    assert!(err.to_string().contains("expected HH:MM:SS"), "{err}");
}

#[test]
fn appointment_payload_rejects_bad_time() {
    let payload = json!({
        "id": 1,
        "patient_id": 5,
        "provider_type": "doctor",
        "appointment_date": "2024-06-03T00:00:00Z",
        "start_time": "25:00:00",
        "end_time": "09:30:00",
        "status": "pending",
        "created_at": "2024-06-01T00:00:00Z",
        "updated_at": "2024-06-01T00:00:00Z"
    });
    let err = serde_json::from_value::<Appointment>(payload).unwrap_err();
    assert!(err.to_string().contains("25:00:00"), "{err}");
}
