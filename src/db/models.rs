use crate::types::{JsonColumn, TimeOfDay};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub provider_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_care_provider_id: Option<i64>,
    pub appointment_date: DateTime<Utc>,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Weekly slot in which a doctor takes appointments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DoctorAvailability {
    pub id: i64,
    pub doctor_id: i64,
    pub day_of_week: i64,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct AuditTrail {
    pub id: i64,
    pub table_name: String,
    pub record_id: i64,
    pub action: String,
    pub changed_fields: JsonColumn,
    pub changed_by: i64,
    pub changed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct SystemLog {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub user_id: i64,
    pub user_type: String,
    pub action_type: String,
    pub action_description: String,
    pub entity_type: String,
    pub entity_id: i64,
    pub old_value: JsonColumn,
    pub new_value: JsonColumn,
    pub ip_address: String,
    pub user_agent: String,
    pub additional_info: JsonColumn,
}
