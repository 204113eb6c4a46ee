//! Diesel row models for audit entries.

use super::schema::audit_logs;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query and insert row for audit entries.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = audit_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AuditRow {
    pub id: uuid::Uuid,
    pub actor_id: Option<uuid::Uuid>,
    pub action: String,
    pub entity_kind: String,
    pub entity_id: uuid::Uuid,
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}
