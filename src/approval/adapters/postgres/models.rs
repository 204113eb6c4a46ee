//! Diesel row model for credit requests.

use super::schema::approvals;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Approval row shared by queries, inserts and full-row updates.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = approvals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct ApprovalRow {
    pub id: uuid::Uuid,
    pub task_id: uuid::Uuid,
    pub kind: String,
    pub state: String,
    pub requested_by: uuid::Uuid,
    pub reviewer_id: Option<uuid::Uuid>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
