//! Diesel row model for student applications.

use super::schema::assignments;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Assignment row shared by queries, inserts and full-row updates.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = assignments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct AssignmentRow {
    pub id: uuid::Uuid,
    pub task_id: uuid::Uuid,
    pub student_id: uuid::Uuid,
    pub state: String,
    pub nda_accepted: bool,
    pub team_role: Option<String>,
    pub decision_at: Option<DateTime<Utc>>,
    pub decision_by: Option<uuid::Uuid>,
    pub decision_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
