//! Diesel row model for discussion entries.

use super::schema::comments;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Comment row shared by queries, inserts and full-row updates.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct CommentRow {
    pub id: uuid::Uuid,
    pub task_id: uuid::Uuid,
    pub author_id: uuid::Uuid,
    pub body: String,
    pub is_private: bool,
    pub recipient_id: Option<uuid::Uuid>,
    pub meeting_info: Option<String>,
    pub created_at: DateTime<Utc>,
}
