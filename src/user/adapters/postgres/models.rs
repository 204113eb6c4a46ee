//! Diesel row models for user accounts.

use super::schema::users;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row shape shared by queries, inserts and full-row updates.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct UserRow {
    pub id: uuid::Uuid,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
    pub status: String,
    pub avatar_url: Option<String>,
    pub faculty: Option<String>,
    pub skills: Option<String>,
    pub about: Option<String>,
    pub course: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub is_deleted: bool,
    pub token_version: i32,
    pub last_active_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
