//! Diesel row models for project listings.

use super::schema::{task_mentors, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Listing row shared by queries, inserts and full-row updates.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct TaskRow {
    pub id: uuid::Uuid,
    pub title: String,
    pub description: String,
    pub goal: Option<String>,
    pub key_tasks: Option<String>,
    pub novelty: Option<String>,
    pub skills_required: Option<String>,
    pub course_alignment: Option<String>,
    pub diploma_possible: bool,
    pub practice_possible: bool,
    pub course_project_possible: bool,
    pub nda_required: bool,
    pub tags: Option<String>,
    pub status: String,
    pub is_archived: bool,
    pub created_by: uuid::Uuid,
    pub curator_id: Option<uuid::Uuid>,
    pub mentor_id: Option<uuid::Uuid>,
    pub deadline: Option<DateTime<Utc>>,
    pub visibility: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mentor link row.
#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_mentors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskMentorRow {
    pub id: uuid::Uuid,
    pub task_id: uuid::Uuid,
    pub mentor_id: uuid::Uuid,
}
