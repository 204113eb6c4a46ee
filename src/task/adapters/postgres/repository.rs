//! `PostgreSQL` repository implementation for project listings.

use super::{models::TaskRow, schema::tasks};
use crate::db::{self, PgPool};
use crate::task::{
    domain::{
        CreditOptions, PersistedTaskData, Tags, Task, TaskDescription, TaskDetails, TaskFilter,
        TaskId, TaskScope, TaskStatus, TaskTitle, Visibility,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult, TaskStatusCounts},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed listing repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a repository over a shared connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let row = to_row(task);
        let task_id = task.id();
        db::run_blocking(&self.pool, move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    other => TaskRepositoryError::persistence(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let row = to_row(task);
        let task_id = task.id();
        db::run_blocking(&self.pool, move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                .set(&row)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        db::run_blocking(&self.pool, move |connection| {
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        db::run_blocking(&self.pool, move |connection| {
            tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?
                .map(row_to_task)
                .transpose()
        })
        .await
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let criteria = filter.clone();
        db::run_blocking(&self.pool, move |connection| {
            let page = criteria.query.page();
            let mut query = tasks::table.into_boxed::<Pg>();

            query = match criteria.scope {
                TaskScope::All => query,
                TaskScope::CuratedBy(user) => {
                    let curator = user.into_inner();
                    query.filter(
                        tasks::created_by
                            .eq(curator)
                            .or(tasks::curator_id.eq(Some(curator))),
                    )
                }
                TaskScope::MentoredBy { mentor, linked } => {
                    let linked_ids: Vec<uuid::Uuid> =
                        linked.into_iter().map(TaskId::into_inner).collect();
                    query.filter(
                        tasks::mentor_id
                            .eq(Some(mentor.into_inner()))
                            .or(tasks::id.eq_any(linked_ids)),
                    )
                }
                TaskScope::PublicActive => query
                    .filter(tasks::visibility.eq(Visibility::Public.as_str()))
                    .filter(tasks::status.eq_any([
                        TaskStatus::Open.as_str(),
                        TaskStatus::InProgress.as_str(),
                    ]))
                    .filter(tasks::is_archived.eq(false)),
            };

            if let Some(status) = criteria.query.status {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            if let Some(tag) = criteria.query.tag.as_deref() {
                query = query.filter(tasks::tags.ilike(contains_pattern(tag)));
            }
            if let Some(needle) = criteria.query.q.as_deref() {
                query = query.filter(tasks::title.ilike(contains_pattern(needle)));
            }

            query
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .offset(page.offset_i64())
                .limit(page.limit_i64())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?
                .into_iter()
                .map(row_to_task)
                .collect()
        })
        .await
    }

    async fn status_counts(&self) -> TaskRepositoryResult<TaskStatusCounts> {
        db::run_blocking(&self.pool, move |connection| {
            let rows = tasks::table
                .group_by(tasks::status)
                .select((tasks::status, count_star()))
                .load::<(String, i64)>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter()
                .map(|(status, count)| {
                    let parsed = TaskStatus::try_from(status.as_str())
                        .map_err(TaskRepositoryError::persistence)?;
                    Ok((parsed, u64::try_from(count).unwrap_or_default()))
                })
                .collect()
        })
        .await
    }
}

/// Builds an `ILIKE` pattern matching `needle` anywhere, with wildcards in
/// the needle escaped.
fn contains_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn to_row(task: &Task) -> TaskRow {
    let details = task.details().clone();
    let credits = task.credits();
    TaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().as_str().to_owned(),
        goal: details.goal,
        key_tasks: details.key_tasks,
        novelty: details.novelty,
        skills_required: details.skills_required,
        course_alignment: details.course_alignment,
        diploma_possible: credits.diploma_possible,
        practice_possible: credits.practice_possible,
        course_project_possible: credits.course_project_possible,
        nda_required: task.nda_required(),
        tags: task.tags().as_deref().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        is_archived: task.is_archived(),
        created_by: task.created_by().into_inner(),
        curator_id: task.curator_id().map(UserId::into_inner),
        mentor_id: task.mentor_id().map(UserId::into_inner),
        deadline: task.deadline(),
        visibility: task.visibility().as_str().to_owned(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let title = TaskTitle::new(row.title).map_err(TaskRepositoryError::persistence)?;
    let description =
        TaskDescription::new(row.description).map_err(TaskRepositoryError::persistence)?;
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let visibility =
        Visibility::try_from(row.visibility.as_str()).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        title,
        description,
        details: TaskDetails {
            goal: row.goal,
            key_tasks: row.key_tasks,
            novelty: row.novelty,
            skills_required: row.skills_required,
            course_alignment: row.course_alignment,
        },
        credits: CreditOptions {
            diploma_possible: row.diploma_possible,
            practice_possible: row.practice_possible,
            course_project_possible: row.course_project_possible,
        },
        nda_required: row.nda_required,
        tags: Tags::new(row.tags),
        status,
        is_archived: row.is_archived,
        created_by: UserId::from_uuid(row.created_by),
        curator_id: row.curator_id.map(UserId::from_uuid),
        mentor_id: row.mentor_id.map(UserId::from_uuid),
        deadline: row.deadline,
        visibility,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
