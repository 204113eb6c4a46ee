//! `PostgreSQL` repository for listing-to-mentor links.

use super::{models::TaskMentorRow, schema::task_mentors};
use crate::db::{self, PgPool};
use crate::task::{
    domain::{TaskId, TaskMentorLink, TaskMentorLinkId},
    ports::{TaskMentorRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed mentor link repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskMentorRepository {
    pool: PgPool,
}

impl PostgresTaskMentorRepository {
    /// Creates a repository over a shared connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskMentorRepository for PostgresTaskMentorRepository {
    async fn link(&self, link: &TaskMentorLink) -> TaskRepositoryResult<TaskMentorLink> {
        let row = TaskMentorRow {
            id: link.id.into_inner(),
            task_id: link.task_id.into_inner(),
            mentor_id: link.mentor_id.into_inner(),
        };
        let task_id = link.task_id;
        db::run_blocking(&self.pool, move |connection| {
            diesel::insert_into(task_mentors::table)
                .values(&row)
                .on_conflict((task_mentors::task_id, task_mentors::mentor_id))
                .do_nothing()
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskRepositoryError::NotFound(task_id)
                    }
                    other => TaskRepositoryError::persistence(other),
                })?;
            task_mentors::table
                .filter(task_mentors::task_id.eq(row.task_id))
                .filter(task_mentors::mentor_id.eq(row.mentor_id))
                .select(TaskMentorRow::as_select())
                .first::<TaskMentorRow>(connection)
                .map(row_to_link)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn unlink(&self, task_id: TaskId, mentor_id: UserId) -> TaskRepositoryResult<bool> {
        db::run_blocking(&self.pool, move |connection| {
            let deleted = diesel::delete(
                task_mentors::table
                    .filter(task_mentors::task_id.eq(task_id.into_inner()))
                    .filter(task_mentors::mentor_id.eq(mentor_id.into_inner())),
            )
            .execute(connection)
            .map_err(TaskRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn list_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskMentorLink>> {
        db::run_blocking(&self.pool, move |connection| {
            let rows = task_mentors::table
                .filter(task_mentors::task_id.eq(task_id.into_inner()))
                .select(TaskMentorRow::as_select())
                .load::<TaskMentorRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_link).collect())
        })
        .await
    }

    async fn tasks_for_mentor(&self, mentor_id: UserId) -> TaskRepositoryResult<Vec<TaskId>> {
        db::run_blocking(&self.pool, move |connection| {
            let ids = task_mentors::table
                .filter(task_mentors::mentor_id.eq(mentor_id.into_inner()))
                .select(task_mentors::task_id)
                .load::<uuid::Uuid>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(ids.into_iter().map(TaskId::from_uuid).collect())
        })
        .await
    }
}

const fn row_to_link(row: TaskMentorRow) -> TaskMentorLink {
    TaskMentorLink {
        id: TaskMentorLinkId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        mentor_id: UserId::from_uuid(row.mentor_id),
    }
}
