//! `PostgreSQL` repository implementation for discussion entries.

use super::{models::CommentRow, schema::comments};
use crate::Page;
use crate::comment::{
    domain::{Comment, CommentBody, CommentId, PersistedCommentData},
    ports::{CommentRepository, CommentRepositoryError, CommentRepositoryResult},
};
use crate::db::{self, PgPool};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed comment repository.
#[derive(Debug, Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    /// Creates a repository over a shared connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let row = to_row(comment);
        let id = comment.id();
        db::run_blocking(&self.pool, move |connection| {
            diesel::insert_into(comments::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        CommentRepositoryError::DuplicateComment(id)
                    }
                    other => CommentRepositoryError::persistence(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let row = to_row(comment);
        let id = comment.id();
        db::run_blocking(&self.pool, move |connection| {
            let updated = diesel::update(comments::table.filter(comments::id.eq(id.into_inner())))
                .set(&row)
                .execute(connection)
                .map_err(CommentRepositoryError::persistence)?;
            if updated == 0 {
                return Err(CommentRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: CommentId) -> CommentRepositoryResult<bool> {
        db::run_blocking(&self.pool, move |connection| {
            let deleted = diesel::delete(comments::table.filter(comments::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(CommentRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn find_by_id(&self, id: CommentId) -> CommentRepositoryResult<Option<Comment>> {
        db::run_blocking(&self.pool, move |connection| {
            comments::table
                .filter(comments::id.eq(id.into_inner()))
                .select(CommentRow::as_select())
                .first::<CommentRow>(connection)
                .optional()
                .map_err(CommentRepositoryError::persistence)?
                .map(row_to_comment)
                .transpose()
        })
        .await
    }

    async fn list_for_task(
        &self,
        task_id: TaskId,
        include_private: bool,
        page: Page,
    ) -> CommentRepositoryResult<Vec<Comment>> {
        db::run_blocking(&self.pool, move |connection| {
            let mut query = comments::table
                .filter(comments::task_id.eq(task_id.into_inner()))
                .into_boxed::<Pg>();
            if !include_private {
                query = query.filter(comments::is_private.eq(false));
            }
            query
                .order((comments::created_at.desc(), comments::id.desc()))
                .offset(page.offset_i64())
                .limit(page.limit_i64())
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)
                .map_err(CommentRepositoryError::persistence)?
                .into_iter()
                .map(row_to_comment)
                .collect()
        })
        .await
    }
}

fn to_row(comment: &Comment) -> CommentRow {
    CommentRow {
        id: comment.id().into_inner(),
        task_id: comment.task_id().into_inner(),
        author_id: comment.author_id().into_inner(),
        body: comment.body().as_str().to_owned(),
        is_private: comment.is_private(),
        recipient_id: comment.recipient_id().map(UserId::into_inner),
        meeting_info: comment.meeting_info().map(str::to_owned),
        created_at: comment.created_at(),
    }
}

fn row_to_comment(row: CommentRow) -> CommentRepositoryResult<Comment> {
    let body = CommentBody::new(row.body).map_err(CommentRepositoryError::persistence)?;
    Ok(Comment::from_persisted(PersistedCommentData {
        id: CommentId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        author_id: UserId::from_uuid(row.author_id),
        body,
        is_private: row.is_private,
        recipient_id: row.recipient_id.map(UserId::from_uuid),
        meeting_info: row.meeting_info,
        created_at: row.created_at,
    }))
}
