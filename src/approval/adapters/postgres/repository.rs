//! `PostgreSQL` repository implementation for credit requests.

use super::{models::ApprovalRow, schema::approvals};
use crate::Page;
use crate::approval::{
    domain::{Approval, ApprovalId, ApprovalKind, ApprovalState, PersistedApprovalData},
    ports::{ApprovalRepository, ApprovalRepositoryError, ApprovalRepositoryResult},
};
use crate::db::{self, PgPool};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed approval repository.
#[derive(Debug, Clone)]
pub struct PostgresApprovalRepository {
    pool: PgPool,
}

impl PostgresApprovalRepository {
    /// Creates a repository over a shared connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApprovalRepository for PostgresApprovalRepository {
    async fn store(&self, approval: &Approval) -> ApprovalRepositoryResult<()> {
        let row = to_row(approval);
        let id = approval.id();
        db::run_blocking(&self.pool, move |connection| {
            diesel::insert_into(approvals::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ApprovalRepositoryError::DuplicateApproval(id)
                    }
                    other => ApprovalRepositoryError::persistence(other),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, approval: &Approval) -> ApprovalRepositoryResult<()> {
        let row = to_row(approval);
        let id = approval.id();
        db::run_blocking(&self.pool, move |connection| {
            let updated = diesel::update(approvals::table.filter(approvals::id.eq(id.into_inner())))
                .set(&row)
                .execute(connection)
                .map_err(ApprovalRepositoryError::persistence)?;
            if updated == 0 {
                return Err(ApprovalRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ApprovalId) -> ApprovalRepositoryResult<Option<Approval>> {
        db::run_blocking(&self.pool, move |connection| {
            approvals::table
                .filter(approvals::id.eq(id.into_inner()))
                .select(ApprovalRow::as_select())
                .first::<ApprovalRow>(connection)
                .optional()
                .map_err(ApprovalRepositoryError::persistence)?
                .map(row_to_approval)
                .transpose()
        })
        .await
    }

    async fn list(&self, page: Page) -> ApprovalRepositoryResult<Vec<Approval>> {
        db::run_blocking(&self.pool, move |connection| {
            approvals::table
                .order((approvals::created_at.desc(), approvals::id.desc()))
                .offset(page.offset_i64())
                .limit(page.limit_i64())
                .select(ApprovalRow::as_select())
                .load::<ApprovalRow>(connection)
                .map_err(ApprovalRepositoryError::persistence)?
                .into_iter()
                .map(row_to_approval)
                .collect()
        })
        .await
    }

    async fn list_for_requester(
        &self,
        student_id: UserId,
    ) -> ApprovalRepositoryResult<Vec<Approval>> {
        db::run_blocking(&self.pool, move |connection| {
            approvals::table
                .filter(approvals::requested_by.eq(student_id.into_inner()))
                .order((approvals::created_at.desc(), approvals::id.desc()))
                .select(ApprovalRow::as_select())
                .load::<ApprovalRow>(connection)
                .map_err(ApprovalRepositoryError::persistence)?
                .into_iter()
                .map(row_to_approval)
                .collect()
        })
        .await
    }
}

fn to_row(approval: &Approval) -> ApprovalRow {
    ApprovalRow {
        id: approval.id().into_inner(),
        task_id: approval.task_id().into_inner(),
        kind: approval.kind().as_str().to_owned(),
        state: approval.state().as_str().to_owned(),
        requested_by: approval.requested_by().into_inner(),
        reviewer_id: approval.reviewer_id().map(UserId::into_inner),
        comment: approval.comment().map(str::to_owned),
        created_at: approval.created_at(),
        updated_at: approval.updated_at(),
    }
}

fn row_to_approval(row: ApprovalRow) -> ApprovalRepositoryResult<Approval> {
    let kind =
        ApprovalKind::try_from(row.kind.as_str()).map_err(ApprovalRepositoryError::persistence)?;
    let state =
        ApprovalState::try_from(row.state.as_str()).map_err(ApprovalRepositoryError::persistence)?;
    Ok(Approval::from_persisted(PersistedApprovalData {
        id: ApprovalId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        kind,
        state,
        requested_by: UserId::from_uuid(row.requested_by),
        reviewer_id: row.reviewer_id.map(UserId::from_uuid),
        comment: row.comment,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
