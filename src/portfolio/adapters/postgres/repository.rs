//! `PostgreSQL` repository implementation for portfolio entries.

use super::schema::portfolio_entries;
use crate::assignment::domain::AssignmentId;
use crate::db::{self, PgPool};
use crate::portfolio::{
    domain::{PortfolioEntry, PortfolioEntryId},
    ports::{PortfolioRepository, PortfolioRepositoryError, PortfolioRepositoryResult},
};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Portfolio row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = portfolio_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct PortfolioRow {
    id: uuid::Uuid,
    student_id: uuid::Uuid,
    task_id: uuid::Uuid,
    assignment_id: uuid::Uuid,
    summary: String,
    created_at: DateTime<Utc>,
}

impl From<PortfolioRow> for PortfolioEntry {
    fn from(row: PortfolioRow) -> Self {
        Self {
            id: PortfolioEntryId::from_uuid(row.id),
            student_id: UserId::from_uuid(row.student_id),
            task_id: TaskId::from_uuid(row.task_id),
            assignment_id: AssignmentId::from_uuid(row.assignment_id),
            summary: row.summary,
            created_at: row.created_at,
        }
    }
}

/// `PostgreSQL`-backed portfolio repository.
#[derive(Debug, Clone)]
pub struct PostgresPortfolioRepository {
    pool: PgPool,
}

impl PostgresPortfolioRepository {
    /// Creates a repository over a shared connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PortfolioRepository for PostgresPortfolioRepository {
    async fn record(&self, entry: &PortfolioEntry) -> PortfolioRepositoryResult<PortfolioEntry> {
        let row = PortfolioRow {
            id: entry.id.into_inner(),
            student_id: entry.student_id.into_inner(),
            task_id: entry.task_id.into_inner(),
            assignment_id: entry.assignment_id.into_inner(),
            summary: entry.summary.clone(),
            created_at: entry.created_at,
        };
        db::run_blocking(&self.pool, move |connection| {
            diesel::insert_into(portfolio_entries::table)
                .values(&row)
                .on_conflict(portfolio_entries::assignment_id)
                .do_nothing()
                .execute(connection)
                .map_err(PortfolioRepositoryError::persistence)?;
            portfolio_entries::table
                .filter(portfolio_entries::assignment_id.eq(row.assignment_id))
                .select(PortfolioRow::as_select())
                .first::<PortfolioRow>(connection)
                .map(PortfolioEntry::from)
                .map_err(PortfolioRepositoryError::persistence)
        })
        .await
    }

    async fn list_for_student(
        &self,
        student_id: UserId,
    ) -> PortfolioRepositoryResult<Vec<PortfolioEntry>> {
        db::run_blocking(&self.pool, move |connection| {
            let rows = portfolio_entries::table
                .filter(portfolio_entries::student_id.eq(student_id.into_inner()))
                .order(portfolio_entries::created_at.desc())
                .select(PortfolioRow::as_select())
                .load::<PortfolioRow>(connection)
                .map_err(PortfolioRepositoryError::persistence)?;
            Ok(rows.into_iter().map(PortfolioEntry::from).collect())
        })
        .await
    }
}
