//! `PostgreSQL` repository implementation for the audit trail.

use super::{models::AuditRow, schema::audit_logs};
use crate::Page;
use crate::audit::{
    domain::{AuditAction, AuditEntry, AuditEntryId, EntityKind, EntityRef},
    ports::{AuditRepository, AuditRepositoryError, AuditRepositoryResult},
};
use crate::db::{self, PgPool};
use crate::user::domain::UserId;
use async_trait::async_trait;
use diesel::prelude::*;

/// `PostgreSQL`-backed audit log.
#[derive(Debug, Clone)]
pub struct PostgresAuditRepository {
    pool: PgPool,
}

impl PostgresAuditRepository {
    /// Creates a repository over a shared connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditRepository for PostgresAuditRepository {
    async fn record(&self, entry: &AuditEntry) -> AuditRepositoryResult<()> {
        let row = AuditRow {
            id: entry.id.into_inner(),
            actor_id: entry.actor_id.map(UserId::into_inner),
            action: entry.action.as_str().to_owned(),
            entity_kind: entry.entity.kind.as_str().to_owned(),
            entity_id: entry.entity.id,
            metadata: entry.metadata.clone(),
            created_at: entry.created_at,
        };
        db::run_blocking(&self.pool, move |connection| {
            diesel::insert_into(audit_logs::table)
                .values(&row)
                .execute(connection)
                .map_err(AuditRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn list_for_entity(&self, entity: EntityRef) -> AuditRepositoryResult<Vec<AuditEntry>> {
        db::run_blocking(&self.pool, move |connection| {
            audit_logs::table
                .filter(audit_logs::entity_kind.eq(entity.kind.as_str()))
                .filter(audit_logs::entity_id.eq(entity.id))
                .order(audit_logs::created_at.asc())
                .select(AuditRow::as_select())
                .load::<AuditRow>(connection)
                .map_err(AuditRepositoryError::persistence)?
                .into_iter()
                .map(row_to_entry)
                .collect()
        })
        .await
    }

    async fn list_recent(&self, limit: usize) -> AuditRepositoryResult<Vec<AuditEntry>> {
        let window = Page::new(0, limit);
        db::run_blocking(&self.pool, move |connection| {
            audit_logs::table
                .order(audit_logs::created_at.desc())
                .limit(window.limit_i64())
                .select(AuditRow::as_select())
                .load::<AuditRow>(connection)
                .map_err(AuditRepositoryError::persistence)?
                .into_iter()
                .map(row_to_entry)
                .collect()
        })
        .await
    }
}

fn row_to_entry(row: AuditRow) -> AuditRepositoryResult<AuditEntry> {
    let action =
        AuditAction::try_from(row.action.as_str()).map_err(AuditRepositoryError::persistence)?;
    let kind =
        EntityKind::try_from(row.entity_kind.as_str()).map_err(AuditRepositoryError::persistence)?;
    Ok(AuditEntry {
        id: AuditEntryId::from_uuid(row.id),
        actor_id: row.actor_id.map(UserId::from_uuid),
        action,
        entity: EntityRef::new(kind, row.entity_id),
        metadata: row.metadata,
        created_at: row.created_at,
    })
}
