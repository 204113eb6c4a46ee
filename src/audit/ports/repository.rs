//! Repository port for audit entries.

use crate::audit::domain::{AuditEntry, EntityRef};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for audit repository operations.
pub type AuditRepositoryResult<T> = Result<T, AuditRepositoryError>;

/// Audit persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Appends an entry.
    async fn record(&self, entry: &AuditEntry) -> AuditRepositoryResult<()>;

    /// Lists entries for one entity, oldest first.
    async fn list_for_entity(&self, entity: EntityRef) -> AuditRepositoryResult<Vec<AuditEntry>>;

    /// Lists the most recent entries, newest first.
    async fn list_recent(&self, limit: usize) -> AuditRepositoryResult<Vec<AuditEntry>>;
}

/// Errors returned by audit repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AuditRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AuditRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<crate::db::DbError> for AuditRepositoryError {
    fn from(err: crate::db::DbError) -> Self {
        Self::persistence(err)
    }
}
