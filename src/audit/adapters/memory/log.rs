//! Append-only in-memory audit log.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::audit::{
    domain::{AuditEntry, EntityRef},
    ports::{AuditRepository, AuditRepositoryError, AuditRepositoryResult},
};

/// Thread-safe in-memory audit log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuditRepository {
    entries: Arc<RwLock<Vec<AuditEntry>>>,
}

impl InMemoryAuditRepository {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> AuditRepositoryError {
    AuditRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl AuditRepository for InMemoryAuditRepository {
    async fn record(&self, entry: &AuditEntry) -> AuditRepositoryResult<()> {
        let mut entries = self.entries.write().map_err(lock_error)?;
        entries.push(entry.clone());
        Ok(())
    }

    async fn list_for_entity(&self, entity: EntityRef) -> AuditRepositoryResult<Vec<AuditEntry>> {
        let entries = self.entries.read().map_err(lock_error)?;
        Ok(entries
            .iter()
            .filter(|entry| entry.entity == entity)
            .cloned()
            .collect())
    }

    async fn list_recent(&self, limit: usize) -> AuditRepositoryResult<Vec<AuditEntry>> {
        let entries = self.entries.read().map_err(lock_error)?;
        Ok(entries.iter().rev().take(limit).cloned().collect())
    }
}
