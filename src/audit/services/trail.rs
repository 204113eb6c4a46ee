//! Best-effort recording of business actions.

use crate::audit::{
    domain::{AuditAction, AuditEntry, EntityRef},
    ports::{AuditRepository, AuditRepositoryResult},
};
use crate::user::domain::UserId;
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// Records audit entries on behalf of other services.
///
/// Recording never fails the calling operation: persistence errors are
/// logged and dropped.
pub struct AuditTrail<L, C>
where
    L: AuditRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<L>,
    clock: Arc<C>,
}

impl<L, C> AuditTrail<L, C>
where
    L: AuditRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a trail over the given repository.
    #[must_use]
    pub const fn new(repository: Arc<L>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Records an action, logging and discarding any persistence failure.
    pub async fn record(
        &self,
        actor_id: Option<UserId>,
        action: AuditAction,
        entity: EntityRef,
        metadata: Value,
    ) {
        let entry = AuditEntry::new(actor_id, action, entity, metadata, &*self.clock);
        if let Err(err) = self.repository.record(&entry).await {
            warn!(
                action = action.as_str(),
                entity_kind = entity.kind.as_str(),
                entity_id = %entity.id,
                error = %err,
                "failed to record audit entry"
            );
        }
    }

    /// Lists entries for one entity, oldest first.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the lookup fails.
    pub async fn list_for_entity(
        &self,
        entity: EntityRef,
    ) -> AuditRepositoryResult<Vec<AuditEntry>> {
        self.repository.list_for_entity(entity).await
    }

    /// Lists the most recent entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the lookup fails.
    pub async fn list_recent(&self, limit: usize) -> AuditRepositoryResult<Vec<AuditEntry>> {
        self.repository.list_recent(limit).await
    }
}
