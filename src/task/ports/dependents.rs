//! Port for stores holding rows that reference a listing.

use super::TaskRepositoryResult;
use crate::task::domain::TaskId;
use async_trait::async_trait;

/// Removal of rows attached to a deleted listing.
///
/// Stores backed by foreign keys with `ON DELETE CASCADE` need no
/// implementation; process-local stores register one with the catalogue.
#[async_trait]
pub trait TaskDependents: Send + Sync {
    /// Removes every row that belongs to `task_id`.
    async fn remove_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<()>;
}
