//! Repository port for listing-to-mentor links.

use super::TaskRepositoryResult;
use crate::task::domain::{TaskId, TaskMentorLink};
use crate::user::domain::UserId;
use async_trait::async_trait;

/// Mentor link persistence contract.
#[async_trait]
pub trait TaskMentorRepository: Send + Sync {
    /// Stores a link, returning the existing one when the pair is already
    /// linked.
    async fn link(&self, link: &TaskMentorLink) -> TaskRepositoryResult<TaskMentorLink>;

    /// Removes the link for the pair; returns whether one existed.
    async fn unlink(&self, task_id: TaskId, mentor_id: UserId) -> TaskRepositoryResult<bool>;

    /// Lists links for a listing.
    async fn list_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskMentorLink>>;

    /// Lists listings a mentor is linked to.
    async fn tasks_for_mentor(&self, mentor_id: UserId) -> TaskRepositoryResult<Vec<TaskId>>;
}
