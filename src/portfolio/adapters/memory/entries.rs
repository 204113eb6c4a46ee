//! In-memory repository for portfolio entries.

use crate::portfolio::{
    domain::PortfolioEntry,
    ports::{PortfolioRepository, PortfolioRepositoryError, PortfolioRepositoryResult},
};
use crate::task::{
    domain::TaskId,
    ports::{TaskDependents, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory portfolio repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPortfolioRepository {
    entries: Arc<RwLock<Vec<PortfolioEntry>>>,
}

impl InMemoryPortfolioRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> PortfolioRepositoryError {
    PortfolioRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl PortfolioRepository for InMemoryPortfolioRepository {
    async fn record(&self, entry: &PortfolioEntry) -> PortfolioRepositoryResult<PortfolioEntry> {
        let mut entries = self.entries.write().map_err(lock_error)?;
        if let Some(existing) = entries
            .iter()
            .find(|candidate| candidate.assignment_id == entry.assignment_id)
        {
            return Ok(existing.clone());
        }
        entries.push(entry.clone());
        Ok(entry.clone())
    }

    async fn list_for_student(
        &self,
        student_id: UserId,
    ) -> PortfolioRepositoryResult<Vec<PortfolioEntry>> {
        let entries = self.entries.read().map_err(lock_error)?;
        let mut owned: Vec<PortfolioEntry> = entries
            .iter()
            .filter(|entry| entry.student_id == student_id)
            .cloned()
            .collect();
        owned.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(owned)
    }
}

#[async_trait]
impl TaskDependents for InMemoryPortfolioRepository {
    async fn remove_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<()> {
        let mut entries = self.entries.write().map_err(TaskRepositoryError::poisoned)?;
        entries.retain(|entry| entry.task_id != task_id);
        Ok(())
    }
}
