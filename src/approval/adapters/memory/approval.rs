//! In-memory repository for credit requests.

use crate::Page;
use crate::approval::{
    domain::{Approval, ApprovalId},
    ports::{ApprovalRepository, ApprovalRepositoryError, ApprovalRepositoryResult},
};
use crate::task::{
    domain::TaskId,
    ports::{TaskDependents, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory approval repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryApprovalRepository {
    approvals: Arc<RwLock<HashMap<ApprovalId, Approval>>>,
}

impl InMemoryApprovalRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> ApprovalRepositoryError {
    ApprovalRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn newest_first<'a>(approvals: impl Iterator<Item = &'a Approval>) -> Vec<Approval> {
    let mut ordered: Vec<Approval> = approvals.cloned().collect();
    ordered.sort_by(|left, right| {
        right
            .created_at()
            .cmp(&left.created_at())
            .then_with(|| right.id().into_inner().cmp(&left.id().into_inner()))
    });
    ordered
}

#[async_trait]
impl ApprovalRepository for InMemoryApprovalRepository {
    async fn store(&self, approval: &Approval) -> ApprovalRepositoryResult<()> {
        let mut approvals = self.approvals.write().map_err(lock_error)?;
        if approvals.contains_key(&approval.id()) {
            return Err(ApprovalRepositoryError::DuplicateApproval(approval.id()));
        }
        approvals.insert(approval.id(), approval.clone());
        Ok(())
    }

    async fn update(&self, approval: &Approval) -> ApprovalRepositoryResult<()> {
        let mut approvals = self.approvals.write().map_err(lock_error)?;
        let slot = approvals
            .get_mut(&approval.id())
            .ok_or(ApprovalRepositoryError::NotFound(approval.id()))?;
        *slot = approval.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: ApprovalId) -> ApprovalRepositoryResult<Option<Approval>> {
        let approvals = self.approvals.read().map_err(lock_error)?;
        Ok(approvals.get(&id).cloned())
    }

    async fn list(&self, page: Page) -> ApprovalRepositoryResult<Vec<Approval>> {
        let approvals = self.approvals.read().map_err(lock_error)?;
        Ok(page.apply(newest_first(approvals.values())))
    }

    async fn list_for_requester(
        &self,
        student_id: UserId,
    ) -> ApprovalRepositoryResult<Vec<Approval>> {
        let approvals = self.approvals.read().map_err(lock_error)?;
        Ok(newest_first(
            approvals
                .values()
                .filter(|approval| approval.requested_by() == student_id),
        ))
    }
}

#[async_trait]
impl TaskDependents for InMemoryApprovalRepository {
    async fn remove_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<()> {
        let mut approvals = self
            .approvals
            .write()
            .map_err(TaskRepositoryError::poisoned)?;
        approvals.retain(|_, approval| approval.task_id() != task_id);
        Ok(())
    }
}
