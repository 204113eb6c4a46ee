//! Submitting, reviewing and resubmitting credit requests.

use crate::Page;
use crate::approval::{
    domain::{Approval, ApprovalDomainError, ApprovalId, ApprovalKind, ApprovalState},
    ports::{ApprovalRepository, ApprovalRepositoryError},
};
use crate::audit::{
    domain::{AuditAction, EntityKind, EntityRef},
    ports::AuditRepository,
    services::AuditTrail,
};
use crate::task::{
    domain::TaskId,
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::domain::{AccessDenied, Actor, Role, UserId};
use mockable::Clock;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for credit requests.
#[derive(Debug, Error)]
pub enum ApprovalError {
    /// Lifecycle rule failed.
    #[error(transparent)]
    Domain(#[from] ApprovalDomainError),

    /// Approval repository failure.
    #[error(transparent)]
    Repository(ApprovalRepositoryError),

    /// Task repository failure.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// The actor lacks the required role or does not own the request.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    /// The listing does not exist.
    #[error("Task not found")]
    TaskNotFound(TaskId),

    /// The request does not exist.
    #[error("Approval not found")]
    NotFound(ApprovalId),

    /// The listing cannot count towards the requested credit.
    #[error("Project does not offer {0} credit")]
    NotOffered(ApprovalKind),
}

impl From<ApprovalRepositoryError> for ApprovalError {
    fn from(err: ApprovalRepositoryError) -> Self {
        match err {
            ApprovalRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for credit request operations.
pub type ApprovalResult<T> = Result<T, ApprovalError>;

/// Credit request service.
pub struct ApprovalService<P, T, L, C>
where
    P: ApprovalRepository + ?Sized,
    T: TaskRepository + ?Sized,
    L: AuditRepository + ?Sized,
    C: Clock + Send + Sync,
{
    approvals: Arc<P>,
    tasks: Arc<T>,
    audit: AuditTrail<L, C>,
    clock: Arc<C>,
}

impl<P, T, L, C> ApprovalService<P, T, L, C>
where
    P: ApprovalRepository + ?Sized,
    T: TaskRepository + ?Sized,
    L: AuditRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new approval service.
    #[must_use]
    pub fn new(approvals: Arc<P>, tasks: Arc<T>, audit: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            approvals,
            tasks,
            audit: AuditTrail::new(audit, Arc::clone(&clock)),
            clock,
        }
    }

    /// Files a credit request for the acting student.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Forbidden`] for non-students,
    /// [`ApprovalError::TaskNotFound`] or [`ApprovalError::NotOffered`].
    pub async fn submit(
        &self,
        actor: Actor,
        task_id: TaskId,
        kind: ApprovalKind,
        comment: Option<String>,
    ) -> ApprovalResult<Approval> {
        actor.require_any(&[Role::Student])?;
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(ApprovalError::TaskNotFound(task_id))?;
        if !kind.is_offered_by(task.credits()) {
            return Err(ApprovalError::NotOffered(kind));
        }

        let approval = Approval::new(task_id, kind, actor.id, comment, &*self.clock);
        self.approvals.store(&approval).await?;
        self.audit
            .record(
                Some(actor.id),
                AuditAction::ApprovalSubmitted,
                approval_ref(approval.id()),
                json!({ "task_id": task_id, "type": kind.as_str() }),
            )
            .await;
        info!(
            approval_id = %approval.id(),
            task_id = %task_id,
            kind = kind.as_str(),
            "credit request submitted"
        );
        Ok(approval)
    }

    /// Records a university reviewer's decision.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Forbidden`] for non-university roles,
    /// [`ApprovalError::NotFound`] or a domain error for a closed request.
    pub async fn review(
        &self,
        actor: Actor,
        id: ApprovalId,
        decision: ApprovalState,
        comment: Option<String>,
    ) -> ApprovalResult<Approval> {
        actor.require_any(&Role::UNIVERSITY)?;
        let mut approval = self.find(id).await?;
        approval.review(decision, actor.id, comment, &*self.clock)?;
        self.approvals.update(&approval).await?;
        self.audit
            .record(
                Some(actor.id),
                AuditAction::ApprovalUpdated,
                approval_ref(id),
                json!({ "state": decision.as_str() }),
            )
            .await;
        info!(
            approval_id = %id,
            state = decision.as_str(),
            reviewer = %actor.id,
            "credit request reviewed"
        );
        Ok(approval)
    }

    /// Resubmits a request that was returned for changes.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Forbidden`] unless the actor filed the
    /// request, or a domain error unless it needs changes.
    pub async fn resubmit(
        &self,
        actor: Actor,
        id: ApprovalId,
        comment: Option<String>,
    ) -> ApprovalResult<Approval> {
        let mut approval = self.find(id).await?;
        if approval.requested_by() != actor.id {
            return Err(AccessDenied.into());
        }
        approval.resubmit(comment, &*self.clock)?;
        self.approvals.update(&approval).await?;
        info!(approval_id = %id, "credit request resubmitted");
        Ok(approval)
    }

    /// Finds a request.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::NotFound`].
    pub async fn find(&self, id: ApprovalId) -> ApprovalResult<Approval> {
        self.approvals
            .find_by_id(id)
            .await?
            .ok_or(ApprovalError::NotFound(id))
    }

    /// Lists every request for university reviewers, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Forbidden`] for non-university roles.
    pub async fn list_all(&self, actor: Actor, page: Page) -> ApprovalResult<Vec<Approval>> {
        actor.require_any(&Role::UNIVERSITY)?;
        Ok(self.approvals.list(page).await?)
    }

    /// Lists the requests a student filed, newest first.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn list_mine(&self, student_id: UserId) -> ApprovalResult<Vec<Approval>> {
        Ok(self.approvals.list_for_requester(student_id).await?)
    }
}

const fn approval_ref(id: ApprovalId) -> EntityRef {
    EntityRef::new(EntityKind::Approval, id.into_inner())
}
