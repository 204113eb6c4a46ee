//! Repository port for credit requests.

use crate::Page;
use crate::approval::domain::{Approval, ApprovalId};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for approval repository operations.
pub type ApprovalRepositoryResult<T> = Result<T, ApprovalRepositoryError>;

/// Credit request persistence contract.
#[async_trait]
pub trait ApprovalRepository: Send + Sync {
    /// Stores a new request.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalRepositoryError::DuplicateApproval`] when the
    /// identifier already exists.
    async fn store(&self, approval: &Approval) -> ApprovalRepositoryResult<()>;

    /// Persists changes to an existing request.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalRepositoryError::NotFound`] when it does not exist.
    async fn update(&self, approval: &Approval) -> ApprovalRepositoryResult<()>;

    /// Finds a request by identifier.
    async fn find_by_id(&self, id: ApprovalId) -> ApprovalRepositoryResult<Option<Approval>>;

    /// Lists every request, newest first.
    async fn list(&self, page: Page) -> ApprovalRepositoryResult<Vec<Approval>>;

    /// Lists one student's requests, newest first.
    async fn list_for_requester(
        &self,
        student_id: UserId,
    ) -> ApprovalRepositoryResult<Vec<Approval>>;
}

/// Errors returned by approval repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ApprovalRepositoryError {
    /// A request with the same identifier already exists.
    #[error("duplicate approval identifier: {0}")]
    DuplicateApproval(ApprovalId),

    /// The request was not found.
    #[error("approval not found: {0}")]
    NotFound(ApprovalId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ApprovalRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<crate::db::DbError> for ApprovalRepositoryError {
    fn from(err: crate::db::DbError) -> Self {
        Self::persistence(err)
    }
}
