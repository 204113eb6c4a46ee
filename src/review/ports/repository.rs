//! Repository port for reviews.

use crate::assignment::domain::AssignmentId;
use crate::review::domain::Review;
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for review repository operations.
pub type ReviewRepositoryResult<T> = Result<T, ReviewRepositoryError>;

/// Review persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Stores a new review.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewRepositoryError::DuplicateReview`] when the assignment
    /// was already reviewed.
    async fn store(&self, review: &Review) -> ReviewRepositoryResult<()>;

    /// Finds the review of an assignment.
    async fn find_by_assignment(
        &self,
        assignment_id: AssignmentId,
    ) -> ReviewRepositoryResult<Option<Review>>;

    /// Lists reviews of a student, newest first.
    async fn list_for_student(&self, student_id: UserId) -> ReviewRepositoryResult<Vec<Review>>;
}

/// Errors returned by review repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ReviewRepositoryError {
    /// The assignment already has a review.
    #[error("assignment already reviewed: {0}")]
    DuplicateReview(AssignmentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ReviewRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<crate::db::DbError> for ReviewRepositoryError {
    fn from(err: crate::db::DbError) -> Self {
        Self::persistence(err)
    }
}
