//! Repository port for application persistence.

use crate::Page;
use crate::assignment::domain::{Assignment, AssignmentId, AssignmentState};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Result type for assignment repository operations.
pub type AssignmentRepositoryResult<T> = Result<T, AssignmentRepositoryError>;

/// Number of assignments per state.
pub type AssignmentStateCounts = HashMap<AssignmentState, u64>;

/// Assignment persistence contract.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Stores a new assignment.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentRepositoryError::DuplicateApplication`] when the
    /// student already applied to the listing.
    async fn store(&self, assignment: &Assignment) -> AssignmentRepositoryResult<()>;

    /// Persists changes to an existing assignment.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentRepositoryError::NotFound`] when the assignment
    /// does not exist.
    async fn update(&self, assignment: &Assignment) -> AssignmentRepositoryResult<()>;

    /// Finds an assignment by identifier.
    async fn find_by_id(&self, id: AssignmentId) -> AssignmentRepositoryResult<Option<Assignment>>;

    /// Finds the student's application to a listing.
    async fn find_by_task_and_student(
        &self,
        task_id: TaskId,
        student_id: UserId,
    ) -> AssignmentRepositoryResult<Option<Assignment>>;

    /// Lists a student's applications, newest first.
    async fn list_for_student(
        &self,
        student_id: UserId,
        page: Page,
    ) -> AssignmentRepositoryResult<Vec<Assignment>>;

    /// Lists a listing's applications, oldest first.
    async fn list_for_task(&self, task_id: TaskId) -> AssignmentRepositoryResult<Vec<Assignment>>;

    /// Counts assignments in `state` across all listings.
    async fn count_in_state(&self, state: AssignmentState) -> AssignmentRepositoryResult<u64>;

    /// Counts every application of a student per state.
    async fn state_counts_for_student(
        &self,
        student_id: UserId,
    ) -> AssignmentRepositoryResult<AssignmentStateCounts>;
}

/// Errors returned by assignment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AssignmentRepositoryError {
    /// The student already applied to the listing.
    #[error("student {student_id} already applied to task {task_id}")]
    DuplicateApplication {
        /// Listing.
        task_id: TaskId,
        /// Student.
        student_id: UserId,
    },

    /// An assignment with the same identifier already exists.
    #[error("duplicate assignment identifier: {0}")]
    DuplicateAssignment(AssignmentId),

    /// The assignment was not found.
    #[error("assignment not found: {0}")]
    NotFound(AssignmentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AssignmentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<crate::db::DbError> for AssignmentRepositoryError {
    fn from(err: crate::db::DbError) -> Self {
        Self::persistence(err)
    }
}
