//! Repository port for discussion entries.

use crate::Page;
use crate::comment::domain::{Comment, CommentId};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for comment repository operations.
pub type CommentRepositoryResult<T> = Result<T, CommentRepositoryError>;

/// Discussion persistence contract.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Stores a new entry.
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<()>;

    /// Persists an edited entry.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRepositoryError::NotFound`] when it does not exist.
    async fn update(&self, comment: &Comment) -> CommentRepositoryResult<()>;

    /// Deletes an entry, returning whether it existed.
    async fn delete(&self, id: CommentId) -> CommentRepositoryResult<bool>;

    /// Finds an entry by identifier.
    async fn find_by_id(&self, id: CommentId) -> CommentRepositoryResult<Option<Comment>>;

    /// Lists a listing's entries, newest first.
    ///
    /// Private entries are skipped unless `include_private` is set.
    async fn list_for_task(
        &self,
        task_id: TaskId,
        include_private: bool,
        page: Page,
    ) -> CommentRepositoryResult<Vec<Comment>>;
}

/// Errors returned by comment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CommentRepositoryError {
    /// A comment with the same identifier already exists.
    #[error("duplicate comment identifier: {0}")]
    DuplicateComment(CommentId),

    /// The entry was not found.
    #[error("comment not found: {0}")]
    NotFound(CommentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CommentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<crate::db::DbError> for CommentRepositoryError {
    fn from(err: crate::db::DbError) -> Self {
        Self::persistence(err)
    }
}
