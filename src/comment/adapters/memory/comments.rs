//! In-memory repository for discussion entries.

use crate::Page;
use crate::comment::{
    domain::{Comment, CommentId},
    ports::{CommentRepository, CommentRepositoryError, CommentRepositoryResult},
};
use crate::task::{
    domain::TaskId,
    ports::{TaskDependents, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory comment repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommentRepository {
    comments: Arc<RwLock<HashMap<CommentId, Comment>>>,
}

impl InMemoryCommentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> CommentRepositoryError {
    CommentRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let mut comments = self.comments.write().map_err(lock_error)?;
        if comments.contains_key(&comment.id()) {
            return Err(CommentRepositoryError::DuplicateComment(comment.id()));
        }
        comments.insert(comment.id(), comment.clone());
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let mut comments = self.comments.write().map_err(lock_error)?;
        let slot = comments
            .get_mut(&comment.id())
            .ok_or(CommentRepositoryError::NotFound(comment.id()))?;
        *slot = comment.clone();
        Ok(())
    }

    async fn delete(&self, id: CommentId) -> CommentRepositoryResult<bool> {
        let mut comments = self.comments.write().map_err(lock_error)?;
        Ok(comments.remove(&id).is_some())
    }

    async fn find_by_id(&self, id: CommentId) -> CommentRepositoryResult<Option<Comment>> {
        let comments = self.comments.read().map_err(lock_error)?;
        Ok(comments.get(&id).cloned())
    }

    async fn list_for_task(
        &self,
        task_id: TaskId,
        include_private: bool,
        page: Page,
    ) -> CommentRepositoryResult<Vec<Comment>> {
        let comments = self.comments.read().map_err(lock_error)?;
        let mut thread: Vec<Comment> = comments
            .values()
            .filter(|comment| comment.task_id() == task_id)
            .filter(|comment| include_private || !comment.is_private())
            .cloned()
            .collect();
        thread.sort_by(|left, right| {
            right
                .created_at()
                .cmp(&left.created_at())
                .then_with(|| right.id().into_inner().cmp(&left.id().into_inner()))
        });
        Ok(page.apply(thread))
    }
}

#[async_trait]
impl TaskDependents for InMemoryCommentRepository {
    async fn remove_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<()> {
        let mut comments = self.comments.write().map_err(TaskRepositoryError::poisoned)?;
        comments.retain(|_, comment| comment.task_id() != task_id);
        Ok(())
    }
}
