//! Posting, listing and editing discussion entries.

use crate::Page;
use crate::assignment::{
    ports::{AssignmentRepository, AssignmentRepositoryError},
    services::holds_nda_clearance,
};
use crate::comment::{
    domain::{Comment, CommentBody, CommentDomainError, CommentId, CommentPatch, NewComment},
    ports::{CommentRepository, CommentRepositoryError},
};
use crate::task::{
    domain::TaskId,
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::domain::{AccessDenied, Actor};
use mockable::Clock;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Which part of the discussion an operation touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Thread {
    /// Public comments.
    Comments,
    /// Questions, possibly private.
    Questions,
}

impl fmt::Display for Thread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Comments => "comments",
            Self::Questions => "questions",
        })
    }
}

/// Service-level errors for the discussion.
#[derive(Debug, Error)]
pub enum DiscussionError {
    /// Body validation failed.
    #[error(transparent)]
    Domain(#[from] CommentDomainError),

    /// Comment repository failure.
    #[error(transparent)]
    Repository(CommentRepositoryError),

    /// Task repository failure.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// Assignment repository failure.
    #[error(transparent)]
    Assignments(#[from] AssignmentRepositoryError),

    /// Only the author may change an entry.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    /// The student has not accepted the listing's NDA.
    #[error("NDA required for {0}")]
    NdaRequired(Thread),

    /// The listing does not exist.
    #[error("Task not found")]
    TaskNotFound(TaskId),

    /// The entry does not exist.
    #[error("Comment not found")]
    NotFound(CommentId),
}

impl From<CommentRepositoryError> for DiscussionError {
    fn from(err: CommentRepositoryError) -> Self {
        match err {
            CommentRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for discussion operations.
pub type DiscussionResult<T> = Result<T, DiscussionError>;

/// Discussion service.
pub struct DiscussionService<M, T, A, C>
where
    M: CommentRepository + ?Sized,
    T: TaskRepository + ?Sized,
    A: AssignmentRepository + ?Sized,
    C: Clock + Send + Sync,
{
    comments: Arc<M>,
    tasks: Arc<T>,
    assignments: Arc<A>,
    clock: Arc<C>,
}

impl<M, T, A, C> DiscussionService<M, T, A, C>
where
    M: CommentRepository + ?Sized,
    T: TaskRepository + ?Sized,
    A: AssignmentRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new discussion service.
    #[must_use]
    pub const fn new(comments: Arc<M>, tasks: Arc<T>, assignments: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            comments,
            tasks,
            assignments,
            clock,
        }
    }

    /// Posts a public comment.
    ///
    /// # Errors
    ///
    /// Returns [`DiscussionError::TaskNotFound`] or
    /// [`DiscussionError::NdaRequired`].
    pub async fn post_comment(
        &self,
        actor: Actor,
        task_id: TaskId,
        body: String,
    ) -> DiscussionResult<Comment> {
        let content = NewComment::public(CommentBody::new(body)?);
        self.post(actor, task_id, content, Thread::Comments).await
    }

    /// Posts a question, optionally private to a recipient.
    ///
    /// # Errors
    ///
    /// Same as [`Self::post_comment`].
    pub async fn post_question(
        &self,
        actor: Actor,
        task_id: TaskId,
        content: NewComment,
    ) -> DiscussionResult<Comment> {
        self.post(actor, task_id, content, Thread::Questions).await
    }

    /// Lists a listing's public comments, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DiscussionError::TaskNotFound`] or
    /// [`DiscussionError::NdaRequired`].
    pub async fn list_comments(
        &self,
        actor: Actor,
        task_id: TaskId,
        page: Page,
    ) -> DiscussionResult<Vec<Comment>> {
        self.admit(actor, task_id, Thread::Comments).await?;
        Ok(self.comments.list_for_task(task_id, false, page).await?)
    }

    /// Lists a listing's questions visible to `actor`, newest first.
    ///
    /// Paging applies before the privacy filter.
    ///
    /// # Errors
    ///
    /// Same as [`Self::list_comments`].
    pub async fn list_questions(
        &self,
        actor: Actor,
        task_id: TaskId,
        page: Page,
    ) -> DiscussionResult<Vec<Comment>> {
        self.admit(actor, task_id, Thread::Questions).await?;
        let questions = self.comments.list_for_task(task_id, true, page).await?;
        let fetched = questions.len();
        let visible: Vec<Comment> = questions
            .into_iter()
            .filter(|question| question.is_visible_to(actor))
            .collect();
        debug!(task_id = %task_id, fetched, visible = visible.len(), "questions filtered");
        Ok(visible)
    }

    /// Edits an entry authored by `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscussionError::NotFound`] or
    /// [`DiscussionError::Forbidden`] for anyone but the author.
    pub async fn edit(
        &self,
        actor: Actor,
        id: CommentId,
        patch: CommentPatch,
    ) -> DiscussionResult<Comment> {
        let mut comment = self.authored(actor, id).await?;
        comment.edit(patch);
        self.comments.update(&comment).await?;
        info!(comment_id = %id, "comment edited");
        Ok(comment)
    }

    /// Deletes an entry authored by `actor`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::edit`].
    pub async fn delete(&self, actor: Actor, id: CommentId) -> DiscussionResult<()> {
        self.authored(actor, id).await?;
        if !self.comments.delete(id).await? {
            return Err(DiscussionError::NotFound(id));
        }
        info!(comment_id = %id, "comment deleted");
        Ok(())
    }

    async fn post(
        &self,
        actor: Actor,
        task_id: TaskId,
        content: NewComment,
        thread: Thread,
    ) -> DiscussionResult<Comment> {
        self.admit(actor, task_id, thread).await?;
        let comment = Comment::new(task_id, actor.id, content, &*self.clock);
        self.comments.store(&comment).await?;
        info!(
            comment_id = %comment.id(),
            task_id = %task_id,
            thread = %thread,
            private = comment.is_private(),
            "discussion entry posted"
        );
        Ok(comment)
    }

    async fn admit(&self, actor: Actor, task_id: TaskId, thread: Thread) -> DiscussionResult<()> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(DiscussionError::TaskNotFound(task_id))?;
        if !holds_nda_clearance(self.assignments.as_ref(), &task, actor).await? {
            return Err(DiscussionError::NdaRequired(thread));
        }
        Ok(())
    }

    async fn authored(&self, actor: Actor, id: CommentId) -> DiscussionResult<Comment> {
        let comment = self
            .comments
            .find_by_id(id)
            .await?
            .ok_or(DiscussionError::NotFound(id))?;
        if comment.author_id() != actor.id {
            return Err(AccessDenied.into());
        }
        Ok(comment)
    }
}
