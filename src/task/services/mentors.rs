//! Additional mentors attached to listings.

use super::catalog::TASK_ARCHIVERS;
use crate::task::{
    domain::{TaskId, TaskMentorLink},
    ports::{TaskMentorRepository, TaskRepository, TaskRepositoryError},
};
use crate::user::{
    domain::{AccessDenied, Actor, Email, FullName, Role, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// A linked mentor with display details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkedMentor {
    /// The link.
    pub link: TaskMentorLink,
    /// Mentor display name.
    pub full_name: FullName,
    /// Mentor email.
    pub email: Email,
}

/// Service-level errors for mentor links.
#[derive(Debug, Error)]
pub enum TaskMentorError {
    /// Task repository failure.
    #[error(transparent)]
    Repository(TaskRepositoryError),

    /// User repository failure.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),

    /// The actor lacks the required role.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    /// The listing does not exist.
    #[error("Task not found")]
    TaskNotFound(TaskId),

    /// The user does not exist or is not a mentor.
    #[error("Mentor not found")]
    MentorNotFound(UserId),
}

impl From<TaskRepositoryError> for TaskMentorError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::TaskNotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for mentor link operations.
pub type TaskMentorResult<T> = Result<T, TaskMentorError>;

/// Mentor link management service.
pub struct TaskMentorService<T, M, U>
where
    T: TaskRepository + ?Sized,
    M: TaskMentorRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    tasks: Arc<T>,
    links: Arc<M>,
    users: Arc<U>,
}

impl<T, M, U> TaskMentorService<T, M, U>
where
    T: TaskRepository + ?Sized,
    M: TaskMentorRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    /// Creates a new mentor link service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, links: Arc<M>, users: Arc<U>) -> Self {
        Self {
            tasks,
            links,
            users,
        }
    }

    /// Links a mentor to a listing; linking twice returns the first link.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMentorError::MentorNotFound`] unless `mentor_id` names
    /// a live mentor account, or [`TaskMentorError::TaskNotFound`].
    pub async fn assign(
        &self,
        actor: Actor,
        task_id: TaskId,
        mentor_id: UserId,
    ) -> TaskMentorResult<TaskMentorLink> {
        actor.require_any(&TASK_ARCHIVERS)?;
        self.ensure_task(task_id).await?;
        let is_mentor = self
            .users
            .find_by_id(mentor_id)
            .await?
            .is_some_and(|user| user.role() == Role::Mentor && !user.is_deleted());
        if !is_mentor {
            return Err(TaskMentorError::MentorNotFound(mentor_id));
        }
        let link = self
            .links
            .link(&TaskMentorLink::new(task_id, mentor_id))
            .await?;
        info!(task_id = %task_id, mentor_id = %mentor_id, "linked mentor to task");
        Ok(link)
    }

    /// Unlinks a mentor; unlinking an absent mentor is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMentorError::TaskNotFound`] or repository errors.
    pub async fn remove(
        &self,
        actor: Actor,
        task_id: TaskId,
        mentor_id: UserId,
    ) -> TaskMentorResult<()> {
        actor.require_any(&TASK_ARCHIVERS)?;
        self.ensure_task(task_id).await?;
        if self.links.unlink(task_id, mentor_id).await? {
            info!(task_id = %task_id, mentor_id = %mentor_id, "unlinked mentor from task");
        }
        Ok(())
    }

    /// Lists linked mentors with their names and emails.
    ///
    /// Links to accounts that no longer exist are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`TaskMentorError::TaskNotFound`] or repository errors.
    pub async fn list(&self, task_id: TaskId) -> TaskMentorResult<Vec<LinkedMentor>> {
        self.ensure_task(task_id).await?;
        let links = self.links.list_for_task(task_id).await?;
        let mut mentors = Vec::with_capacity(links.len());
        for link in links {
            if let Some(user) = self.users.find_by_id(link.mentor_id).await? {
                mentors.push(LinkedMentor {
                    link,
                    full_name: user.full_name().clone(),
                    email: user.email().clone(),
                });
            }
        }
        Ok(mentors)
    }

    async fn ensure_task(&self, task_id: TaskId) -> TaskMentorResult<()> {
        if self.tasks.find_by_id(task_id).await?.is_none() {
            return Err(TaskMentorError::TaskNotFound(task_id));
        }
        Ok(())
    }
}
