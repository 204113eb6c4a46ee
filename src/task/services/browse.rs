//! Role-scoped project browsing.

use crate::assignment::{
    ports::{AssignmentRepository, AssignmentRepositoryError},
    services::holds_nda_clearance,
};
use crate::task::{
    domain::{Task, TaskFilter, TaskId, TaskQuery, TaskScope, Visibility},
    ports::{TaskMentorRepository, TaskRepository, TaskRepositoryError},
};
use crate::user::domain::{AccessDenied, Actor, Role};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Service-level errors for project browsing.
#[derive(Debug, Error)]
pub enum BrowseError {
    /// Task repository failure.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// Assignment repository failure.
    #[error(transparent)]
    Assignments(#[from] AssignmentRepositoryError),

    /// The listing is hidden from the actor.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    /// The listing does not exist.
    #[error("Project not found")]
    NotFound(TaskId),
}

/// Project browsing service.
pub struct ProjectBrowseService<T, M, A>
where
    T: TaskRepository + ?Sized,
    M: TaskMentorRepository + ?Sized,
    A: AssignmentRepository + ?Sized,
{
    tasks: Arc<T>,
    links: Arc<M>,
    assignments: Arc<A>,
}

impl<T, M, A> ProjectBrowseService<T, M, A>
where
    T: TaskRepository + ?Sized,
    M: TaskMentorRepository + ?Sized,
    A: AssignmentRepository + ?Sized,
{
    /// Creates a new browse service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, links: Arc<M>, assignments: Arc<A>) -> Self {
        Self {
            tasks,
            links,
            assignments,
        }
    }

    /// Lists the listings the actor may browse.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn list_for(&self, actor: Actor, query: TaskQuery) -> Result<Vec<Task>, BrowseError> {
        let scope = self.scope_for(actor).await?;
        debug!(role = actor.role.as_str(), ?scope, "browsing projects");
        Ok(self.tasks.list(&TaskFilter::new(scope, query)).await?)
    }

    /// Shows a single listing to the actor.
    ///
    /// Students cannot open private listings and see NDA listings redacted
    /// until they accept the NDA in an application.
    ///
    /// # Errors
    ///
    /// Returns [`BrowseError::NotFound`] or [`BrowseError::Forbidden`].
    pub async fn view_for(&self, actor: Actor, id: TaskId) -> Result<Task, BrowseError> {
        let task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or(BrowseError::NotFound(id))?;
        if actor.is_student() && task.visibility() != Visibility::Public {
            return Err(BrowseError::Forbidden(AccessDenied));
        }
        if holds_nda_clearance(&*self.assignments, &task, actor).await? {
            Ok(task)
        } else {
            Ok(task.redacted())
        }
    }

    async fn scope_for(&self, actor: Actor) -> Result<TaskScope, BrowseError> {
        let scope = match actor.role {
            Role::Manager
            | Role::Admin
            | Role::Hr
            | Role::AcademicPartnershipAdmin
            | Role::UnivTeacher
            | Role::UnivSupervisor
            | Role::UnivAdmin => TaskScope::All,
            Role::Curator => TaskScope::CuratedBy(actor.id),
            Role::Mentor => TaskScope::MentoredBy {
                mentor: actor.id,
                linked: self.links.tasks_for_mentor(actor.id).await?,
            },
            Role::Student => TaskScope::PublicActive,
        };
        Ok(scope)
    }
}
