//! Listing creation, editing, archiving and search.

use crate::task::{
    domain::{
        CreditOptions, Tags, Task, TaskChanges, TaskDescription, TaskDetails, TaskDomainError,
        TaskDraft, TaskFilter, TaskId, TaskQuery, TaskScope, TaskStatus, TaskTitle, Visibility,
    },
    ports::{TaskDependents, TaskRepository, TaskRepositoryError},
};
use crate::user::domain::{AccessDenied, Actor, Role, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Roles allowed to create and edit listings.
pub const TASK_EDITORS: [Role; 3] = [Role::Curator, Role::Manager, Role::Admin];

/// Roles allowed to archive listings.
pub const TASK_ARCHIVERS: [Role; 2] = [Role::Manager, Role::Admin];

/// Unvalidated listing payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewTask {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Long-form details.
    #[serde(flatten)]
    pub details: TaskDetails,
    /// Credit options.
    #[serde(flatten)]
    pub credits: CreditOptions,
    /// NDA flag.
    #[serde(default)]
    pub nda_required: bool,
    /// Comma-separated tags.
    pub tags: Option<String>,
    /// Initial status; defaults to open.
    pub status: Option<TaskStatus>,
    /// Responsible curator.
    pub curator_id: Option<UserId>,
    /// Lead mentor.
    pub mentor_id: Option<UserId>,
    /// Application deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Visibility; defaults to public.
    pub visibility: Option<Visibility>,
}

impl NewTask {
    /// Creates a payload with only the required fields set.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    fn into_draft(self) -> Result<TaskDraft, TaskDomainError> {
        let mut draft = TaskDraft::new(
            TaskTitle::new(self.title)?,
            TaskDescription::new(self.description)?,
        );
        draft.details = self.details;
        draft.credits = self.credits;
        draft.nda_required = self.nda_required;
        draft.tags = Tags::new(self.tags);
        draft.status = self.status.unwrap_or(TaskStatus::Open);
        draft.curator_id = self.curator_id;
        draft.mentor_id = self.mentor_id;
        draft.deadline = self.deadline;
        draft.visibility = self.visibility.unwrap_or_default();
        Ok(draft)
    }
}

/// Unvalidated partial listing update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskPatch {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New goal.
    pub goal: Option<String>,
    /// New work breakdown.
    pub key_tasks: Option<String>,
    /// New novelty statement.
    pub novelty: Option<String>,
    /// New required skills.
    pub skills_required: Option<String>,
    /// New course alignment.
    pub course_alignment: Option<String>,
    /// New diploma flag.
    pub diploma_possible: Option<bool>,
    /// New practice flag.
    pub practice_possible: Option<bool>,
    /// New course project flag.
    pub course_project_possible: Option<bool>,
    /// New NDA flag.
    pub nda_required: Option<bool>,
    /// New tags.
    pub tags: Option<String>,
    /// New status.
    pub status: Option<TaskStatus>,
    /// New curator.
    pub curator_id: Option<UserId>,
    /// New lead mentor.
    pub mentor_id: Option<UserId>,
    /// New deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// New visibility.
    pub visibility: Option<Visibility>,
}

impl TaskPatch {
    fn into_changes(self) -> Result<TaskChanges, TaskDomainError> {
        Ok(TaskChanges {
            title: self.title.map(TaskTitle::new).transpose()?,
            description: self.description.map(TaskDescription::new).transpose()?,
            goal: self.goal,
            key_tasks: self.key_tasks,
            novelty: self.novelty,
            skills_required: self.skills_required,
            course_alignment: self.course_alignment,
            diploma_possible: self.diploma_possible,
            practice_possible: self.practice_possible,
            course_project_possible: self.course_project_possible,
            nda_required: self.nda_required,
            tags: self.tags.map(|raw| Tags::new(Some(raw))),
            status: self.status,
            curator_id: self.curator_id,
            mentor_id: self.mentor_id,
            deadline: self.deadline,
            visibility: self.visibility,
        })
    }
}

/// Service-level errors for listing management.
#[derive(Debug, Error)]
pub enum TaskCatalogError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),

    /// The actor lacks the required role.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    /// The listing does not exist.
    #[error("Task not found")]
    NotFound(TaskId),
}

impl From<TaskRepositoryError> for TaskCatalogError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for listing management.
pub type TaskCatalogResult<T> = Result<T, TaskCatalogError>;

/// Listing management service.
pub struct TaskCatalogService<T, C>
where
    T: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    dependents: Vec<Arc<dyn TaskDependents>>,
    clock: Arc<C>,
}

impl<T, C> TaskCatalogService<T, C>
where
    T: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new catalogue service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            dependents: Vec::new(),
            clock,
        }
    }

    /// Registers stores whose rows are removed along with a listing.
    #[must_use]
    pub fn with_dependents(mut self, dependents: Vec<Arc<dyn TaskDependents>>) -> Self {
        self.dependents = dependents;
        self
    }

    /// Creates a listing.
    ///
    /// A curator creating a listing without naming a curator becomes its
    /// curator.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCatalogError::Forbidden`] for roles outside
    /// [`TASK_EDITORS`] or a domain error for invalid input.
    pub async fn create(&self, actor: Actor, request: NewTask) -> TaskCatalogResult<Task> {
        actor.require_any(&TASK_EDITORS)?;
        let mut draft = request.into_draft()?;
        if actor.role == Role::Curator && draft.curator_id.is_none() {
            draft.curator_id = Some(actor.id);
        }
        let task = Task::new(draft, actor.id, &*self.clock);
        self.tasks.store(&task).await?;
        info!(task_id = %task.id(), created_by = %actor.id, "created task");
        Ok(task)
    }

    /// Applies a partial update to a listing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCatalogError::NotFound`] for an unknown listing.
    pub async fn update(
        &self,
        actor: Actor,
        id: TaskId,
        patch: TaskPatch,
    ) -> TaskCatalogResult<Task> {
        actor.require_any(&TASK_EDITORS)?;
        let changes = patch.into_changes()?;
        let mut task = self.find(id).await?;
        task.apply(changes, &*self.clock);
        self.tasks.update(&task).await?;
        info!(task_id = %id, "updated task");
        Ok(task)
    }

    /// Deletes a listing and everything attached to it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCatalogError::NotFound`] for an unknown listing.
    pub async fn delete(&self, actor: Actor, id: TaskId) -> TaskCatalogResult<()> {
        actor.require_any(&TASK_EDITORS)?;
        self.tasks.delete(id).await?;
        for store in &self.dependents {
            store.remove_for_task(id).await?;
        }
        info!(task_id = %id, "deleted task");
        Ok(())
    }

    /// Finds a listing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCatalogError::NotFound`] for an unknown listing.
    pub async fn find(&self, id: TaskId) -> TaskCatalogResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskCatalogError::NotFound(id))
    }

    /// Lists all listings matching `query`, newest first.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn list(&self, query: TaskQuery) -> TaskCatalogResult<Vec<Task>> {
        debug!(?query, "listing tasks");
        let filter = TaskFilter::new(TaskScope::All, query);
        Ok(self.tasks.list(&filter).await?)
    }

    /// Closes and archives a listing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCatalogError::Forbidden`] for roles outside
    /// [`TASK_ARCHIVERS`] or [`TaskCatalogError::NotFound`].
    pub async fn archive(&self, actor: Actor, id: TaskId) -> TaskCatalogResult<Task> {
        self.set_archived(actor, id, true).await
    }

    /// Reopens an archived listing.
    ///
    /// # Errors
    ///
    /// Same as [`Self::archive`].
    pub async fn unarchive(&self, actor: Actor, id: TaskId) -> TaskCatalogResult<Task> {
        self.set_archived(actor, id, false).await
    }

    async fn set_archived(
        &self,
        actor: Actor,
        id: TaskId,
        archived: bool,
    ) -> TaskCatalogResult<Task> {
        actor.require_any(&TASK_ARCHIVERS)?;
        let mut task = self.find(id).await?;
        if archived {
            task.archive(&*self.clock);
        } else {
            task.unarchive(&*self.clock);
        }
        self.tasks.update(&task).await?;
        info!(task_id = %id, archived, "changed task archive flag");
        Ok(task)
    }
}
