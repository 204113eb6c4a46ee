//! Student applications and staff decisions.

use crate::Page;
use crate::assignment::{
    domain::{
        Assignment, AssignmentDomainError, AssignmentId, AssignmentState, DecisionReason,
        TeamRole,
    },
    ports::{AssignmentRepository, AssignmentRepositoryError},
};
use crate::audit::{
    domain::{AuditAction, EntityKind, EntityRef},
    ports::AuditRepository,
    services::AuditTrail,
};
use crate::portfolio::{
    domain::{PortfolioDomainError, PortfolioEntry},
    ports::{PortfolioRepository, PortfolioRepositoryError},
};
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::domain::{AccessDenied, Actor, Role, UserId};
use mockable::Clock;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Roles allowed to file applications.
pub const APPLICANT_ROLES: [Role; 5] = [
    Role::Student,
    Role::Curator,
    Role::Mentor,
    Role::Manager,
    Role::Admin,
];

/// Roles allowed to move applications through their lifecycle.
pub const LIFECYCLE_ROLES: [Role; 4] = [Role::Curator, Role::Mentor, Role::Manager, Role::Admin];

/// Roles allowed to approve, reject and assign team roles.
pub const DECISION_ROLES: [Role; 2] = [Role::Manager, Role::Admin];

/// Service-level errors for applications.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain validation or lifecycle rule failed.
    #[error(transparent)]
    Domain(#[from] AssignmentDomainError),

    /// Portfolio generation failed.
    #[error(transparent)]
    Portfolio(#[from] PortfolioDomainError),

    /// Assignment repository failure.
    #[error(transparent)]
    Repository(AssignmentRepositoryError),

    /// Task repository failure.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// Portfolio repository failure.
    #[error(transparent)]
    PortfolioRepository(#[from] PortfolioRepositoryError),

    /// The actor lacks the required role.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    /// The listing does not exist.
    #[error("Task not found")]
    TaskNotFound(TaskId),

    /// The application does not exist.
    #[error("Application not found")]
    NotFound(AssignmentId),

    /// The student already applied to the listing.
    #[error("Already requested")]
    AlreadyRequested,

    /// The listing requires NDA acceptance.
    #[error("NDA agreement is required for this project")]
    NdaRequired,

    /// The listing is archived or no longer running.
    #[error("Project is not accepting applications")]
    NotAcceptingApplications(TaskId),
}

impl From<AssignmentRepositoryError> for ApplicationError {
    fn from(err: AssignmentRepositoryError) -> Self {
        match err {
            AssignmentRepositoryError::DuplicateApplication { .. } => Self::AlreadyRequested,
            AssignmentRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// Application lifecycle service.
pub struct ApplicationService<A, T, P, L, C>
where
    A: AssignmentRepository + ?Sized,
    T: TaskRepository + ?Sized,
    P: PortfolioRepository + ?Sized,
    L: AuditRepository + ?Sized,
    C: Clock + Send + Sync,
{
    assignments: Arc<A>,
    tasks: Arc<T>,
    portfolio: Arc<P>,
    audit: AuditTrail<L, C>,
    clock: Arc<C>,
}

impl<A, T, P, L, C> ApplicationService<A, T, P, L, C>
where
    A: AssignmentRepository + ?Sized,
    T: TaskRepository + ?Sized,
    P: PortfolioRepository + ?Sized,
    L: AuditRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new application service.
    #[must_use]
    pub fn new(
        assignments: Arc<A>,
        tasks: Arc<T>,
        portfolio: Arc<P>,
        audit: Arc<L>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            assignments,
            tasks,
            portfolio,
            audit: AuditTrail::new(audit, Arc::clone(&clock)),
            clock,
        }
    }

    /// Files an application for the actor.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::TaskNotFound`],
    /// [`ApplicationError::AlreadyRequested`],
    /// [`ApplicationError::NdaRequired`] or
    /// [`ApplicationError::NotAcceptingApplications`].
    pub async fn apply(
        &self,
        actor: Actor,
        task_id: TaskId,
        nda_accepted: bool,
    ) -> ApplicationResult<Assignment> {
        actor.require_any(&APPLICANT_ROLES)?;
        let task = self.load_task(task_id).await?;
        if self
            .assignments
            .find_by_task_and_student(task_id, actor.id)
            .await?
            .is_some()
        {
            return Err(ApplicationError::AlreadyRequested);
        }
        if task.nda_required() && !nda_accepted {
            return Err(ApplicationError::NdaRequired);
        }
        if !task.accepts_applications() {
            return Err(ApplicationError::NotAcceptingApplications(task_id));
        }

        let assignment = Assignment::new(task_id, actor.id, nda_accepted, &*self.clock);
        self.assignments.store(&assignment).await?;
        self.audit
            .record(
                Some(actor.id),
                AuditAction::AssignmentRequested,
                assignment_ref(assignment.id()),
                json!({ "task_id": task_id }),
            )
            .await;
        info!(assignment_id = %assignment.id(), task_id = %task_id, "application requested");
        Ok(assignment)
    }

    /// Finds an application.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`].
    pub async fn find(&self, id: AssignmentId) -> ApplicationResult<Assignment> {
        self.assignments
            .find_by_id(id)
            .await?
            .ok_or(ApplicationError::NotFound(id))
    }

    /// Lists a student's applications, newest first.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn list_for_student(
        &self,
        student_id: UserId,
        page: Page,
    ) -> ApplicationResult<Vec<Assignment>> {
        Ok(self.assignments.list_for_student(student_id, page).await?)
    }

    /// Lists applications to a listing, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::TaskNotFound`] or repository errors.
    pub async fn list_for_task(&self, task_id: TaskId) -> ApplicationResult<Vec<Assignment>> {
        self.load_task(task_id).await?;
        Ok(self.assignments.list_for_task(task_id).await?)
    }

    /// Moves an application to `target`.
    ///
    /// Entering `active` generates a portfolio entry.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentDomainError::InvalidStateTransition`] wrapped in
    /// [`ApplicationError::Domain`] for a forbidden move.
    pub async fn update_state(
        &self,
        actor: Actor,
        id: AssignmentId,
        target: AssignmentState,
    ) -> ApplicationResult<Assignment> {
        actor.require_any(&LIFECYCLE_ROLES)?;
        let mut assignment = self.find(id).await?;
        assignment.transition_to(target, &*self.clock)?;
        self.assignments.update(&assignment).await?;
        info!(assignment_id = %id, state = target.as_str(), "application state changed");
        if target == AssignmentState::Active {
            self.generate_portfolio_entry(&assignment).await?;
        }
        Ok(assignment)
    }

    /// Accepts a pending application onto the team.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Domain`] unless the application is
    /// pending.
    pub async fn approve(&self, actor: Actor, id: AssignmentId) -> ApplicationResult<Assignment> {
        self.decide(actor, id, AssignmentState::Active, None).await
    }

    /// Rejects a pending application.
    ///
    /// # Errors
    ///
    /// Same as [`Self::approve`], plus a domain error for an overlong
    /// reason.
    pub async fn reject(
        &self,
        actor: Actor,
        id: AssignmentId,
        reason: Option<String>,
    ) -> ApplicationResult<Assignment> {
        let validated = reason.map(DecisionReason::new).transpose()?;
        self.decide(actor, id, AssignmentState::Canceled, validated)
            .await
    }

    /// Records the student's role in the team.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NotFound`] or a domain error for an
    /// invalid role.
    pub async fn set_team_role(
        &self,
        actor: Actor,
        id: AssignmentId,
        role: String,
    ) -> ApplicationResult<Assignment> {
        actor.require_any(&DECISION_ROLES)?;
        let team_role = TeamRole::new(role)?;
        let mut assignment = self.find(id).await?;
        assignment.assign_team_role(team_role, actor.id, &*self.clock);
        self.assignments.update(&assignment).await?;
        info!(assignment_id = %id, "team role assigned");
        Ok(assignment)
    }

    async fn decide(
        &self,
        actor: Actor,
        id: AssignmentId,
        target: AssignmentState,
        reason: Option<DecisionReason>,
    ) -> ApplicationResult<Assignment> {
        actor.require_any(&DECISION_ROLES)?;
        let mut assignment = self.find(id).await?;
        assignment.decide(target, actor.id, reason, &*self.clock)?;
        self.assignments.update(&assignment).await?;
        if target == AssignmentState::Active {
            self.generate_portfolio_entry(&assignment).await?;
        }

        let entity = assignment_ref(id);
        self.audit
            .record(
                Some(actor.id),
                AuditAction::AssignmentDecided,
                entity,
                json!({ "state": target.as_str() }),
            )
            .await;
        let outcome = if target == AssignmentState::Active {
            AuditAction::AssignmentApproved
        } else {
            AuditAction::AssignmentRejected
        };
        self.audit
            .record(Some(actor.id), outcome, entity, json!({}))
            .await;
        info!(
            assignment_id = %id,
            state = target.as_str(),
            decided_by = %actor.id,
            "application decided"
        );
        Ok(assignment)
    }

    async fn generate_portfolio_entry(&self, assignment: &Assignment) -> ApplicationResult<()> {
        let task = self.load_task(assignment.task_id()).await?;
        let entry = PortfolioEntry::for_assignment(assignment, task.title(), &*self.clock)?;
        let stored = self.portfolio.record(&entry).await?;
        info!(entry_id = %stored.id, assignment_id = %assignment.id(), "portfolio entry recorded");
        Ok(())
    }

    async fn load_task(&self, task_id: TaskId) -> ApplicationResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(ApplicationError::TaskNotFound(task_id))
    }
}

const fn assignment_ref(id: AssignmentId) -> EntityRef {
    EntityRef::new(EntityKind::Assignment, id.into_inner())
}
