//! Project team rosters with contact visibility rules.

use crate::assignment::{
    domain::TeamRole,
    ports::{AssignmentRepository, AssignmentRepositoryError},
};
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::{
    domain::{Actor, Email, FullName, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// One member of a project team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamMember {
    /// Member account.
    pub user_id: UserId,
    /// Display name.
    pub full_name: FullName,
    /// Role in the team.
    pub role_in_team: Option<TeamRole>,
    /// Email, when contacts are visible.
    pub email: Option<Email>,
    /// `LinkedIn` URL, when contacts are visible.
    pub linkedin_url: Option<String>,
    /// `GitHub` URL, when contacts are visible.
    pub github_url: Option<String>,
}

/// Service-level errors for team rosters.
#[derive(Debug, Error)]
pub enum TeamError {
    /// Assignment repository failure.
    #[error(transparent)]
    Assignments(#[from] AssignmentRepositoryError),

    /// Task repository failure.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// User repository failure.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),

    /// The listing does not exist.
    #[error("Project not found")]
    TaskNotFound(TaskId),
}

/// Team roster service.
pub struct TeamService<A, T, U>
where
    A: AssignmentRepository + ?Sized,
    T: TaskRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    assignments: Arc<A>,
    tasks: Arc<T>,
    users: Arc<U>,
}

impl<A, T, U> TeamService<A, T, U>
where
    A: AssignmentRepository + ?Sized,
    T: TaskRepository + ?Sized,
    U: UserRepository + ?Sized,
{
    /// Creates a new team service.
    #[must_use]
    pub const fn new(assignments: Arc<A>, tasks: Arc<T>, users: Arc<U>) -> Self {
        Self {
            assignments,
            tasks,
            users,
        }
    }

    /// Lists active and finished team members of a listing.
    ///
    /// Contacts are hidden from students who are not themselves on the team
    /// or who did not accept the listing's NDA.
    ///
    /// # Errors
    ///
    /// Returns [`TeamError::TaskNotFound`] or repository errors.
    pub async fn team_for(
        &self,
        actor: Actor,
        task_id: TaskId,
    ) -> Result<Vec<TeamMember>, TeamError> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TeamError::TaskNotFound(task_id))?;
        let show_contacts = self.can_view_contacts(actor, &task).await?;

        let mut team = Vec::new();
        for assignment in self.assignments.list_for_task(task_id).await? {
            if !assignment.state().is_team_member() {
                continue;
            }
            let Some(student) = self.users.find_by_id(assignment.student_id()).await? else {
                continue;
            };
            let profile = student.profile();
            team.push(TeamMember {
                user_id: student.id(),
                full_name: student.full_name().clone(),
                role_in_team: assignment.team_role().cloned(),
                email: show_contacts.then(|| student.email().clone()),
                linkedin_url: profile.linkedin_url.clone().filter(|_| show_contacts),
                github_url: profile.github_url.clone().filter(|_| show_contacts),
            });
        }
        Ok(team)
    }

    async fn can_view_contacts(&self, actor: Actor, task: &Task) -> Result<bool, TeamError> {
        if !actor.is_student() {
            return Ok(true);
        }
        let own = self
            .assignments
            .find_by_task_and_student(task.id(), actor.id)
            .await?;
        Ok(own.is_some_and(|assignment| {
            assignment.state().is_team_member()
                && (!task.nda_required() || assignment.nda_accepted())
        }))
    }
}
