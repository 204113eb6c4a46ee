//! NDA clearance checks shared by project views and discussions.

use crate::assignment::ports::{AssignmentRepository, AssignmentRepositoryResult};
use crate::task::domain::Task;
use crate::user::domain::Actor;

/// Returns true when the actor may see NDA-protected material of `task`.
///
/// Only students are gated; they need an application that accepted the NDA.
///
/// # Errors
///
/// Returns the repository error when the application lookup fails.
pub async fn holds_nda_clearance<A>(
    assignments: &A,
    task: &Task,
    actor: Actor,
) -> AssignmentRepositoryResult<bool>
where
    A: AssignmentRepository + ?Sized,
{
    if !actor.is_student() || !task.nda_required() {
        return Ok(true);
    }
    Ok(assignments
        .find_by_task_and_student(task.id(), actor.id)
        .await?
        .is_some_and(|assignment| assignment.nda_accepted()))
}
