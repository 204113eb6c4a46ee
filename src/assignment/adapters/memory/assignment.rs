//! In-memory repository for student applications.

use crate::Page;
use crate::assignment::{
    domain::{Assignment, AssignmentId, AssignmentState},
    ports::{
        AssignmentRepository, AssignmentRepositoryError, AssignmentRepositoryResult,
        AssignmentStateCounts,
    },
};
use crate::task::{
    domain::TaskId,
    ports::{TaskDependents, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory assignment repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssignmentRepository {
    state: Arc<RwLock<InMemoryAssignmentState>>,
}

#[derive(Debug, Default)]
struct InMemoryAssignmentState {
    assignments: HashMap<AssignmentId, Assignment>,
    pair_index: HashMap<(TaskId, UserId), AssignmentId>,
}

impl InMemoryAssignmentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> AssignmentRepositoryError {
    AssignmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn sorted(mut assignments: Vec<Assignment>, newest_first: bool) -> Vec<Assignment> {
    assignments.sort_by(|left, right| {
        let order = left
            .created_at()
            .cmp(&right.created_at())
            .then_with(|| left.id().into_inner().cmp(&right.id().into_inner()));
        if newest_first { order.reverse() } else { order }
    });
    assignments
}

#[async_trait]
impl AssignmentRepository for InMemoryAssignmentRepository {
    async fn store(&self, assignment: &Assignment) -> AssignmentRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let pair = (assignment.task_id(), assignment.student_id());
        if state.pair_index.contains_key(&pair) {
            return Err(AssignmentRepositoryError::DuplicateApplication {
                task_id: pair.0,
                student_id: pair.1,
            });
        }
        if state.assignments.contains_key(&assignment.id()) {
            return Err(AssignmentRepositoryError::DuplicateAssignment(
                assignment.id(),
            ));
        }
        state.pair_index.insert(pair, assignment.id());
        state
            .assignments
            .insert(assignment.id(), assignment.clone());
        Ok(())
    }

    async fn update(&self, assignment: &Assignment) -> AssignmentRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let slot = state
            .assignments
            .get_mut(&assignment.id())
            .ok_or(AssignmentRepositoryError::NotFound(assignment.id()))?;
        *slot = assignment.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: AssignmentId) -> AssignmentRepositoryResult<Option<Assignment>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.assignments.get(&id).cloned())
    }

    async fn find_by_task_and_student(
        &self,
        task_id: TaskId,
        student_id: UserId,
    ) -> AssignmentRepositoryResult<Option<Assignment>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .pair_index
            .get(&(task_id, student_id))
            .and_then(|id| state.assignments.get(id))
            .cloned())
    }

    async fn list_for_student(
        &self,
        student_id: UserId,
        page: Page,
    ) -> AssignmentRepositoryResult<Vec<Assignment>> {
        let state = self.state.read().map_err(lock_error)?;
        let matching = state
            .assignments
            .values()
            .filter(|assignment| assignment.student_id() == student_id)
            .cloned()
            .collect();
        Ok(page.apply(sorted(matching, true)))
    }

    async fn list_for_task(&self, task_id: TaskId) -> AssignmentRepositoryResult<Vec<Assignment>> {
        let state = self.state.read().map_err(lock_error)?;
        let matching = state
            .assignments
            .values()
            .filter(|assignment| assignment.task_id() == task_id)
            .cloned()
            .collect();
        Ok(sorted(matching, false))
    }

    async fn count_in_state(&self, target: AssignmentState) -> AssignmentRepositoryResult<u64> {
        let state = self.state.read().map_err(lock_error)?;
        let count = state
            .assignments
            .values()
            .filter(|assignment| assignment.state() == target)
            .count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn state_counts_for_student(
        &self,
        student_id: UserId,
    ) -> AssignmentRepositoryResult<AssignmentStateCounts> {
        let state = self.state.read().map_err(lock_error)?;
        let mut counts = AssignmentStateCounts::new();
        for assignment in state
            .assignments
            .values()
            .filter(|assignment| assignment.student_id() == student_id)
        {
            let entry = counts.entry(assignment.state()).or_insert(0);
            *entry = entry.saturating_add(1);
        }
        Ok(counts)
    }
}

#[async_trait]
impl TaskDependents for InMemoryAssignmentRepository {
    async fn remove_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(TaskRepositoryError::poisoned)?;
        state
            .assignments
            .retain(|_, assignment| assignment.task_id() != task_id);
        state.pair_index.retain(|pair, _| pair.0 != task_id);
        Ok(())
    }
}
