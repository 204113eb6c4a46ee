//! In-memory repository for listings and their mentor links.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskFilter, TaskId, TaskMentorLink},
    ports::{
        TaskMentorRepository, TaskRepository, TaskRepositoryError, TaskRepositoryResult,
        TaskStatusCounts,
    },
};
use crate::user::domain::UserId;

/// Thread-safe in-memory listing repository.
///
/// Implements both [`TaskRepository`] and [`TaskMentorRepository`] over one
/// state so deleting a listing also drops its mentor links.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    mentor_links: Vec<TaskMentorLink>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::poisoned(err)
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let slot = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *slot = task.clone();
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .tasks
            .remove(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        state.mentor_links.retain(|link| link.task_id != id);
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut matching: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        matching.sort_by(|left, right| {
            right
                .created_at()
                .cmp(&left.created_at())
                .then_with(|| right.id().into_inner().cmp(&left.id().into_inner()))
        });
        Ok(filter.query.page().apply(matching))
    }

    async fn status_counts(&self) -> TaskRepositoryResult<TaskStatusCounts> {
        let state = self.state.read().map_err(lock_error)?;
        let mut counts = TaskStatusCounts::new();
        for task in state.tasks.values() {
            let entry = counts.entry(task.status()).or_insert(0);
            *entry = entry.saturating_add(1);
        }
        Ok(counts)
    }
}

#[async_trait]
impl TaskMentorRepository for InMemoryTaskRepository {
    async fn link(&self, link: &TaskMentorLink) -> TaskRepositoryResult<TaskMentorLink> {
        let mut state = self.state.write().map_err(lock_error)?;
        if !state.tasks.contains_key(&link.task_id) {
            return Err(TaskRepositoryError::NotFound(link.task_id));
        }
        let existing = state
            .mentor_links
            .iter()
            .find(|candidate| {
                candidate.task_id == link.task_id && candidate.mentor_id == link.mentor_id
            })
            .copied();
        match existing {
            Some(found) => Ok(found),
            None => {
                state.mentor_links.push(*link);
                Ok(*link)
            }
        }
    }

    async fn unlink(&self, task_id: TaskId, mentor_id: UserId) -> TaskRepositoryResult<bool> {
        let mut state = self.state.write().map_err(lock_error)?;
        let before = state.mentor_links.len();
        state
            .mentor_links
            .retain(|link| !(link.task_id == task_id && link.mentor_id == mentor_id));
        Ok(state.mentor_links.len() != before)
    }

    async fn list_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskMentorLink>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .mentor_links
            .iter()
            .filter(|link| link.task_id == task_id)
            .copied()
            .collect())
    }

    async fn tasks_for_mentor(&self, mentor_id: UserId) -> TaskRepositoryResult<Vec<TaskId>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .mentor_links
            .iter()
            .filter(|link| link.mentor_id == mentor_id)
            .map(|link| link.task_id)
            .collect())
    }
}
