//! In-memory repository for reviews.

use crate::assignment::domain::AssignmentId;
use crate::review::{
    domain::Review,
    ports::{ReviewRepository, ReviewRepositoryError, ReviewRepositoryResult},
};
use crate::task::{
    domain::TaskId,
    ports::{TaskDependents, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory review repository keyed by assignment.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReviewRepository {
    reviews: Arc<RwLock<HashMap<AssignmentId, Review>>>,
}

impl InMemoryReviewRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> ReviewRepositoryError {
    ReviewRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn store(&self, review: &Review) -> ReviewRepositoryResult<()> {
        let mut reviews = self.reviews.write().map_err(lock_error)?;
        if reviews.contains_key(&review.assignment_id) {
            return Err(ReviewRepositoryError::DuplicateReview(review.assignment_id));
        }
        reviews.insert(review.assignment_id, review.clone());
        Ok(())
    }

    async fn find_by_assignment(
        &self,
        assignment_id: AssignmentId,
    ) -> ReviewRepositoryResult<Option<Review>> {
        let reviews = self.reviews.read().map_err(lock_error)?;
        Ok(reviews.get(&assignment_id).cloned())
    }

    async fn list_for_student(&self, student_id: UserId) -> ReviewRepositoryResult<Vec<Review>> {
        let reviews = self.reviews.read().map_err(lock_error)?;
        let mut received: Vec<Review> = reviews
            .values()
            .filter(|review| review.student_id == student_id)
            .cloned()
            .collect();
        received.sort_by(|left, right| {
            right
                .created_at
                .cmp(&left.created_at)
                .then_with(|| right.id.into_inner().cmp(&left.id.into_inner()))
        });
        Ok(received)
    }
}

#[async_trait]
impl TaskDependents for InMemoryReviewRepository {
    async fn remove_for_task(&self, task_id: TaskId) -> TaskRepositoryResult<()> {
        let mut reviews = self.reviews.write().map_err(TaskRepositoryError::poisoned)?;
        reviews.retain(|_, review| review.task_id != task_id);
        Ok(())
    }
}
