//! Submitting reviews for active assignments.

use crate::assignment::{
    domain::{AssignmentDomainError, AssignmentId, AssignmentState},
    ports::{AssignmentRepository, AssignmentRepositoryError},
};
use crate::audit::{
    domain::{AuditAction, EntityKind, EntityRef},
    ports::AuditRepository,
    services::AuditTrail,
};
use crate::review::{
    domain::{Rating, Review, ReviewDomainError},
    ports::{ReviewRepository, ReviewRepositoryError},
};
use crate::user::domain::{AccessDenied, Actor, Role, UserId};
use mockable::Clock;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Roles allowed to review assignments.
pub const REVIEWER_ROLES: [Role; 4] = [Role::Mentor, Role::Curator, Role::Manager, Role::Admin];

/// Service-level errors for reviews.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// The rating is out of range.
    #[error(transparent)]
    Domain(#[from] ReviewDomainError),

    /// Closing the assignment failed.
    #[error(transparent)]
    Lifecycle(#[from] AssignmentDomainError),

    /// Review repository failure.
    #[error(transparent)]
    Repository(ReviewRepositoryError),

    /// Assignment repository failure.
    #[error(transparent)]
    Assignments(#[from] AssignmentRepositoryError),

    /// The actor lacks the required role.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    /// The assignment does not exist.
    #[error("Assignment not found")]
    AssignmentNotFound(AssignmentId),

    /// Only active assignments can be reviewed.
    #[error("Assignment is not active")]
    NotActive(AssignmentId),

    /// The assignment already has a review.
    #[error("Review already exists")]
    AlreadyReviewed(AssignmentId),
}

impl From<ReviewRepositoryError> for ReviewError {
    fn from(err: ReviewRepositoryError) -> Self {
        match err {
            ReviewRepositoryError::DuplicateReview(id) => Self::AlreadyReviewed(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for review operations.
pub type ReviewResult<T> = Result<T, ReviewError>;

/// Review submission service.
pub struct ReviewService<R, A, L, C>
where
    R: ReviewRepository + ?Sized,
    A: AssignmentRepository + ?Sized,
    L: AuditRepository + ?Sized,
    C: Clock + Send + Sync,
{
    reviews: Arc<R>,
    assignments: Arc<A>,
    audit: AuditTrail<L, C>,
    clock: Arc<C>,
}

impl<R, A, L, C> ReviewService<R, A, L, C>
where
    R: ReviewRepository + ?Sized,
    A: AssignmentRepository + ?Sized,
    L: AuditRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new review service.
    #[must_use]
    pub fn new(reviews: Arc<R>, assignments: Arc<A>, audit: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            reviews,
            assignments,
            audit: AuditTrail::new(audit, Arc::clone(&clock)),
            clock,
        }
    }

    /// Reviews an active assignment and marks it `done`.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::AssignmentNotFound`],
    /// [`ReviewError::NotActive`], [`ReviewError::AlreadyReviewed`] or
    /// [`ReviewError::Domain`] for an out-of-range rating.
    pub async fn submit(
        &self,
        actor: Actor,
        assignment_id: AssignmentId,
        rating: i64,
        comment: Option<String>,
    ) -> ReviewResult<Review> {
        actor.require_any(&REVIEWER_ROLES)?;
        let stars = Rating::new(rating)?;
        let mut assignment = self
            .assignments
            .find_by_id(assignment_id)
            .await?
            .ok_or(ReviewError::AssignmentNotFound(assignment_id))?;
        if assignment.state() != AssignmentState::Active {
            return Err(ReviewError::NotActive(assignment_id));
        }
        if self
            .reviews
            .find_by_assignment(assignment_id)
            .await?
            .is_some()
        {
            return Err(ReviewError::AlreadyReviewed(assignment_id));
        }

        let review = Review::of_assignment(&assignment, actor.id, stars, comment, &*self.clock);
        let reopened = assignment.clone();
        // A stored review always belongs to a finished assignment.
        assignment.transition_to(AssignmentState::Done, &*self.clock)?;
        self.assignments.update(&assignment).await?;
        if let Err(err) = self.reviews.store(&review).await {
            if let Err(restore) = self.assignments.update(&reopened).await {
                warn!(
                    assignment_id = %assignment_id,
                    error = %restore,
                    "could not reopen assignment after a failed review"
                );
            }
            return Err(err.into());
        }

        self.audit
            .record(
                Some(actor.id),
                AuditAction::ReviewCreated,
                EntityRef::new(EntityKind::Review, review.id.into_inner()),
                json!({ "assignment_id": assignment_id, "rating": stars.value() }),
            )
            .await;
        info!(
            review_id = %review.id,
            assignment_id = %assignment_id,
            rating = stars.value(),
            "review submitted"
        );
        Ok(review)
    }

    /// Lists the reviews a student received, newest first.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn list_for_student(&self, student_id: UserId) -> ReviewResult<Vec<Review>> {
        Ok(self.reviews.list_for_student(student_id).await?)
    }
}
