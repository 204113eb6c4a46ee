//! Review record.

use super::{Rating, ReviewId};
use crate::assignment::domain::{Assignment, AssignmentId};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A reviewer's rating of one assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Review identifier.
    pub id: ReviewId,
    /// Reviewed assignment.
    pub assignment_id: AssignmentId,
    /// Reviewed student.
    pub student_id: UserId,
    /// Project the work was done on.
    pub task_id: TaskId,
    /// Reviewer.
    pub mentor_id: UserId,
    /// Star rating.
    pub rating: Rating,
    /// Optional free-text feedback.
    pub comment: Option<String>,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Creates a review of `assignment` by `mentor_id`.
    #[must_use]
    pub fn of_assignment(
        assignment: &Assignment,
        mentor_id: UserId,
        rating: Rating,
        comment: Option<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: ReviewId::new(),
            assignment_id: assignment.id(),
            student_id: assignment.student_id(),
            task_id: assignment.task_id(),
            mentor_id,
            rating,
            comment: comment.filter(|text| !text.trim().is_empty()),
            created_at: clock.utc(),
        }
    }
}
