//! `PostgreSQL` repository implementation for reviews.

use super::schema::reviews;
use crate::assignment::domain::AssignmentId;
use crate::db::{self, PgPool};
use crate::review::{
    domain::{Rating, Review, ReviewId},
    ports::{ReviewRepository, ReviewRepositoryError, ReviewRepositoryResult},
};
use crate::task::domain::TaskId;
use crate::user::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

const ASSIGNMENT_CONSTRAINT: &str = "uq_review_assignment";

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct ReviewRow {
    id: uuid::Uuid,
    assignment_id: uuid::Uuid,
    student_id: uuid::Uuid,
    task_id: uuid::Uuid,
    mentor_id: uuid::Uuid,
    rating: i16,
    comment: Option<String>,
    created_at: DateTime<Utc>,
}

/// `PostgreSQL`-backed review repository.
#[derive(Debug, Clone)]
pub struct PostgresReviewRepository {
    pool: PgPool,
}

impl PostgresReviewRepository {
    /// Creates a repository over a shared connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn store(&self, review: &Review) -> ReviewRepositoryResult<()> {
        let row = to_row(review);
        let assignment_id = review.assignment_id;
        db::run_blocking(&self.pool, move |connection| {
            diesel::insert_into(reviews::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| {
                    if db::is_unique_violation(&err, ASSIGNMENT_CONSTRAINT) {
                        ReviewRepositoryError::DuplicateReview(assignment_id)
                    } else {
                        ReviewRepositoryError::persistence(err)
                    }
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_assignment(
        &self,
        assignment_id: AssignmentId,
    ) -> ReviewRepositoryResult<Option<Review>> {
        db::run_blocking(&self.pool, move |connection| {
            reviews::table
                .filter(reviews::assignment_id.eq(assignment_id.into_inner()))
                .select(ReviewRow::as_select())
                .first::<ReviewRow>(connection)
                .optional()
                .map_err(ReviewRepositoryError::persistence)?
                .map(row_to_review)
                .transpose()
        })
        .await
    }

    async fn list_for_student(&self, student_id: UserId) -> ReviewRepositoryResult<Vec<Review>> {
        db::run_blocking(&self.pool, move |connection| {
            reviews::table
                .filter(reviews::student_id.eq(student_id.into_inner()))
                .order((reviews::created_at.desc(), reviews::id.desc()))
                .select(ReviewRow::as_select())
                .load::<ReviewRow>(connection)
                .map_err(ReviewRepositoryError::persistence)?
                .into_iter()
                .map(row_to_review)
                .collect()
        })
        .await
    }
}

fn to_row(review: &Review) -> ReviewRow {
    ReviewRow {
        id: review.id.into_inner(),
        assignment_id: review.assignment_id.into_inner(),
        student_id: review.student_id.into_inner(),
        task_id: review.task_id.into_inner(),
        mentor_id: review.mentor_id.into_inner(),
        rating: i16::from(review.rating.value()),
        comment: review.comment.clone(),
        created_at: review.created_at,
    }
}

fn row_to_review(row: ReviewRow) -> ReviewRepositoryResult<Review> {
    let rating = Rating::new(i64::from(row.rating)).map_err(ReviewRepositoryError::persistence)?;
    Ok(Review {
        id: ReviewId::from_uuid(row.id),
        assignment_id: AssignmentId::from_uuid(row.assignment_id),
        student_id: UserId::from_uuid(row.student_id),
        task_id: TaskId::from_uuid(row.task_id),
        mentor_id: UserId::from_uuid(row.mentor_id),
        rating,
        comment: row.comment,
        created_at: row.created_at,
    })
}
