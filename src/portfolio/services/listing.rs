//! Student portfolio listing.

use crate::portfolio::{
    domain::PortfolioEntry,
    ports::{PortfolioRepository, PortfolioRepositoryError},
};
use crate::review::{
    domain::Rating,
    ports::{ReviewRepository, ReviewRepositoryError},
};
use crate::user::domain::UserId;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Portfolio entry joined with its review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioItem {
    /// The generated entry.
    #[serde(flatten)]
    pub entry: PortfolioEntry,
    /// Review rating, once the work was reviewed.
    pub rating: Option<Rating>,
    /// Review feedback, once the work was reviewed.
    pub review_comment: Option<String>,
}

/// Service-level errors for portfolio listing.
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// Portfolio repository failure.
    #[error(transparent)]
    Entries(#[from] PortfolioRepositoryError),

    /// Review repository failure.
    #[error(transparent)]
    Reviews(#[from] ReviewRepositoryError),
}

/// Portfolio read service.
pub struct PortfolioService<P, R>
where
    P: PortfolioRepository + ?Sized,
    R: ReviewRepository + ?Sized,
{
    entries: Arc<P>,
    reviews: Arc<R>,
}

impl<P, R> PortfolioService<P, R>
where
    P: PortfolioRepository + ?Sized,
    R: ReviewRepository + ?Sized,
{
    /// Creates a new portfolio service.
    #[must_use]
    pub const fn new(entries: Arc<P>, reviews: Arc<R>) -> Self {
        Self { entries, reviews }
    }

    /// Lists a student's portfolio, newest first.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn list_for_student(
        &self,
        student_id: UserId,
    ) -> Result<Vec<PortfolioItem>, PortfolioError> {
        let mut reviews: HashMap<_, _> = self
            .reviews
            .list_for_student(student_id)
            .await?
            .into_iter()
            .map(|review| (review.assignment_id, review))
            .collect();
        let entries = self.entries.list_for_student(student_id).await?;
        Ok(entries
            .into_iter()
            .map(|entry| {
                let review = reviews.remove(&entry.assignment_id);
                PortfolioItem {
                    rating: review.as_ref().map(|found| found.rating),
                    review_comment: review.and_then(|found| found.comment),
                    entry,
                }
            })
            .collect())
    }
}
