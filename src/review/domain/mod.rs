//! Domain model for mentor reviews.

mod ids;
mod rating;
mod review;

pub use ids::ReviewId;
pub use rating::Rating;
pub use review::Review;

use thiserror::Error;

/// Errors returned by review domain validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReviewDomainError {
    /// The rating lies outside 1..=5.
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(i64),
}
