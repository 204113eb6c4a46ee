//! Port contracts for reviews.

pub mod repository;

pub use repository::{ReviewRepository, ReviewRepositoryError, ReviewRepositoryResult};

#[cfg(test)]
pub use repository::MockReviewRepository;
