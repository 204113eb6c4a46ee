//! `PostgreSQL` adapter for reviews.

mod repository;
mod schema;

pub use repository::PostgresReviewRepository;
