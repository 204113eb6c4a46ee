//! `PostgreSQL` adapter for student applications.

mod models;
mod repository;
mod schema;

pub use repository::PostgresAssignmentRepository;
