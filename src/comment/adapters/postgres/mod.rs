//! `PostgreSQL` adapter for discussion entries.

mod models;
mod repository;
mod schema;

pub use repository::PostgresCommentRepository;
