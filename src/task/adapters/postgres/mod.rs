//! `PostgreSQL` adapters for project listings.

mod mentor;
mod models;
mod repository;
mod schema;

pub use mentor::PostgresTaskMentorRepository;
pub use repository::PostgresTaskRepository;
