//! `PostgreSQL` adapter for credit requests.

mod models;
mod repository;
mod schema;

pub use repository::PostgresApprovalRepository;
