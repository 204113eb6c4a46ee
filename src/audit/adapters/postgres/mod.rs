//! `PostgreSQL` adapters for the audit trail.

mod models;
mod repository;
mod schema;

pub use repository::PostgresAuditRepository;
