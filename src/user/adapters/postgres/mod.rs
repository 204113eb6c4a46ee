//! `PostgreSQL` adapters for user accounts.

mod models;
mod repository;
mod schema;

pub use repository::PostgresUserRepository;
