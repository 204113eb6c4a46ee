//! `PostgreSQL` adapter for portfolio entries.

mod repository;
mod schema;

pub use repository::PostgresPortfolioRepository;
