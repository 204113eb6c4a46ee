//! Port contracts for portfolio entries.

pub mod repository;

pub use repository::{PortfolioRepository, PortfolioRepositoryError, PortfolioRepositoryResult};
