//! In-memory portfolio adapter.

mod entries;

pub use entries::InMemoryPortfolioRepository;
