//! Portfolio read services.

mod listing;

pub use listing::{PortfolioError, PortfolioItem, PortfolioService};
