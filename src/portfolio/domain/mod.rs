//! Domain model for generated portfolio entries.

mod entry;
mod ids;

pub use entry::PortfolioEntry;
pub use ids::PortfolioEntryId;

use thiserror::Error;

/// Errors raised while generating portfolio entries.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PortfolioDomainError {
    /// The summary template failed to render.
    #[error("failed to render portfolio summary: {0}")]
    SummaryRender(String),
}
