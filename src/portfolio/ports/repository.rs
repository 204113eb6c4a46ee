//! Repository port for portfolio entries.

use crate::portfolio::domain::PortfolioEntry;
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for portfolio repository operations.
pub type PortfolioRepositoryResult<T> = Result<T, PortfolioRepositoryError>;

/// Portfolio persistence contract.
#[async_trait]
pub trait PortfolioRepository: Send + Sync {
    /// Stores an entry unless its assignment already has one.
    ///
    /// Returns the stored entry, or the existing one for the assignment.
    async fn record(&self, entry: &PortfolioEntry) -> PortfolioRepositoryResult<PortfolioEntry>;

    /// Lists a student's entries, newest first.
    async fn list_for_student(
        &self,
        student_id: UserId,
    ) -> PortfolioRepositoryResult<Vec<PortfolioEntry>>;
}

/// Errors returned by portfolio repository implementations.
#[derive(Debug, Clone, Error)]
pub enum PortfolioRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PortfolioRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<crate::db::DbError> for PortfolioRepositoryError {
    fn from(err: crate::db::DbError) -> Self {
        Self::persistence(err)
    }
}
