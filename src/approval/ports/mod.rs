//! Port contracts for credit requests.

pub mod repository;

pub use repository::{ApprovalRepository, ApprovalRepositoryError, ApprovalRepositoryResult};
