//! Port contracts for the audit trail.

pub mod repository;

pub use repository::{AuditRepository, AuditRepositoryError, AuditRepositoryResult};

#[cfg(test)]
pub use repository::MockAuditRepository;
