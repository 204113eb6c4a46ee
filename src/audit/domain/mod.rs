//! Domain model for the audit trail.

mod entry;
mod ids;

pub use entry::{AuditAction, AuditEntry, EntityKind, EntityRef};
pub use ids::AuditEntryId;

/// Error returned while parsing persisted audit values.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("unknown audit value: {0}")]
pub struct ParseAuditValueError(pub String);
