//! Application services for the audit trail.

mod trail;

pub use trail::AuditTrail;
