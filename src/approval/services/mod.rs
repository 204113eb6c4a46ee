//! Credit request orchestration services.

mod requests;

pub use requests::{ApprovalError, ApprovalResult, ApprovalService};
