//! Domain model for credit requests.

mod approval;
mod error;
mod ids;
mod kind;

pub use approval::{Approval, PersistedApprovalData};
pub use error::{ApprovalDomainError, ParseApprovalValueError};
pub use ids::ApprovalId;
pub use kind::{ApprovalKind, ApprovalState};
