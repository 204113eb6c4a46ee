//! Error types for credit request rules.

use super::ApprovalState;
use thiserror::Error;

/// Errors returned by approval domain operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApprovalDomainError {
    /// The requested state change is not permitted.
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition {
        /// Current state.
        from: ApprovalState,
        /// Requested state.
        to: ApprovalState,
    },

    /// Reviewers may only approve, reject or request changes.
    #[error("{0} is not a review decision")]
    NotADecision(ApprovalState),
}

/// Error returned while parsing an approval kind or state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown approval value: {0}")]
pub struct ParseApprovalValueError(pub String);
