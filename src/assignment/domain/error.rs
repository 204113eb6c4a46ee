//! Error types for assignment validation and lifecycle rules.

use super::AssignmentState;
use thiserror::Error;

/// Errors returned by assignment domain operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssignmentDomainError {
    /// The team role is blank or longer than 100 characters.
    #[error("team role must be between 1 and 100 characters")]
    InvalidTeamRole,

    /// The decision reason is longer than 500 characters.
    #[error("decision reason must be at most 500 characters")]
    DecisionReasonTooLong,

    /// The requested state change is not permitted.
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition {
        /// Current state.
        from: AssignmentState,
        /// Requested state.
        to: AssignmentState,
    },
}

/// Error returned while parsing an assignment state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown assignment state: {0}")]
pub struct ParseAssignmentStateError(pub String);
