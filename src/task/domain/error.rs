//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing task domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is outside the accepted length range.
    #[error("title must be between 3 and 255 characters")]
    InvalidTitle,

    /// The description is too short.
    #[error("description must be at least 10 characters")]
    DescriptionTooShort,
}

/// Error returned while parsing task enumerations from requests or
/// persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseTaskValueError {
    /// Which enumeration was being parsed.
    pub kind: &'static str,
    /// The rejected value.
    pub value: String,
}
