//! Error types for user domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing user domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The email address is malformed.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The full name is outside the accepted length range.
    #[error("full name must be between 2 and 255 characters")]
    InvalidFullName,

    /// The password is outside the accepted length range.
    #[error("password must be between 8 and 128 characters")]
    InvalidPassword,

    /// A profile field exceeds its maximum length.
    #[error("profile field '{field}' exceeds {max} characters")]
    ProfileFieldTooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Maximum accepted length.
        max: usize,
    },
}

/// Error returned while parsing roles from requests or persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

/// Error returned while parsing account statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown user status: {0}")]
pub struct ParseUserStatusError(pub String);

/// The acting user lacks a role required by the operation.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Not enough permissions")]
pub struct AccessDenied;
