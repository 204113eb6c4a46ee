//! Authentication failures.

use crate::user::ports::UserRepositoryError;
use thiserror::Error;

/// Errors raised while signing in or verifying tokens.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Unknown email or wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The token is malformed, expired, of the wrong type or badly signed.
    #[error("Invalid token")]
    InvalidToken,

    /// The token names a user that no longer exists.
    #[error("User not found")]
    UserNotFound,

    /// The token predates a token-version bump.
    #[error("Token has been revoked")]
    TokenRevoked,

    /// The account was soft-deleted.
    #[error("Account is deleted")]
    AccountDeleted,

    /// The account was disabled.
    #[error("Account is disabled")]
    AccountDisabled,

    /// The account awaits approval.
    #[error("Account is pending approval")]
    AccountPending,

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// Token signing failed.
    #[error("token signing failed: {0}")]
    Signing(String),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}
