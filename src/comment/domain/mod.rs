//! Domain model for discussion entries.

mod comment;
mod ids;

pub use comment::{Comment, CommentBody, CommentPatch, NewComment, PersistedCommentData};
pub use ids::CommentId;

use thiserror::Error;

/// Errors returned by comment validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommentDomainError {
    /// The body is blank or longer than 2000 characters.
    #[error("comment body must be between 1 and 2000 characters")]
    InvalidBody,
}
