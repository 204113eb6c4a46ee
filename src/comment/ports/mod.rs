//! Port contracts for discussion entries.

pub mod repository;

pub use repository::{CommentRepository, CommentRepositoryError, CommentRepositoryResult};
