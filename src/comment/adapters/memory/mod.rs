//! In-memory comment adapter.

mod comments;

pub use comments::InMemoryCommentRepository;
