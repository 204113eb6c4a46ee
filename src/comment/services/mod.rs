//! Discussion orchestration services.

mod discussion;

pub use discussion::{DiscussionError, DiscussionResult, DiscussionService, Thread};
