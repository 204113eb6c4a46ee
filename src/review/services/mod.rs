//! Review orchestration services.

mod submission;

pub use submission::{REVIEWER_ROLES, ReviewError, ReviewResult, ReviewService};
