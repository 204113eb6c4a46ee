//! Port contracts for project listings.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod dependents;
pub mod mentor;
pub mod repository;

pub use dependents::TaskDependents;
pub use mentor::TaskMentorRepository;
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult, TaskStatusCounts};
