//! Port contracts for student applications.

pub mod repository;

pub use repository::{
    AssignmentRepository, AssignmentRepositoryError, AssignmentRepositoryResult,
    AssignmentStateCounts,
};
