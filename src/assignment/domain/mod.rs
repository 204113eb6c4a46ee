//! Domain model for student applications.
//!
//! An application starts `requested`; staff move it to `active` or
//! `canceled`, and an active one ends `done` or `canceled`.

mod assignment;
mod error;
mod fields;
mod ids;
mod state;

pub use assignment::{Assignment, Decision, PersistedAssignmentData};
pub use error::{AssignmentDomainError, ParseAssignmentStateError};
pub use fields::{DecisionReason, TeamRole};
pub use ids::AssignmentId;
pub use state::AssignmentState;
