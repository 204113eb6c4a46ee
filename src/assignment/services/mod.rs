//! Application services for student applications.

mod access;
mod application;
mod team;

pub use access::holds_nda_clearance;
pub use application::{
    APPLICANT_ROLES, ApplicationError, ApplicationResult, ApplicationService, DECISION_ROLES,
    LIFECYCLE_ROLES,
};
pub use team::{TeamError, TeamMember, TeamService};
