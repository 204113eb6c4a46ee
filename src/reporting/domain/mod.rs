//! Read models assembled from other contexts.

mod stats;

pub use stats::{
    ApplicationWithStudent, HrStudentSummary, ManagerDashboard, StudentStats, StudentSummary,
    StudentWithStats,
};
