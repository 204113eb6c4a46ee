//! Read models for dashboards and student statistics.

use crate::assignment::{
    domain::{Assignment, AssignmentState},
    ports::AssignmentStateCounts,
};
use crate::review::domain::Review;
use crate::user::domain::{Email, FullName, User, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Platform-wide counters for managers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ManagerDashboard {
    /// Listings of any status.
    pub total_projects: u64,
    /// Listings that are open or in progress.
    pub active_projects: u64,
    /// Applications awaiting a decision.
    pub pending_applications: u64,
    /// Active student accounts.
    pub students: u64,
    /// Mentor accounts.
    pub mentors: u64,
}

/// Application outcomes and review results of one student.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StudentStats {
    /// Applications filed.
    pub applications_total: u64,
    /// Applications currently active.
    pub applications_approved: u64,
    /// Applications canceled or rejected.
    pub applications_rejected: u64,
    /// Assignments finished.
    pub projects_completed: u64,
    /// Reviews received.
    pub reviews_count: u64,
    /// Mean rating, absent without reviews.
    pub average_rating: Option<f64>,
}

impl StudentStats {
    /// Tallies a student's per-state application counts and reviews.
    #[must_use]
    pub fn tally(applications: &AssignmentStateCounts, reviews: &[Review]) -> Self {
        let count_in =
            |state: AssignmentState| applications.get(&state).copied().unwrap_or_default();
        Self {
            applications_total: applications
                .values()
                .fold(0, |total, count| total.saturating_add(*count)),
            applications_approved: count_in(AssignmentState::Active),
            applications_rejected: count_in(AssignmentState::Canceled),
            projects_completed: count_in(AssignmentState::Done),
            reviews_count: count(reviews.iter()),
            average_rating: average_rating(reviews),
        }
    }
}

fn count<T>(items: impl Iterator<Item = T>) -> u64 {
    u64::try_from(items.count()).unwrap_or(u64::MAX)
}

#[expect(clippy::float_arithmetic, reason = "mean rating is reported as a float")]
fn average_rating(reviews: &[Review]) -> Option<f64> {
    let total: u32 = reviews
        .iter()
        .map(|review| u32::from(review.rating.value()))
        .sum();
    let reviewed = u32::try_from(reviews.len()).ok().filter(|len| *len > 0)?;
    Some(f64::from(total) / f64::from(reviewed))
}

/// Public profile of a student shown in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentSummary {
    /// Account identifier.
    pub id: UserId,
    /// Email address.
    pub email: Email,
    /// Display name.
    pub full_name: FullName,
    /// Faculty.
    pub faculty: Option<String>,
    /// Skills.
    pub skills: Option<String>,
    /// Course of study.
    pub course: Option<String>,
    /// Registration time.
    pub created_at: DateTime<Utc>,
    /// Last sign-in time.
    pub last_active_at: Option<DateTime<Utc>>,
}

impl From<&User> for StudentSummary {
    fn from(user: &User) -> Self {
        let profile = user.profile();
        Self {
            id: user.id(),
            email: user.email().clone(),
            full_name: user.full_name().clone(),
            faculty: profile.faculty.clone(),
            skills: profile.skills.clone(),
            course: profile.course.clone(),
            created_at: user.created_at(),
            last_active_at: user.last_active_at(),
        }
    }
}

/// Student summary with statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentWithStats {
    /// The student.
    #[serde(flatten)]
    pub student: StudentSummary,
    /// Their statistics.
    pub stats: StudentStats,
}

/// Application to a listing with the applicant's profile and statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationWithStudent {
    /// The application.
    #[serde(flatten)]
    pub assignment: Assignment,
    /// The applicant.
    pub student: StudentSummary,
    /// The applicant's statistics.
    pub stats: StudentStats,
}

/// Line of the HR talent dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HrStudentSummary {
    /// Account identifier.
    pub id: UserId,
    /// Display name.
    pub full_name: FullName,
    /// Email address.
    pub email: Email,
    /// Skills.
    pub skills: Option<String>,
    /// Finished assignments.
    pub completed_projects: u64,
    /// Mean rating, absent without reviews.
    pub average_rating: Option<f64>,
}
