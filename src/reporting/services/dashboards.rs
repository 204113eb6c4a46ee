//! Manager and HR dashboards.

use crate::assignment::{
    domain::AssignmentState,
    ports::{AssignmentRepository, AssignmentRepositoryError},
};
use crate::reporting::domain::{
    ApplicationWithStudent, HrStudentSummary, ManagerDashboard, StudentStats, StudentSummary,
    StudentWithStats,
};
use crate::review::ports::{ReviewRepository, ReviewRepositoryError};
use crate::task::{
    domain::{TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::{
    domain::{AccessDenied, Actor, Role, User, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Roles that see manager dashboards and student statistics.
pub const REPORT_VIEWERS: [Role; 2] = [Role::Manager, Role::Admin];

/// Roles that see the HR talent dashboard.
pub const HR_VIEWERS: [Role; 3] = [Role::Hr, Role::Manager, Role::Admin];

/// Result type for reporting operations.
pub type ReportingResult<T> = Result<T, ReportingError>;

/// Service-level errors for reporting.
#[derive(Debug, Error)]
pub enum ReportingError {
    /// User repository failure.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),

    /// Task repository failure.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// Assignment repository failure.
    #[error(transparent)]
    Assignments(#[from] AssignmentRepositoryError),

    /// Review repository failure.
    #[error(transparent)]
    Reviews(#[from] ReviewRepositoryError),

    /// The actor may not view reports.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    /// The student does not exist.
    #[error("Student not found")]
    StudentNotFound(UserId),

    /// The listing does not exist.
    #[error("Project not found")]
    TaskNotFound(TaskId),
}

/// Read-only reporting over users, listings, applications and reviews.
pub struct ReportingService<U, T, A, R>
where
    U: UserRepository + ?Sized,
    T: TaskRepository + ?Sized,
    A: AssignmentRepository + ?Sized,
    R: ReviewRepository + ?Sized,
{
    users: Arc<U>,
    tasks: Arc<T>,
    assignments: Arc<A>,
    reviews: Arc<R>,
}

impl<U, T, A, R> ReportingService<U, T, A, R>
where
    U: UserRepository + ?Sized,
    T: TaskRepository + ?Sized,
    A: AssignmentRepository + ?Sized,
    R: ReviewRepository + ?Sized,
{
    /// Creates a new reporting service.
    #[must_use]
    pub const fn new(users: Arc<U>, tasks: Arc<T>, assignments: Arc<A>, reviews: Arc<R>) -> Self {
        Self {
            users,
            tasks,
            assignments,
            reviews,
        }
    }

    /// Returns platform-wide counters.
    ///
    /// # Errors
    ///
    /// Returns [`ReportingError::Forbidden`] for roles outside
    /// [`REPORT_VIEWERS`], or repository errors.
    pub async fn manager_dashboard(&self, actor: Actor) -> ReportingResult<ManagerDashboard> {
        actor.require_any(&REPORT_VIEWERS)?;

        let counts = self.tasks.status_counts().await?;
        let count_of = |status: TaskStatus| counts.get(&status).copied().unwrap_or_default();
        let students = self.users.list_by_role(Role::Student).await?;
        let mentors = self.users.list_by_role(Role::Mentor).await?;

        let dashboard = ManagerDashboard {
            total_projects: counts.values().sum(),
            active_projects: count_of(TaskStatus::Open)
                .saturating_add(count_of(TaskStatus::InProgress)),
            pending_applications: self
                .assignments
                .count_in_state(AssignmentState::Requested)
                .await?,
            students: len_u64(students.iter().filter(|user| user.is_active_member())),
            mentors: len_u64(mentors.iter()),
        };
        debug!(?dashboard, "manager dashboard computed");
        Ok(dashboard)
    }

    /// Returns one student's statistics.
    ///
    /// # Errors
    ///
    /// Returns [`ReportingError::StudentNotFound`] when the account does not
    /// exist or is not a student.
    pub async fn student_stats(&self, actor: Actor, id: UserId) -> ReportingResult<StudentStats> {
        actor.require_any(&REPORT_VIEWERS)?;
        let student = self
            .users
            .find_by_id(id)
            .await?
            .filter(|user| user.role().is_student())
            .ok_or(ReportingError::StudentNotFound(id))?;
        self.stats_for(student.id()).await
    }

    /// Lists every student with their statistics, whatever the account
    /// status, in registration order.
    ///
    /// # Errors
    ///
    /// Returns [`ReportingError::Forbidden`] or repository errors.
    pub async fn students_with_stats(
        &self,
        actor: Actor,
    ) -> ReportingResult<Vec<StudentWithStats>> {
        actor.require_any(&REPORT_VIEWERS)?;
        let mut rows = Vec::new();
        for student in self.users.list_by_role(Role::Student).await? {
            let stats = self.stats_for(student.id()).await?;
            rows.push(StudentWithStats {
                student: StudentSummary::from(&student),
                stats,
            });
        }
        Ok(rows)
    }

    /// Lists a listing's applications with applicant profiles and statistics.
    ///
    /// Applications whose student account no longer exists are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ReportingError::TaskNotFound`] or repository errors.
    pub async fn applications_for_task(
        &self,
        actor: Actor,
        task_id: TaskId,
    ) -> ReportingResult<Vec<ApplicationWithStudent>> {
        actor.require_any(&REPORT_VIEWERS)?;
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(ReportingError::TaskNotFound(task_id))?;

        let mut rows = Vec::new();
        for assignment in self.assignments.list_for_task(task_id).await? {
            let Some(student) = self.users.find_by_id(assignment.student_id()).await? else {
                continue;
            };
            let stats = self.stats_for(student.id()).await?;
            rows.push(ApplicationWithStudent {
                assignment,
                student: StudentSummary::from(&student),
                stats,
            });
        }
        Ok(rows)
    }

    /// Ranks active students by average rating, then by finished projects.
    ///
    /// Students without reviews rank as if rated zero.
    ///
    /// # Errors
    ///
    /// Returns [`ReportingError::Forbidden`] for roles outside
    /// [`HR_VIEWERS`], or repository errors.
    pub async fn hr_dashboard(&self, actor: Actor) -> ReportingResult<Vec<HrStudentSummary>> {
        actor.require_any(&HR_VIEWERS)?;
        let mut rows = Vec::new();
        for student in self.active_students().await? {
            let stats = self.stats_for(student.id()).await?;
            rows.push(HrStudentSummary {
                id: student.id(),
                full_name: student.full_name().clone(),
                email: student.email().clone(),
                skills: student.profile().skills.clone(),
                completed_projects: stats.projects_completed,
                average_rating: stats.average_rating,
            });
        }
        rows.sort_by(|left, right| {
            let rating = |row: &HrStudentSummary| row.average_rating.unwrap_or_default();
            rating(right)
                .total_cmp(&rating(left))
                .then(right.completed_projects.cmp(&left.completed_projects))
        });
        Ok(rows)
    }

    async fn active_students(&self) -> ReportingResult<Vec<User>> {
        let students = self.users.list_by_role(Role::Student).await?;
        Ok(students
            .into_iter()
            .filter(User::is_active_member)
            .collect())
    }

    async fn stats_for(&self, student_id: UserId) -> ReportingResult<StudentStats> {
        let applications = self
            .assignments
            .state_counts_for_student(student_id)
            .await?;
        let reviews = self.reviews.list_for_student(student_id).await?;
        Ok(StudentStats::tally(&applications, &reviews))
    }
}

fn len_u64<T>(items: impl Iterator<Item = T>) -> u64 {
    u64::try_from(items.count()).unwrap_or(u64::MAX)
}
