//! Manager and HR dashboard tests.

use std::collections::HashSet;
use std::sync::Arc;

use crate::assignment::{
    adapters::memory::InMemoryAssignmentRepository,
    domain::{Assignment, AssignmentState},
    ports::AssignmentRepository,
};
use crate::reporting::{
    domain::ManagerDashboard,
    services::{ReportingError, ReportingService},
};
use crate::review::{
    adapters::memory::InMemoryReviewRepository,
    domain::{Rating, Review},
    ports::ReviewRepository,
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskDescription, TaskDraft, TaskId, TaskStatus, TaskTitle},
    ports::TaskRepository,
};
use crate::user::{
    adapters::memory::InMemoryUserRepository,
    domain::{AccountFields, Actor, Email, FullName, Role, User, UserId, UserProfile, UserStatus},
    ports::UserRepository,
};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type Service = ReportingService<
    InMemoryUserRepository,
    InMemoryTaskRepository,
    InMemoryAssignmentRepository,
    InMemoryReviewRepository,
>;

struct Harness {
    service: Service,
    users: Arc<InMemoryUserRepository>,
    tasks: Arc<InMemoryTaskRepository>,
    assignments: Arc<InMemoryAssignmentRepository>,
    reviews: Arc<InMemoryReviewRepository>,
}

#[fixture]
fn harness() -> Harness {
    let users = Arc::new(InMemoryUserRepository::new());
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let assignments = Arc::new(InMemoryAssignmentRepository::new());
    let reviews = Arc::new(InMemoryReviewRepository::new());
    Harness {
        service: ReportingService::new(
            Arc::clone(&users),
            Arc::clone(&tasks),
            Arc::clone(&assignments),
            Arc::clone(&reviews),
        ),
        users,
        tasks,
        assignments,
        reviews,
    }
}

fn manager() -> Actor {
    Actor::new(UserId::new(), Role::Manager)
}

async fn member(harness: &Harness, email: &str, role: Role, status: UserStatus) -> User {
    let user = User::new(
        Email::new(email).expect("valid email"),
        AccountFields {
            full_name: FullName::new("Report Subject").expect("valid name"),
            password_hash: "hash".to_owned(),
            role,
            status,
            profile: UserProfile {
                skills: Some("rust".to_owned()),
                ..UserProfile::default()
            },
        },
        &DefaultClock,
    );
    harness.users.store(&user).await.expect("store user");
    user
}

async fn listing(harness: &Harness, status: TaskStatus) -> Task {
    let mut draft = TaskDraft::new(
        TaskTitle::new("Reported project").expect("valid title"),
        TaskDescription::new("Counted by dashboards").expect("valid description"),
    );
    draft.status = status;
    let task = Task::new(draft, UserId::new(), &DefaultClock);
    harness.tasks.store(&task).await.expect("store listing");
    task
}

async fn application(harness: &Harness, task: &Task, student: &User, done: bool) -> Assignment {
    let mut assignment = Assignment::new(task.id(), student.id(), false, &DefaultClock);
    if done {
        assignment
            .transition_to(AssignmentState::Active, &DefaultClock)
            .expect("activate");
        assignment
            .transition_to(AssignmentState::Done, &DefaultClock)
            .expect("finish");
    }
    harness
        .assignments
        .store(&assignment)
        .await
        .expect("store application");
    assignment
}

async fn rate(harness: &Harness, assignment: &Assignment, rating: i64) {
    let review = Review::of_assignment(
        assignment,
        UserId::new(),
        Rating::new(rating).expect("valid rating"),
        None,
        &DefaultClock,
    );
    harness.reviews.store(&review).await.expect("store review");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn manager_dashboard_counts_platform_state(harness: Harness) -> eyre::Result<()> {
    let open = listing(&harness, TaskStatus::Open).await;
    listing(&harness, TaskStatus::InProgress).await;
    listing(&harness, TaskStatus::Closed).await;
    let active = member(&harness, "active@example.com", Role::Student, UserStatus::Active).await;
    member(&harness, "pending@example.com", Role::Student, UserStatus::Pending).await;
    member(&harness, "mentor@example.com", Role::Mentor, UserStatus::Active).await;
    application(&harness, &open, &active, false).await;

    let dashboard = harness.service.manager_dashboard(manager()).await?;

    ensure!(
        dashboard
            == ManagerDashboard {
                total_projects: 3,
                active_projects: 2,
                pending_applications: 1,
                students: 1,
                mentors: 1,
            },
        "unexpected dashboard: {dashboard:?}"
    );
    Ok(())
}

#[rstest]
#[case(Role::Student)]
#[case(Role::Mentor)]
#[case(Role::Hr)]
#[tokio::test(flavor = "multi_thread")]
async fn dashboard_is_limited_to_managers(harness: Harness, #[case] role: Role) {
    let result = harness
        .service
        .manager_dashboard(Actor::new(UserId::new(), role))
        .await;
    assert!(matches!(result, Err(ReportingError::Forbidden(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn student_stats_reject_non_students(harness: Harness) {
    let mentor = member(&harness, "mentor@example.com", Role::Mentor, UserStatus::Active).await;

    let result = harness.service.student_stats(manager(), mentor.id()).await;

    assert!(matches!(result, Err(ReportingError::StudentNotFound(_))));
    assert_eq!(
        result.err().map(|err| err.to_string()).as_deref(),
        Some("Student not found")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn applications_carry_student_and_stats(harness: Harness) -> eyre::Result<()> {
    let task = listing(&harness, TaskStatus::Open).await;
    let past = listing(&harness, TaskStatus::Completed).await;
    let student = member(
        &harness,
        "applicant@example.com",
        Role::Student,
        UserStatus::Active,
    )
    .await;
    let finished = application(&harness, &past, &student, true).await;
    rate(&harness, &finished, 5).await;
    application(&harness, &task, &student, false).await;

    let rows = harness
        .service
        .applications_for_task(manager(), task.id())
        .await?;

    ensure!(rows.len() == 1, "one application expected");
    let row = rows.first().ok_or_else(|| eyre::eyre!("missing row"))?;
    ensure!(row.student.id == student.id(), "applicant should be attached");
    ensure!(row.stats.applications_total == 2, "history should be counted");
    ensure!(row.stats.projects_completed == 1, "finished work should count");
    ensure!(row.stats.reviews_count == 1, "review should count");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn applications_for_unknown_listing(harness: Harness) {
    let result = harness
        .service
        .applications_for_task(manager(), TaskId::new())
        .await;
    assert!(matches!(result, Err(ReportingError::TaskNotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn hr_dashboard_ranks_by_rating_then_completions(harness: Harness) -> eyre::Result<()> {
    let task = listing(&harness, TaskStatus::Completed).await;
    let unrated = member(&harness, "unrated@example.com", Role::Student, UserStatus::Active).await;
    let good = member(&harness, "good@example.com", Role::Student, UserStatus::Active).await;
    let best = member(&harness, "best@example.com", Role::Student, UserStatus::Active).await;
    member(&harness, "pending@example.com", Role::Student, UserStatus::Pending).await;

    application(&harness, &task, &unrated, true).await;
    let good_work = application(&harness, &task, &good, true).await;
    rate(&harness, &good_work, 3).await;
    let best_work = application(&harness, &task, &best, true).await;
    rate(&harness, &best_work, 5).await;

    let rows = harness
        .service
        .hr_dashboard(Actor::new(UserId::new(), Role::Hr))
        .await?;

    let order: Vec<_> = rows.iter().map(|row| row.id).collect();
    ensure!(
        order == vec![best.id(), good.id(), unrated.id()],
        "pending students are hidden and ratings rank first"
    );
    ensure!(
        rows.iter().all(|row| row.completed_projects == 1),
        "every listed student finished one project"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn students_with_stats_list_every_account_status(harness: Harness) -> eyre::Result<()> {
    let active = member(&harness, "active@example.com", Role::Student, UserStatus::Active).await;
    let pending = member(&harness, "pending@example.com", Role::Student, UserStatus::Pending).await;
    let disabled = member(
        &harness,
        "disabled@example.com",
        Role::Student,
        UserStatus::Disabled,
    )
    .await;
    member(&harness, "mentor@example.com", Role::Mentor, UserStatus::Active).await;

    let rows = harness.service.students_with_stats(manager()).await?;

    let listed: HashSet<_> = rows.iter().map(|row| row.student.id).collect();
    ensure!(
        rows.len() == 3 && listed == HashSet::from([active.id(), pending.id(), disabled.id()]),
        "pending and disabled students should be listed alongside active ones"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn student_stats_count_past_the_page_cap(harness: Harness) -> eyre::Result<()> {
    let student = member(&harness, "busy@example.com", Role::Student, UserStatus::Active).await;
    for _ in 0..250 {
        let assignment = Assignment::new(TaskId::new(), student.id(), false, &DefaultClock);
        harness.assignments.store(&assignment).await?;
    }

    let stats = harness.service.student_stats(manager(), student.id()).await?;

    ensure!(
        stats.applications_total == 250,
        "every application should count, got {}",
        stats.applications_total
    );
    Ok(())
}
