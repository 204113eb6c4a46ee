//! Service tests for credit requests.

use std::sync::Arc;

use crate::Page;
use crate::approval::{
    adapters::memory::InMemoryApprovalRepository,
    domain::{ApprovalKind, ApprovalState},
    services::{ApprovalError, ApprovalService},
};
use crate::audit::{
    adapters::memory::InMemoryAuditRepository,
    domain::{AuditAction, EntityKind, EntityRef},
    ports::AuditRepository,
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{CreditOptions, Task, TaskDescription, TaskDraft, TaskId, TaskTitle},
    ports::TaskRepository,
};
use crate::user::domain::{Actor, Role, UserId};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type Service = ApprovalService<
    InMemoryApprovalRepository,
    InMemoryTaskRepository,
    InMemoryAuditRepository,
    DefaultClock,
>;

struct Harness {
    service: Service,
    tasks: Arc<InMemoryTaskRepository>,
    audit: Arc<InMemoryAuditRepository>,
}

#[fixture]
fn harness() -> Harness {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let audit = Arc::new(InMemoryAuditRepository::new());
    Harness {
        service: ApprovalService::new(
            Arc::new(InMemoryApprovalRepository::new()),
            Arc::clone(&tasks),
            Arc::clone(&audit),
            Arc::new(DefaultClock),
        ),
        tasks,
        audit,
    }
}

fn student() -> Actor {
    Actor::new(UserId::new(), Role::Student)
}

fn teacher() -> Actor {
    Actor::new(UserId::new(), Role::UnivTeacher)
}

async fn diploma_listing(tasks: &InMemoryTaskRepository) -> TaskId {
    let mut draft = TaskDraft::new(
        TaskTitle::new("Thesis topic").expect("valid title"),
        TaskDescription::new("Research-grade project").expect("valid description"),
    );
    draft.credits = CreditOptions {
        diploma_possible: true,
        ..CreditOptions::default()
    };
    let task = Task::new(draft, UserId::new(), &DefaultClock);
    tasks.store(&task).await.expect("store listing");
    task.id()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn students_submit_offered_credit(harness: Harness) -> eyre::Result<()> {
    let task_id = diploma_listing(&harness.tasks).await;
    let applicant = student();

    let approval = harness
        .service
        .submit(applicant, task_id, ApprovalKind::Diploma, None)
        .await?;

    ensure!(approval.state() == ApprovalState::Submitted, "should start submitted");
    ensure!(approval.requested_by() == applicant.id, "requester recorded");
    let mine = harness.service.list_mine(applicant.id).await?;
    ensure!(mine.len() == 1, "student should see the request");
    let trail = harness
        .audit
        .list_for_entity(EntityRef::new(EntityKind::Approval, approval.id().into_inner()))
        .await?;
    ensure!(
        trail.first().map(|entry| entry.action) == Some(AuditAction::ApprovalSubmitted),
        "submission should be audited"
    );
    Ok(())
}

#[rstest]
#[case(Role::Mentor)]
#[case(Role::Manager)]
#[case(Role::UnivTeacher)]
#[tokio::test(flavor = "multi_thread")]
async fn only_students_submit(harness: Harness, #[case] role: Role) {
    let task_id = diploma_listing(&harness.tasks).await;
    let result = harness
        .service
        .submit(Actor::new(UserId::new(), role), task_id, ApprovalKind::Diploma, None)
        .await;
    assert!(matches!(result, Err(ApprovalError::Forbidden(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn credit_must_be_offered(harness: Harness) {
    let task_id = diploma_listing(&harness.tasks).await;
    let result = harness
        .service
        .submit(student(), task_id, ApprovalKind::Practice, None)
        .await;
    assert_eq!(
        result.err().map(|err| err.to_string()).as_deref(),
        Some("Project does not offer practice credit")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_listing_is_not_found(harness: Harness) {
    let result = harness
        .service
        .submit(student(), TaskId::new(), ApprovalKind::Diploma, None)
        .await;
    assert!(matches!(result, Err(ApprovalError::TaskNotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn university_reviewers_decide(harness: Harness) -> eyre::Result<()> {
    let task_id = diploma_listing(&harness.tasks).await;
    let applicant = student();
    let approval = harness
        .service
        .submit(applicant, task_id, ApprovalKind::Diploma, None)
        .await?;

    let forbidden = harness
        .service
        .review(
            Actor::new(UserId::new(), Role::Manager),
            approval.id(),
            ApprovalState::Approved,
            None,
        )
        .await;
    ensure!(
        matches!(forbidden, Err(ApprovalError::Forbidden(_))),
        "managers are not university reviewers"
    );

    let returned = harness
        .service
        .review(
            teacher(),
            approval.id(),
            ApprovalState::NeedsChanges,
            Some("Add a timeline".to_owned()),
        )
        .await?;
    ensure!(returned.state() == ApprovalState::NeedsChanges, "changes requested");

    let stranger = harness
        .service
        .resubmit(student(), approval.id(), None)
        .await;
    ensure!(
        matches!(stranger, Err(ApprovalError::Forbidden(_))),
        "only the requester resubmits"
    );

    let resubmitted = harness
        .service
        .resubmit(applicant, approval.id(), Some("Timeline added".to_owned()))
        .await?;
    ensure!(resubmitted.state() == ApprovalState::Submitted, "back in review");

    let approved = harness
        .service
        .review(teacher(), approval.id(), ApprovalState::Approved, None)
        .await?;
    ensure!(approved.state() == ApprovalState::Approved, "approved");

    let revised = harness
        .service
        .review(teacher(), approval.id(), ApprovalState::Rejected, None)
        .await;
    ensure!(
        matches!(revised, Err(ApprovalError::Domain(_))),
        "approved requests are final"
    );

    let updates = harness
        .audit
        .list_for_entity(EntityRef::new(EntityKind::Approval, approval.id().into_inner()))
        .await?
        .into_iter()
        .filter(|entry| entry.action == AuditAction::ApprovalUpdated)
        .count();
    ensure!(updates == 2, "each decision is audited, got {updates}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reviewers_list_every_request(harness: Harness) -> eyre::Result<()> {
    let task_id = diploma_listing(&harness.tasks).await;
    for _ in 0..3 {
        harness
            .service
            .submit(student(), task_id, ApprovalKind::Diploma, None)
            .await?;
    }

    let listed = harness.service.list_all(teacher(), Page::new(0, 2)).await?;
    ensure!(listed.len() == 2, "page size applies");
    let denied = harness.service.list_all(student(), Page::default()).await;
    ensure!(
        matches!(denied, Err(ApprovalError::Forbidden(_))),
        "students cannot list every request"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_request_is_not_found(harness: Harness) {
    let result = harness
        .service
        .review(
            teacher(),
            crate::approval::domain::ApprovalId::new(),
            ApprovalState::Approved,
            None,
        )
        .await;
    assert!(matches!(result, Err(ApprovalError::NotFound(_))));
}
