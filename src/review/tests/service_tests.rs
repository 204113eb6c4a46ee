//! Service tests for submitting reviews.

use std::sync::Arc;

use crate::assignment::{
    adapters::memory::InMemoryAssignmentRepository,
    domain::{Assignment, AssignmentState},
    ports::AssignmentRepository,
};
use crate::audit::{
    adapters::memory::InMemoryAuditRepository,
    domain::{AuditAction, EntityKind, EntityRef},
    ports::AuditRepository,
};
use crate::review::{
    adapters::memory::InMemoryReviewRepository,
    ports::{MockReviewRepository, ReviewRepositoryError},
    services::{ReviewError, ReviewService},
};
use crate::task::domain::TaskId;
use crate::user::domain::{Actor, Role, UserId};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type Service = ReviewService<
    InMemoryReviewRepository,
    InMemoryAssignmentRepository,
    InMemoryAuditRepository,
    DefaultClock,
>;

struct Harness {
    service: Service,
    assignments: Arc<InMemoryAssignmentRepository>,
    audit: Arc<InMemoryAuditRepository>,
}

#[fixture]
fn harness() -> Harness {
    let assignments = Arc::new(InMemoryAssignmentRepository::new());
    let audit = Arc::new(InMemoryAuditRepository::new());
    Harness {
        service: ReviewService::new(
            Arc::new(InMemoryReviewRepository::new()),
            Arc::clone(&assignments),
            Arc::clone(&audit),
            Arc::new(DefaultClock),
        ),
        assignments,
        audit,
    }
}

fn mentor() -> Actor {
    Actor::new(UserId::new(), Role::Mentor)
}

async fn stored(assignments: &InMemoryAssignmentRepository, active: bool) -> Assignment {
    let mut assignment = Assignment::new(TaskId::new(), UserId::new(), false, &DefaultClock);
    if active {
        assignment
            .transition_to(AssignmentState::Active, &DefaultClock)
            .expect("activate");
    }
    assignments.store(&assignment).await.expect("store");
    assignment
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn review_closes_the_assignment(harness: Harness) -> eyre::Result<()> {
    let assignment = stored(&harness.assignments, true).await;

    let review = harness
        .service
        .submit(mentor(), assignment.id(), 4, Some("Solid work".to_owned()))
        .await?;

    let closed = harness
        .assignments
        .find_by_id(assignment.id())
        .await?
        .ok_or_else(|| eyre::eyre!("assignment vanished"))?;
    ensure!(closed.state() == AssignmentState::Done, "assignment should be done");
    ensure!(review.rating.value() == 4, "rating should be kept");

    let listed = harness
        .service
        .list_for_student(assignment.student_id())
        .await?;
    ensure!(listed == vec![review.clone()], "student should see the review");

    let trail = harness
        .audit
        .list_for_entity(EntityRef::new(EntityKind::Review, review.id.into_inner()))
        .await?;
    ensure!(
        trail.iter().map(|entry| entry.action).collect::<Vec<_>>()
            == vec![AuditAction::ReviewCreated],
        "review creation should be audited"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_active_assignments_are_reviewed(harness: Harness) {
    let pending = stored(&harness.assignments, false).await;

    let result = harness.service.submit(mentor(), pending.id(), 5, None).await;

    assert!(matches!(result, Err(ReviewError::NotActive(_))));
    assert_eq!(
        result.err().map(|err| err.to_string()).as_deref(),
        Some("Assignment is not active")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_review_is_rejected(harness: Harness) {
    let assignment = stored(&harness.assignments, true).await;
    harness
        .service
        .submit(mentor(), assignment.id(), 5, None)
        .await
        .expect("first review");

    // The assignment is now done, so the state check fires first.
    let result = harness.service.submit(mentor(), assignment.id(), 3, None).await;
    assert!(matches!(result, Err(ReviewError::NotActive(_))));
}

#[rstest]
#[case(Role::Student)]
#[case(Role::Hr)]
#[case(Role::UnivTeacher)]
#[tokio::test(flavor = "multi_thread")]
async fn non_reviewers_are_forbidden(harness: Harness, #[case] role: Role) {
    let assignment = stored(&harness.assignments, true).await;
    let result = harness
        .service
        .submit(Actor::new(UserId::new(), role), assignment.id(), 5, None)
        .await;
    assert!(matches!(result, Err(ReviewError::Forbidden(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn out_of_range_rating_is_rejected(harness: Harness) {
    let assignment = stored(&harness.assignments, true).await;
    let result = harness.service.submit(mentor(), assignment.id(), 7, None).await;
    assert!(matches!(result, Err(ReviewError::Domain(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_assignment_is_not_found(harness: Harness) {
    let result = harness
        .service
        .submit(mentor(), crate::assignment::domain::AssignmentId::new(), 5, None)
        .await;
    assert!(matches!(result, Err(ReviewError::AssignmentNotFound(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_detected_by_storage_maps_to_already_reviewed() {
    let assignments = Arc::new(InMemoryAssignmentRepository::new());
    let assignment = stored(&assignments, true).await;
    let mut reviews = MockReviewRepository::new();
    reviews.expect_find_by_assignment().returning(|_| Ok(None));
    reviews
        .expect_store()
        .times(1)
        .returning(|review| Err(ReviewRepositoryError::DuplicateReview(review.assignment_id)));
    let service = ReviewService::new(
        Arc::new(reviews),
        Arc::clone(&assignments),
        Arc::new(InMemoryAuditRepository::new()),
        Arc::new(DefaultClock),
    );

    let result = service.submit(mentor(), assignment.id(), 5, None).await;

    assert_eq!(
        result.err().map(|err| err.to_string()).as_deref(),
        Some("Review already exists")
    );
    let unchanged = assignments
        .find_by_id(assignment.id())
        .await
        .expect("lookup")
        .expect("assignment exists");
    assert_eq!(unchanged.state(), AssignmentState::Active);
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_store_leaves_the_assignment_open_for_a_retry() -> eyre::Result<()> {
    let assignments = Arc::new(InMemoryAssignmentRepository::new());
    let assignment = stored(&assignments, true).await;
    let mut failing = MockReviewRepository::new();
    failing.expect_find_by_assignment().returning(|_| Ok(None));
    failing.expect_store().times(1).returning(|_| {
        Err(ReviewRepositoryError::persistence(std::io::Error::other(
            "connection reset",
        )))
    });
    let flaky = ReviewService::new(
        Arc::new(failing),
        Arc::clone(&assignments),
        Arc::new(InMemoryAuditRepository::new()),
        Arc::new(DefaultClock),
    );

    let first = flaky.submit(mentor(), assignment.id(), 4, None).await;
    ensure!(
        matches!(first, Err(ReviewError::Repository(_))),
        "storage failure should surface"
    );
    let reopened = assignments.find_by_id(assignment.id()).await?;
    ensure!(
        reopened.map(|found| found.state()) == Some(AssignmentState::Active),
        "the assignment should stay reviewable"
    );

    let healthy = ReviewService::new(
        Arc::new(InMemoryReviewRepository::new()),
        Arc::clone(&assignments),
        Arc::new(InMemoryAuditRepository::new()),
        Arc::new(DefaultClock),
    );
    let review = healthy.submit(mentor(), assignment.id(), 4, None).await?;
    ensure!(review.rating.value() == 4, "the retry should be recorded");
    Ok(())
}
