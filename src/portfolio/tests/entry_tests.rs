//! Tests for entry generation and idempotent recording.

use crate::assignment::domain::Assignment;
use crate::portfolio::{
    adapters::memory::InMemoryPortfolioRepository, domain::PortfolioEntry,
    ports::PortfolioRepository,
};
use crate::task::domain::{TaskId, TaskTitle};
use crate::user::domain::UserId;
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[case("Recommendation engine", r#"Joined the project team of "Recommendation engine"."#)]
#[case("Data <pipeline>", r#"Joined the project team of "Data <pipeline>"."#)]
fn summary_names_the_project(#[case] title: &str, #[case] expected: &str) {
    let assignment = Assignment::new(TaskId::new(), UserId::new(), false, &DefaultClock);
    let entry = PortfolioEntry::for_assignment(
        &assignment,
        &TaskTitle::new(title).expect("valid title"),
        &DefaultClock,
    )
    .expect("summary renders");

    assert_eq!(entry.summary, expected);
    assert_eq!(entry.assignment_id, assignment.id());
    assert_eq!(entry.student_id, assignment.student_id());
}

#[tokio::test(flavor = "multi_thread")]
async fn recording_twice_keeps_the_first_entry() {
    let repository = InMemoryPortfolioRepository::new();
    let assignment = Assignment::new(TaskId::new(), UserId::new(), false, &DefaultClock);
    let title = TaskTitle::new("Search").expect("valid title");
    let first = PortfolioEntry::for_assignment(&assignment, &title, &DefaultClock)
        .expect("summary renders");
    let second = PortfolioEntry::for_assignment(&assignment, &title, &DefaultClock)
        .expect("summary renders");

    let stored = repository.record(&first).await.expect("record");
    let again = repository.record(&second).await.expect("record");

    assert_eq!(stored, first);
    assert_eq!(again.id, first.id);
    let listed = repository
        .list_for_student(assignment.student_id())
        .await
        .expect("list");
    assert_eq!(listed.len(), 1);
}
