//! Service tests for the NDA gate, privacy filter and author rights.

use std::sync::Arc;

use crate::Page;
use crate::assignment::{
    adapters::memory::InMemoryAssignmentRepository, domain::Assignment,
    ports::AssignmentRepository,
};
use crate::comment::{
    adapters::memory::InMemoryCommentRepository,
    domain::{CommentBody, CommentPatch, NewComment},
    services::{DiscussionError, DiscussionService},
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskDescription, TaskDraft, TaskId, TaskTitle},
    ports::TaskRepository,
};
use crate::user::domain::{Actor, Role, UserId};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type Service = DiscussionService<
    InMemoryCommentRepository,
    InMemoryTaskRepository,
    InMemoryAssignmentRepository,
    DefaultClock,
>;

struct Harness {
    service: Service,
    tasks: Arc<InMemoryTaskRepository>,
    assignments: Arc<InMemoryAssignmentRepository>,
}

#[fixture]
fn harness() -> Harness {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let assignments = Arc::new(InMemoryAssignmentRepository::new());
    Harness {
        service: DiscussionService::new(
            Arc::new(InMemoryCommentRepository::new()),
            Arc::clone(&tasks),
            Arc::clone(&assignments),
            Arc::new(DefaultClock),
        ),
        tasks,
        assignments,
    }
}

fn student() -> Actor {
    Actor::new(UserId::new(), Role::Student)
}

async fn listing(harness: &Harness, nda_required: bool) -> TaskId {
    let mut draft = TaskDraft::new(
        TaskTitle::new("Discussed project").expect("valid title"),
        TaskDescription::new("Talk about it here").expect("valid description"),
    );
    draft.nda_required = nda_required;
    let task = Task::new(draft, UserId::new(), &DefaultClock);
    harness.tasks.store(&task).await.expect("store listing");
    task.id()
}

fn question(body: &str, recipient: Option<UserId>) -> NewComment {
    NewComment {
        body: CommentBody::new(body).expect("valid body"),
        is_private: recipient.is_some(),
        recipient_id: recipient,
        meeting_info: None,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn comments_are_listed_newest_first(harness: Harness) -> eyre::Result<()> {
    let task_id = listing(&harness, false).await;
    let author = student();
    harness
        .service
        .post_comment(author, task_id, "First".to_owned())
        .await?;
    harness
        .service
        .post_comment(author, task_id, "Second".to_owned())
        .await?;

    let listed = harness
        .service
        .list_comments(author, task_id, Page::default())
        .await?;
    let bodies: Vec<_> = listed.iter().map(|comment| comment.body().as_str()).collect();
    ensure!(bodies == vec!["Second", "First"], "unexpected order: {bodies:?}");
    Ok(())
}

#[rstest]
#[case(None, false)]
#[case(Some(false), false)]
#[case(Some(true), true)]
#[tokio::test(flavor = "multi_thread")]
async fn nda_listings_gate_students(
    harness: Harness,
    #[case] application: Option<bool>,
    #[case] admitted: bool,
) {
    let task_id = listing(&harness, true).await;
    let actor = student();
    if let Some(nda_accepted) = application {
        harness
            .assignments
            .store(&Assignment::new(task_id, actor.id, nda_accepted, &DefaultClock))
            .await
            .expect("store application");
    }

    let posted = harness
        .service
        .post_comment(actor, task_id, "Hello".to_owned())
        .await;
    let listed = harness
        .service
        .list_questions(actor, task_id, Page::default())
        .await;

    assert_eq!(posted.is_ok(), admitted);
    assert_eq!(listed.is_ok(), admitted);
    if !admitted {
        assert_eq!(
            posted.err().map(|err| err.to_string()).as_deref(),
            Some("NDA required for comments")
        );
        assert_eq!(
            listed.err().map(|err| err.to_string()).as_deref(),
            Some("NDA required for questions")
        );
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn staff_bypass_the_nda_gate(harness: Harness) {
    let task_id = listing(&harness, true).await;
    let result = harness
        .service
        .post_comment(Actor::new(UserId::new(), Role::Mentor), task_id, "Welcome".to_owned())
        .await;
    assert!(result.is_ok());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn private_questions_are_filtered(harness: Harness) -> eyre::Result<()> {
    let task_id = listing(&harness, false).await;
    let asker = student();
    let mentor = Actor::new(UserId::new(), Role::Mentor);
    let bystander = student();
    harness
        .service
        .post_question(asker, task_id, question("Private one", Some(mentor.id)))
        .await?;
    harness
        .service
        .post_question(bystander, task_id, question("Public one", None))
        .await?;

    let count_for = |actor: Actor| {
        let service = &harness.service;
        async move {
            service
                .list_questions(actor, task_id, Page::default())
                .await
                .map(|questions| questions.len())
        }
    };
    ensure!(count_for(asker).await? == 2, "author sees both");
    ensure!(count_for(mentor).await? == 2, "recipient sees both");
    ensure!(count_for(bystander).await? == 1, "bystander sees the public one");

    let comments = harness
        .service
        .list_comments(bystander, task_id, Page::default())
        .await?;
    ensure!(
        comments.len() == 1,
        "private questions never appear among comments"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_authors_edit_and_delete(harness: Harness) -> eyre::Result<()> {
    let task_id = listing(&harness, false).await;
    let author = student();
    let posted = harness
        .service
        .post_comment(author, task_id, "Draft".to_owned())
        .await?;
    let patch = CommentPatch {
        body: CommentBody::new("Final")?,
        is_private: None,
        recipient_id: None,
        meeting_info: None,
    };

    let intruder = Actor::new(UserId::new(), Role::Admin);
    let denied = harness
        .service
        .edit(intruder, posted.id(), patch.clone())
        .await;
    ensure!(
        matches!(denied, Err(DiscussionError::Forbidden(_))),
        "even admins cannot edit others' comments"
    );

    let edited = harness.service.edit(author, posted.id(), patch).await?;
    ensure!(edited.body().as_str() == "Final", "body replaced");

    let refused = harness.service.delete(intruder, posted.id()).await;
    ensure!(
        matches!(refused, Err(DiscussionError::Forbidden(_))),
        "only the author deletes"
    );
    harness.service.delete(author, posted.id()).await?;
    let gone = harness.service.delete(author, posted.id()).await;
    ensure!(
        matches!(gone, Err(DiscussionError::NotFound(_))),
        "deleted comments are gone"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_and_unknown_targets_are_rejected(harness: Harness) {
    let blank = harness
        .service
        .post_comment(student(), listing(&harness, false).await, "  ".to_owned())
        .await;
    assert!(matches!(blank, Err(DiscussionError::Domain(_))));

    let missing = harness
        .service
        .post_comment(student(), TaskId::new(), "Hello".to_owned())
        .await;
    assert!(matches!(missing, Err(DiscussionError::TaskNotFound(_))));
}
