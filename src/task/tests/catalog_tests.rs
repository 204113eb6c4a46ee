//! Service tests for listing management and mentor links.

use std::sync::Arc;

use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{TaskQuery, TaskStatus, Visibility},
    ports::TaskDependents,
    services::{
        NewTask, TaskCatalogError, TaskCatalogService, TaskMentorError, TaskMentorService,
        TaskPatch,
    },
};
use crate::user::{
    adapters::memory::InMemoryUserRepository,
    domain::{Actor, Role, UserId},
    services::CreateMemberRequest,
};
use crate::assignment::{
    adapters::memory::InMemoryAssignmentRepository, domain::Assignment,
    ports::AssignmentRepository,
};
use crate::audit::adapters::memory::InMemoryAuditRepository;
use crate::user::services::AccountService;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type Catalog = TaskCatalogService<InMemoryTaskRepository, DefaultClock>;

struct Harness {
    catalog: Catalog,
    mentors:
        TaskMentorService<InMemoryTaskRepository, InMemoryTaskRepository, InMemoryUserRepository>,
    accounts: AccountService<InMemoryUserRepository, InMemoryAuditRepository, DefaultClock>,
}

#[fixture]
fn harness() -> Harness {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let clock = Arc::new(DefaultClock);
    Harness {
        catalog: TaskCatalogService::new(Arc::clone(&tasks), Arc::clone(&clock)),
        mentors: TaskMentorService::new(Arc::clone(&tasks), tasks, Arc::clone(&users)),
        accounts: AccountService::new(users, Arc::new(InMemoryAuditRepository::new()), clock),
    }
}

fn actor(role: Role) -> Actor {
    Actor::new(UserId::new(), role)
}

fn new_task(title: &str) -> NewTask {
    NewTask::new(title, "A description long enough to pass")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn curator_becomes_curator_of_own_listing(harness: Harness) {
    let curator = actor(Role::Curator);
    let task = harness
        .catalog
        .create(curator, new_task("Curated listing"))
        .await
        .expect("creation should succeed");

    assert_eq!(task.curator_id(), Some(curator.id));
    assert_eq!(task.created_by(), curator.id);
    assert_eq!(task.status(), TaskStatus::Open);
    assert_eq!(task.visibility(), Visibility::Public);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn manager_listing_keeps_requested_curator(harness: Harness) {
    let curator = UserId::new();
    let request = NewTask {
        curator_id: Some(curator),
        nda_required: true,
        ..new_task("Managed listing")
    };
    let task = harness
        .catalog
        .create(actor(Role::Manager), request)
        .await
        .expect("creation should succeed");
    assert_eq!(task.curator_id(), Some(curator));
    assert!(task.nda_required());
}

#[rstest]
#[case(Role::Student)]
#[case(Role::Mentor)]
#[case(Role::Hr)]
#[tokio::test(flavor = "multi_thread")]
async fn non_editors_cannot_create(harness: Harness, #[case] role: Role) {
    let result = harness.catalog.create(actor(role), new_task("Forbidden")).await;
    assert!(matches!(result, Err(TaskCatalogError::Forbidden(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_titles_are_rejected(harness: Harness) {
    let result = harness.catalog.create(actor(Role::Admin), new_task("x")).await;
    assert!(matches!(result, Err(TaskCatalogError::Domain(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_changes_only_patched_fields(harness: Harness) {
    let admin = actor(Role::Admin);
    let task = harness
        .catalog
        .create(admin, new_task("Patchable listing"))
        .await
        .expect("creation should succeed");

    let updated = harness
        .catalog
        .update(
            admin,
            task.id(),
            TaskPatch {
                status: Some(TaskStatus::InProgress),
                tags: Some("ml".to_owned()),
                ..TaskPatch::default()
            },
        )
        .await
        .expect("update should succeed");

    assert_eq!(updated.status(), TaskStatus::InProgress);
    assert_eq!(updated.tags().as_deref(), Some("ml"));
    assert_eq!(updated.title(), task.title());
    assert!(updated.updated_at() >= task.updated_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_listings_are_reported(harness: Harness) {
    let missing = crate::task::domain::TaskId::new();
    let find = harness.catalog.find(missing).await;
    assert!(matches!(find, Err(TaskCatalogError::NotFound(id)) if id == missing));

    let delete = harness.catalog.delete(actor(Role::Admin), missing).await;
    assert!(matches!(delete, Err(TaskCatalogError::NotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_clears_registered_dependents() {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let assignments = Arc::new(InMemoryAssignmentRepository::new());
    let catalog = TaskCatalogService::new(Arc::clone(&tasks), Arc::new(DefaultClock))
        .with_dependents(vec![Arc::clone(&assignments) as Arc<dyn TaskDependents>]);
    let admin = actor(Role::Admin);
    let task = catalog
        .create(admin, new_task("Doomed listing"))
        .await
        .expect("creation should succeed");
    let student = UserId::new();
    assignments
        .store(&Assignment::new(task.id(), student, false, &DefaultClock))
        .await
        .expect("application should be stored");

    catalog
        .delete(admin, task.id())
        .await
        .expect("deletion should succeed");

    let remaining = assignments
        .find_by_task_and_student(task.id(), student)
        .await
        .expect("lookup should succeed");
    assert!(remaining.is_none());
    assert!(
        assignments
            .list_for_task(task.id())
            .await
            .expect("listing should succeed")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_filters_by_status(harness: Harness) {
    let admin = actor(Role::Admin);
    harness
        .catalog
        .create(admin, new_task("Open listing"))
        .await
        .expect("creation should succeed");
    harness
        .catalog
        .create(
            admin,
            NewTask {
                status: Some(TaskStatus::Completed),
                ..new_task("Completed listing")
            },
        )
        .await
        .expect("creation should succeed");

    let completed = harness
        .catalog
        .list(TaskQuery {
            status: Some(TaskStatus::Completed),
            ..TaskQuery::default()
        })
        .await
        .expect("listing should succeed");
    assert_eq!(completed.len(), 1);
    assert!(completed.iter().all(|task| task.status() == TaskStatus::Completed));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn archive_requires_manager(harness: Harness) {
    let task = harness
        .catalog
        .create(actor(Role::Curator), new_task("Archive target"))
        .await
        .expect("creation should succeed");

    let denied = harness.catalog.archive(actor(Role::Curator), task.id()).await;
    assert!(matches!(denied, Err(TaskCatalogError::Forbidden(_))));

    let archived = harness
        .catalog
        .archive(actor(Role::Manager), task.id())
        .await
        .expect("archive should succeed");
    assert!(archived.is_archived());
    assert_eq!(archived.status(), TaskStatus::Closed);

    let reopened = harness
        .catalog
        .unarchive(actor(Role::Manager), task.id())
        .await
        .expect("unarchive should succeed");
    assert!(!reopened.is_archived());
    assert_eq!(reopened.status(), TaskStatus::Open);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_mentor_accounts_can_be_linked(harness: Harness) {
    let manager = actor(Role::Manager);
    let task = harness
        .catalog
        .create(manager, new_task("Needs mentors"))
        .await
        .expect("creation should succeed");
    let mentor = harness
        .accounts
        .create_member(CreateMemberRequest::new(
            "mentor@example.com",
            "Maria Mentor",
            "password1",
            Role::Mentor,
        ))
        .await
        .expect("mentor creation should succeed");
    let curator = harness
        .accounts
        .create_member(CreateMemberRequest::new(
            "curator@example.com",
            "Carl Curator",
            "password1",
            Role::Curator,
        ))
        .await
        .expect("curator creation should succeed");

    let wrong_role = harness.mentors.assign(manager, task.id(), curator.id()).await;
    assert!(matches!(wrong_role, Err(TaskMentorError::MentorNotFound(_))));

    let first = harness
        .mentors
        .assign(manager, task.id(), mentor.id())
        .await
        .expect("link should succeed");
    let again = harness
        .mentors
        .assign(manager, task.id(), mentor.id())
        .await
        .expect("relinking should succeed");
    assert_eq!(first, again);

    let linked = harness.mentors.list(task.id()).await.expect("list should succeed");
    assert_eq!(linked.len(), 1);
    assert_eq!(
        linked.first().map(|entry| entry.email.as_str()),
        Some("mentor@example.com")
    );

    harness
        .mentors
        .remove(manager, task.id(), mentor.id())
        .await
        .expect("removal should succeed");
    assert!(harness.mentors.list(task.id()).await.expect("list").is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn linking_to_unknown_listing_is_not_found(harness: Harness) {
    let result = harness
        .mentors
        .assign(
            actor(Role::Admin),
            crate::task::domain::TaskId::new(),
            UserId::new(),
        )
        .await;
    assert!(matches!(result, Err(TaskMentorError::TaskNotFound(_))));
}
