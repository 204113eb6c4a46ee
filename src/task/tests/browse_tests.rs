//! Role-scoped browsing and NDA redaction tests.

use std::sync::Arc;

use super::listing;
use crate::assignment::{
    adapters::memory::InMemoryAssignmentRepository, domain::Assignment,
    ports::AssignmentRepository,
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{
        PersistedTaskData, Task, TaskDetails, TaskMentorLink, TaskQuery, TaskStatus, Visibility,
    },
    ports::{TaskMentorRepository, TaskRepository},
    services::{BrowseError, ProjectBrowseService},
};
use crate::user::domain::{Actor, Role, UserId};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type Browse = ProjectBrowseService<
    InMemoryTaskRepository,
    InMemoryTaskRepository,
    InMemoryAssignmentRepository,
>;

struct Harness {
    browse: Browse,
    tasks: Arc<InMemoryTaskRepository>,
    assignments: Arc<InMemoryAssignmentRepository>,
}

#[fixture]
fn harness() -> Harness {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let assignments = Arc::new(InMemoryAssignmentRepository::new());
    Harness {
        browse: ProjectBrowseService::new(
            Arc::clone(&tasks),
            Arc::clone(&tasks),
            Arc::clone(&assignments),
        ),
        tasks,
        assignments,
    }
}

/// Rebuilds `task` with adjusted ownership and flags.
fn customised(
    task: &Task,
    created_by: UserId,
    mentor_id: Option<UserId>,
    visibility: Visibility,
    nda_required: bool,
) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: task.id(),
        title: task.title().clone(),
        description: task.description().clone(),
        details: task.details().clone(),
        credits: task.credits(),
        nda_required,
        tags: task.tags().clone(),
        status: task.status(),
        is_archived: task.is_archived(),
        created_by,
        curator_id: None,
        mentor_id,
        deadline: None,
        visibility,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

struct Catalogue {
    curator: UserId,
    mentor: UserId,
    curated: Task,
    led: Task,
    linked: Task,
    private: Task,
    finished: Task,
}

async fn seed(harness: &Harness) -> Catalogue {
    let curator = UserId::new();
    let mentor = UserId::new();
    let other = UserId::new();
    let curated = customised(
        &listing("Curated listing", 50, TaskStatus::Open),
        curator,
        None,
        Visibility::Public,
        false,
    );
    let led = customised(
        &listing("Led listing", 40, TaskStatus::InProgress),
        other,
        Some(mentor),
        Visibility::Public,
        false,
    );
    let linked = customised(
        &listing("Linked listing", 30, TaskStatus::Open),
        other,
        None,
        Visibility::Public,
        false,
    );
    let private = customised(
        &listing("Private listing", 20, TaskStatus::Open),
        other,
        None,
        Visibility::Private,
        false,
    );
    let finished = customised(
        &listing("Finished listing", 10, TaskStatus::Completed),
        other,
        None,
        Visibility::Public,
        false,
    );
    for task in [&curated, &led, &linked, &private, &finished] {
        harness.tasks.store(task).await.expect("store listing");
    }
    harness
        .tasks
        .link(&TaskMentorLink::new(linked.id(), mentor))
        .await
        .expect("link mentor");
    Catalogue {
        curator,
        mentor,
        curated,
        led,
        linked,
        private,
        finished,
    }
}

async fn visible_ids(harness: &Harness, actor: Actor) -> Vec<crate::task::domain::TaskId> {
    let mut ids: Vec<_> = harness
        .browse
        .list_for(actor, TaskQuery::default())
        .await
        .expect("browse should succeed")
        .into_iter()
        .map(|task| task.id())
        .collect();
    ids.sort_by_key(|id| id.into_inner());
    ids
}

fn sorted(mut ids: Vec<crate::task::domain::TaskId>) -> Vec<crate::task::domain::TaskId> {
    ids.sort_by_key(|id| id.into_inner());
    ids
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn each_role_sees_its_slice(harness: Harness) {
    let catalogue = seed(&harness).await;

    let student = visible_ids(&harness, Actor::new(UserId::new(), Role::Student)).await;
    assert_eq!(
        student,
        sorted(vec![catalogue.curated.id(), catalogue.led.id(), catalogue.linked.id()])
    );

    let curator = visible_ids(&harness, Actor::new(catalogue.curator, Role::Curator)).await;
    assert_eq!(curator, vec![catalogue.curated.id()]);

    let mentor = visible_ids(&harness, Actor::new(catalogue.mentor, Role::Mentor)).await;
    assert_eq!(mentor, sorted(vec![catalogue.led.id(), catalogue.linked.id()]));

    for role in [Role::Hr, Role::UnivTeacher, Role::Manager] {
        let everything = visible_ids(&harness, Actor::new(UserId::new(), role)).await;
        assert_eq!(
            everything,
            sorted(vec![
                catalogue.curated.id(),
                catalogue.led.id(),
                catalogue.linked.id(),
                catalogue.private.id(),
                catalogue.finished.id(),
            ])
        );
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn students_cannot_open_private_listings(harness: Harness) {
    let catalogue = seed(&harness).await;
    let student = Actor::new(UserId::new(), Role::Student);
    let result = harness.browse.view_for(student, catalogue.private.id()).await;
    assert!(matches!(result, Err(BrowseError::Forbidden(_))));

    let staff = Actor::new(UserId::new(), Role::Mentor);
    let shown = harness
        .browse
        .view_for(staff, catalogue.private.id())
        .await
        .expect("staff can view private listings");
    assert_eq!(shown.id(), catalogue.private.id());
}

#[rstest]
#[case(None, true)]
#[case(Some(false), true)]
#[case(Some(true), false)]
#[tokio::test(flavor = "multi_thread")]
async fn nda_listings_are_redacted_until_accepted(
    harness: Harness,
    #[case] application: Option<bool>,
    #[case] redacted: bool,
) {
    let base = listing("Secret listing", 5, TaskStatus::Open);
    let task = customised(&base, UserId::new(), None, Visibility::Public, true);
    harness.tasks.store(&task).await.expect("store listing");
    let student = Actor::new(UserId::new(), Role::Student);
    if let Some(accepted) = application {
        harness
            .assignments
            .store(&Assignment::new(task.id(), student.id, accepted, &DefaultClock))
            .await
            .expect("store application");
    }

    let shown = harness
        .browse
        .view_for(student, task.id())
        .await
        .expect("view should succeed");
    assert_eq!(
        shown.description().as_str() == "Available after NDA acceptance",
        redacted
    );
    assert_eq!(*shown.details() == TaskDetails::default(), redacted);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_listing_is_not_found(harness: Harness) {
    let result = harness
        .browse
        .view_for(
            Actor::new(UserId::new(), Role::Admin),
            crate::task::domain::TaskId::new(),
        )
        .await;
    assert!(matches!(result, Err(BrowseError::NotFound(_))));
}
