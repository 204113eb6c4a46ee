//! Domain tests for listings, filters and redaction.

use super::listing;
use crate::task::domain::{
    TaskChanges, TaskDescription, TaskDomainError, TaskDraft, TaskFilter, TaskQuery, TaskScope,
    TaskStatus, TaskTitle, Tags, Task, Visibility,
};
use crate::user::domain::UserId;
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[case("ab".to_owned(), false)]
#[case("  abc  ".to_owned(), true)]
#[case("x".repeat(255), true)]
#[case("x".repeat(256), false)]
fn title_length_is_enforced(#[case] raw: String, #[case] valid: bool) {
    assert_eq!(TaskTitle::new(raw).is_ok(), valid);
}

#[test]
fn short_descriptions_are_rejected() {
    assert_eq!(
        TaskDescription::new("too short"),
        Err(TaskDomainError::DescriptionTooShort)
    );
}

#[rstest]
#[case(TaskStatus::Open, true)]
#[case(TaskStatus::InProgress, true)]
#[case(TaskStatus::Completed, false)]
#[case(TaskStatus::Closed, false)]
fn active_statuses(#[case] status: TaskStatus, #[case] active: bool) {
    assert_eq!(status.is_active(), active);
}

#[test]
fn status_parsing_round_trips_storage_names() {
    assert_eq!(TaskStatus::try_from("IN_PROGRESS"), Ok(TaskStatus::InProgress));
    assert!(TaskStatus::try_from("paused").is_err());
}

#[test]
fn tags_match_case_insensitively() {
    let tags = Tags::new(Some("Rust, Backend".to_owned()));
    assert!(tags.matches("rust"));
    assert!(tags.matches("END"));
    assert!(!tags.matches("python"));
    assert_eq!(Tags::new(Some("   ".to_owned())).as_deref(), None);
}

#[test]
fn new_tasks_take_draft_defaults() {
    let draft = TaskDraft::new(
        TaskTitle::new("Search engine").expect("valid title"),
        TaskDescription::new("Build a search engine").expect("valid description"),
    );
    let creator = UserId::new();
    let task = Task::new(draft, creator, &DefaultClock);

    assert_eq!(task.status(), TaskStatus::Open);
    assert_eq!(task.visibility(), Visibility::Public);
    assert!(!task.nda_required());
    assert!(!task.is_archived());
    assert!(task.is_curated_by(creator));
    assert_eq!(task.created_at(), task.updated_at());
}

#[test]
fn apply_changes_only_provided_fields() {
    let mut task = listing("Original title", 5, TaskStatus::Open);
    let before = task.clone();
    task.apply(
        TaskChanges {
            status: Some(TaskStatus::InProgress),
            novelty: Some("New approach".to_owned()),
            ..TaskChanges::default()
        },
        &DefaultClock,
    );

    assert_eq!(task.status(), TaskStatus::InProgress);
    assert_eq!(task.details().novelty.as_deref(), Some("New approach"));
    assert_eq!(task.title(), before.title());
    assert_eq!(task.details().goal, before.details().goal);
    assert!(task.updated_at() > before.updated_at());
}

#[test]
fn archive_closes_and_unarchive_reopens() {
    let mut task = listing("Archivable", 1, TaskStatus::InProgress);
    task.archive(&DefaultClock);
    assert_eq!(task.status(), TaskStatus::Closed);
    assert!(task.is_archived());
    assert!(!task.accepts_applications());

    task.unarchive(&DefaultClock);
    assert_eq!(task.status(), TaskStatus::Open);
    assert!(!task.is_archived());
    assert!(task.accepts_applications());
}

#[test]
fn redaction_hides_protected_content() {
    let task = listing("Secret project", 1, TaskStatus::Open);
    let redacted = task.redacted();

    assert_eq!(
        redacted.description().as_str(),
        "Available after NDA acceptance"
    );
    assert_eq!(redacted.details().goal, None);
    assert_eq!(redacted.title(), task.title());
    assert_eq!(redacted.id(), task.id());
}

#[rstest]
#[case(TaskStatus::Open, true)]
#[case(TaskStatus::Completed, false)]
fn public_active_scope_hides_finished_listings(#[case] status: TaskStatus, #[case] visible: bool) {
    let task = listing("Scoped listing", 1, status);
    assert_eq!(TaskScope::PublicActive.contains(&task), visible);
}

#[test]
fn mentored_scope_includes_linked_listings() {
    let task = listing("Linked listing", 1, TaskStatus::Open);
    let mentor = UserId::new();
    let linked = TaskScope::MentoredBy {
        mentor,
        linked: vec![task.id()],
    };
    let unlinked = TaskScope::MentoredBy {
        mentor,
        linked: Vec::new(),
    };
    assert!(linked.contains(&task));
    assert!(!unlinked.contains(&task));
}

#[test]
fn filter_combines_status_tag_and_title() {
    let task = listing("Distributed cache", 1, TaskStatus::Open);
    let query = TaskQuery {
        status: Some(TaskStatus::Open),
        tag: Some("BACKEND".to_owned()),
        q: Some("cache".to_owned()),
        ..TaskQuery::default()
    };
    assert!(TaskFilter::new(TaskScope::All, query.clone()).matches(&task));

    let wrong_title = TaskQuery {
        q: Some("compiler".to_owned()),
        ..query
    };
    assert!(!TaskFilter::new(TaskScope::All, wrong_title).matches(&task));
}
