//! Unit tests for the task context.

mod browse_tests;
mod catalog_tests;
mod domain_tests;

use crate::task::domain::{
    CreditOptions, PersistedTaskData, Tags, Task, TaskDescription, TaskDetails, TaskId,
    TaskStatus, TaskTitle, Visibility,
};
use crate::user::domain::UserId;
use chrono::{Duration, Utc};

/// Builds a listing created `minutes_ago` with the given status.
fn listing(title: &str, minutes_ago: i64, status: TaskStatus) -> Task {
    let created_at = Utc::now() - Duration::minutes(minutes_ago);
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: TaskTitle::new(title).expect("valid title"),
        description: TaskDescription::new("A description long enough").expect("valid description"),
        details: TaskDetails {
            goal: Some("Ship it".to_owned()),
            ..TaskDetails::default()
        },
        credits: CreditOptions::default(),
        nda_required: false,
        tags: Tags::new(Some("rust, backend".to_owned())),
        status,
        is_archived: false,
        created_by: UserId::new(),
        curator_id: None,
        mentor_id: None,
        deadline: None,
        visibility: Visibility::Public,
        created_at,
        updated_at: created_at,
    })
}
