//! Demo data for local development.
//!
//! Seeds one account per operational role and a single NDA project with a
//! pending application and a diploma credit request.

use crate::approval::{domain::ApprovalKind, services::ApprovalError};
use crate::assignment::services::ApplicationError;
use crate::http::{AppState, Repositories};
use crate::task::{
    domain::{CreditOptions, TaskDetails, TaskQuery, TaskStatus},
    services::{NewTask, TaskCatalogError},
};
use crate::user::{
    domain::{Actor, Email, Role, User, UserId},
    services::{AccountServiceError, CreateMemberRequest},
};
use chrono::Duration;
use mockable::{Clock, DefaultClock};
use thiserror::Error;
use tracing::info;

/// Password shared by every seeded account.
pub const DEMO_PASSWORD: &str = "changeme123";

const DEMO_USERS: [(&str, &str, Role); 5] = [
    ("manager@sbercollab.local", "Manager", Role::Manager),
    ("mentor@sbercollab.local", "Mentor", Role::Mentor),
    ("student@sbercollab.local", "Student", Role::Student),
    ("teacher@sbercollab.local", "Univ Teacher", Role::UnivTeacher),
    ("hr@sbercollab.local", "HR", Role::Hr),
];

/// Errors raised while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Account creation failed.
    #[error(transparent)]
    Accounts(#[from] AccountServiceError),

    /// Listing creation failed.
    #[error(transparent)]
    Catalog(#[from] TaskCatalogError),

    /// The demo application could not be filed.
    #[error(transparent)]
    Applications(#[from] ApplicationError),

    /// The demo credit request could not be filed.
    #[error(transparent)]
    Approvals(#[from] ApprovalError),
}

/// Seeded accounts, by role.
struct Cast {
    manager: User,
    mentor: User,
    student: User,
}

/// Seeds demo accounts, then a demo project when the catalogue is empty.
///
/// Existing accounts are reused, so running the seeder twice is harmless.
/// Returns `true` when the demo project was created.
///
/// # Errors
///
/// Returns [`SeedError`] when any underlying service call fails.
pub async fn seed_demo_data(state: &AppState, repos: &Repositories) -> Result<bool, SeedError> {
    let cast = seed_users(state, repos).await?;
    if !state.catalog.list(TaskQuery::default()).await?.is_empty() {
        info!("catalogue already populated; skipping demo project");
        return Ok(false);
    }

    let manager = Actor::from(&cast.manager);
    let student = Actor::from(&cast.student);
    let task = state
        .catalog
        .create(manager, demo_task(cast.mentor.id()))
        .await?;
    state.applications.apply(student, task.id(), true).await?;
    state
        .approvals
        .submit(
            student,
            task.id(),
            ApprovalKind::Diploma,
            Some("Please approve this topic for my diploma.".to_owned()),
        )
        .await?;
    info!(task_id = %task.id(), "demo project seeded");
    Ok(true)
}

async fn seed_users(state: &AppState, repos: &Repositories) -> Result<Cast, SeedError> {
    let mut seeded = Vec::with_capacity(DEMO_USERS.len());
    for (email, name, role) in DEMO_USERS {
        let existing = repos
            .users
            .find_by_email(&Email::new(email).map_err(AccountServiceError::from)?)
            .await
            .map_err(AccountServiceError::from)?;
        if let Some(user) = existing {
            seeded.push(user);
            continue;
        }
        let request = CreateMemberRequest::new(email, name, DEMO_PASSWORD, role);
        seeded.push(state.accounts.create_member(request).await?);
        info!(%email, role = role.as_str(), "demo account created");
    }

    let mut by_role = |role: Role| {
        seeded
            .iter()
            .position(|user| user.role() == role)
            .map(|index| seeded.swap_remove(index))
            .ok_or(AccountServiceError::NotFound("Demo user"))
    };
    Ok(Cast {
        manager: by_role(Role::Manager)?,
        mentor: by_role(Role::Mentor)?,
        student: by_role(Role::Student)?,
    })
}

fn demo_task(mentor_id: UserId) -> NewTask {
    NewTask {
        details: TaskDetails {
            goal: Some("Improve communication between students and mentors.".to_owned()),
            key_tasks: Some(
                "Gather requirements, prototype a chat bot, integrate with the tracker.".to_owned(),
            ),
            novelty: Some("Combines learning analytics with generative models.".to_owned()),
            skills_required: Some("Rust, HTTP APIs, NLP".to_owned()),
            course_alignment: Some("Applied AI and data engineering".to_owned()),
        },
        credits: CreditOptions {
            diploma_possible: true,
            practice_possible: true,
            course_project_possible: true,
        },
        nda_required: true,
        tags: Some("ai, nlp".to_owned()),
        status: Some(TaskStatus::Open),
        mentor_id: Some(mentor_id),
        deadline: DefaultClock.utc().checked_add_signed(Duration::days(60)),
        ..NewTask::new(
            "Campus AI assistant",
            "Prototype an AI assistant that supports student projects.",
        )
    }
}
