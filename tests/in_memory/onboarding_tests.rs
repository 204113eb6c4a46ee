//! Registration, approval and removal of accounts.

use super::helpers::{PASSWORD, Platform, platform};
use eyre::ensure;
use rstest::rstest;
use sbercollab::auth::domain::AuthError;
use sbercollab::user::domain::Role;
use sbercollab::user::services::{AccountServiceError, CreateMemberRequest, RegisterRequest};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn registered_student_signs_in_after_approval(platform: Platform) -> eyre::Result<()> {
    let manager = platform.actor("manager@example.com", Role::Manager).await;
    let student = platform
        .state
        .accounts
        .register(RegisterRequest::new(
            "fresh@example.com",
            "Fresh Student",
            PASSWORD,
        ))
        .await?;

    let early = platform
        .state
        .sessions
        .login("fresh@example.com", PASSWORD)
        .await;
    ensure!(
        matches!(early, Err(AuthError::AccountPending)),
        "pending students must not sign in"
    );
    let pending = platform.state.accounts.list_pending_students().await?;
    ensure!(
        pending.iter().any(|user| user.id() == student.id()),
        "the registration should be waiting for a manager"
    );

    platform
        .state
        .accounts
        .approve_student(manager, student.id())
        .await?;

    platform
        .state
        .sessions
        .login("fresh@example.com", PASSWORD)
        .await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_student_stays_locked_out(platform: Platform) -> eyre::Result<()> {
    let manager = platform.actor("manager@example.com", Role::Manager).await;
    let student = platform
        .state
        .accounts
        .register(RegisterRequest::new(
            "declined@example.com",
            "Declined Student",
            PASSWORD,
        ))
        .await?;

    platform
        .state
        .accounts
        .reject_student(manager, student.id())
        .await?;

    let attempt = platform
        .state
        .sessions
        .login("declined@example.com", PASSWORD)
        .await;
    ensure!(
        matches!(attempt, Err(AuthError::AccountDisabled)),
        "rejected students must not sign in"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removed_mentor_loses_access(platform: Platform) -> eyre::Result<()> {
    let manager = platform.actor("manager@example.com", Role::Manager).await;
    let mentor = platform
        .state
        .accounts
        .create_staff_member(
            manager,
            CreateMemberRequest::new("guide@example.com", "Guide", PASSWORD, Role::Mentor)
                .with_skills("rust"),
            Role::Mentor,
        )
        .await?;
    let pair = platform
        .state
        .sessions
        .login("guide@example.com", PASSWORD)
        .await?;

    platform
        .state
        .accounts
        .remove_member(manager, mentor.id(), Role::Mentor)
        .await?;

    let mentors = platform
        .state
        .accounts
        .list_active_by_role(Role::Mentor)
        .await?;
    ensure!(mentors.is_empty(), "removed mentors are not listed");
    let reuse = platform
        .state
        .sessions
        .authenticate(&pair.access_token)
        .await;
    ensure!(reuse.is_err(), "outstanding tokens must stop working");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn staff_endpoints_check_the_requested_role(platform: Platform) -> eyre::Result<()> {
    let manager = platform.actor("manager@example.com", Role::Manager).await;

    let result = platform
        .state
        .accounts
        .create_staff_member(
            manager,
            CreateMemberRequest::new("wrong@example.com", "Wrong Role", PASSWORD, Role::Student),
            Role::Curator,
        )
        .await;

    ensure!(
        matches!(result, Err(AccountServiceError::RoleMismatch(Role::Curator))),
        "a student cannot be created through the curator endpoint"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn role_change_revokes_tokens(platform: Platform) -> eyre::Result<()> {
    let admin = platform.actor("admin@example.com", Role::Admin).await;
    let curator = platform.member("curator@example.com", Role::Curator).await;
    let pair = platform
        .state
        .sessions
        .login("curator@example.com", PASSWORD)
        .await?;

    platform
        .state
        .accounts
        .change_role(admin, curator.id(), Role::Mentor)
        .await?;

    let stale = platform
        .state
        .sessions
        .authenticate(&pair.access_token)
        .await;
    ensure!(
        matches!(stale, Err(AuthError::TokenRevoked)),
        "tokens issued before the role change must be revoked"
    );
    Ok(())
}
