//! Service tests for sign-in, refresh and authentication.

use std::sync::Arc;

use crate::audit::adapters::memory::InMemoryAuditRepository;
use crate::auth::{
    domain::{AuthError, TokenCodec},
    services::AuthService,
};
use crate::user::{
    adapters::memory::InMemoryUserRepository,
    domain::{Actor, Role, UserId, UserStatus},
    services::{AccountService, CreateMemberRequest, RegisterRequest},
};
use chrono::Duration;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type Accounts = AccountService<InMemoryUserRepository, InMemoryAuditRepository, DefaultClock>;
type Sessions = AuthService<InMemoryUserRepository, InMemoryAuditRepository, DefaultClock>;

struct Harness {
    accounts: Accounts,
    sessions: Sessions,
}

#[fixture]
fn harness() -> Harness {
    let users = Arc::new(InMemoryUserRepository::new());
    let audit = Arc::new(InMemoryAuditRepository::new());
    let clock = Arc::new(DefaultClock);
    let codec = TokenCodec::new(b"test-secret-key-123", Duration::minutes(30), Duration::days(7));
    Harness {
        accounts: AccountService::new(Arc::clone(&users), Arc::clone(&audit), Arc::clone(&clock)),
        sessions: AuthService::new(users, audit, codec, clock),
    }
}

fn admin() -> Actor {
    Actor::new(UserId::new(), Role::Admin)
}

async fn active_mentor(harness: &Harness) -> UserId {
    harness
        .accounts
        .create_member(CreateMemberRequest::new(
            "mentor@example.com",
            "Mona Mentor",
            "password1",
            Role::Mentor,
        ))
        .await
        .expect("creation should succeed")
        .id()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_issues_tokens_that_authenticate(harness: Harness) {
    let id = active_mentor(&harness).await;
    let pair = harness
        .sessions
        .login("MENTOR@example.com", "password1")
        .await
        .expect("login should succeed");

    let user = harness
        .sessions
        .authenticate(&pair.access_token)
        .await
        .expect("access token should authenticate");
    assert_eq!(user.id(), id);
    assert!(user.last_active_at().is_some());

    let refreshed = harness
        .sessions
        .refresh(&pair.refresh_token)
        .await
        .expect("refresh should succeed");
    assert!(harness.sessions.authenticate(&refreshed.access_token).await.is_ok());
}

#[rstest]
#[case("mentor@example.com", "wrong-password")]
#[case("nobody@example.com", "password1")]
#[case("not-an-email", "password1")]
#[tokio::test(flavor = "multi_thread")]
async fn bad_credentials_are_rejected(
    harness: Harness,
    #[case] email: &str,
    #[case] password: &str,
) {
    active_mentor(&harness).await;
    let result = harness.sessions.login(email, password).await;
    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pending_and_disabled_accounts_cannot_sign_in(harness: Harness) {
    harness
        .accounts
        .register(RegisterRequest::new("new@example.com", "New Student", "password1"))
        .await
        .expect("registration should succeed");
    let pending = harness.sessions.login("new@example.com", "password1").await;
    assert!(matches!(pending, Err(AuthError::AccountPending)));

    harness
        .accounts
        .create_member(
            CreateMemberRequest::new("off@example.com", "Off User", "password1", Role::Student)
                .with_status(UserStatus::Disabled),
        )
        .await
        .expect("creation should succeed");
    let disabled = harness.sessions.login("off@example.com", "password1").await;
    assert!(matches!(disabled, Err(AuthError::AccountDisabled)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn refresh_token_is_not_an_access_token(harness: Harness) {
    active_mentor(&harness).await;
    let pair = harness
        .sessions
        .login("mentor@example.com", "password1")
        .await
        .expect("login should succeed");
    let result = harness.sessions.authenticate(&pair.refresh_token).await;
    assert!(matches!(result, Err(AuthError::InvalidToken)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn role_change_revokes_issued_tokens(harness: Harness) {
    let id = active_mentor(&harness).await;
    let pair = harness
        .sessions
        .login("mentor@example.com", "password1")
        .await
        .expect("login should succeed");

    harness
        .accounts
        .change_role(admin(), id, Role::Curator)
        .await
        .expect("role change should succeed");

    assert!(matches!(
        harness.sessions.authenticate(&pair.access_token).await,
        Err(AuthError::TokenRevoked)
    ));
    assert!(matches!(
        harness.sessions.refresh(&pair.refresh_token).await,
        Err(AuthError::TokenRevoked)
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_account_is_revoked(harness: Harness) {
    let id = active_mentor(&harness).await;
    let pair = harness
        .sessions
        .login("mentor@example.com", "password1")
        .await
        .expect("login should succeed");
    harness
        .accounts
        .remove_member(admin(), id, Role::Mentor)
        .await
        .expect("removal should succeed");

    assert!(matches!(
        harness.sessions.authenticate(&pair.access_token).await,
        Err(AuthError::TokenRevoked)
    ));
    assert!(matches!(
        harness.sessions.login("mentor@example.com", "password1").await,
        Err(AuthError::AccountDeleted)
    ));
}
