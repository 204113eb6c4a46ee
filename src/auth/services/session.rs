//! Sign-in, token refresh and bearer-token authentication.

use crate::audit::{
    domain::{AuditAction, EntityKind, EntityRef},
    ports::AuditRepository,
    services::AuditTrail,
};
use crate::auth::domain::{AuthError, Claims, TokenCodec, TokenKind, TokenPair, verify_password};
use crate::user::{
    domain::{AccessBlock, Email, User},
    ports::UserRepository,
};
use mockable::Clock;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Session management service.
pub struct AuthService<U, L, C>
where
    U: UserRepository + ?Sized,
    L: AuditRepository + ?Sized,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    audit: AuditTrail<L, C>,
    codec: TokenCodec,
    clock: Arc<C>,
}

impl<U, L, C> AuthService<U, L, C>
where
    U: UserRepository + ?Sized,
    L: AuditRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new authentication service.
    #[must_use]
    pub fn new(users: Arc<U>, audit: Arc<L>, codec: TokenCodec, clock: Arc<C>) -> Self {
        Self {
            users,
            audit: AuditTrail::new(audit, Arc::clone(&clock)),
            codec,
            clock,
        }
    }

    /// Verifies credentials and issues a token pair.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown email or a
    /// wrong password, and an account-state error when the account may not
    /// sign in.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<TokenPair> {
        let address = Email::new(email).map_err(|_| AuthError::InvalidCredentials)?;
        let mut user = self
            .users
            .find_by_email(&address)
            .await?
            .filter(|candidate| verify_password(password, candidate.password_hash()))
            .ok_or(AuthError::InvalidCredentials)?;
        ensure_may_act(&user)?;

        user.mark_active(&*self.clock);
        self.users.update(&user).await?;
        self.audit
            .record(
                Some(user.id()),
                AuditAction::UserLogin,
                EntityRef::new(EntityKind::User, user.id().into_inner()),
                json!({}),
            )
            .await;
        info!(user_id = %user.id(), "user signed in");
        self.codec.issue_pair(&user, self.clock.utc())
    }

    /// Exchanges a refresh token for a new pair carrying the current role.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] for a bad or non-refresh token,
    /// [`AuthError::TokenRevoked`] after a token-version bump, and an
    /// account-state error when the account may no longer sign in.
    pub async fn refresh(&self, refresh_token: &str) -> AuthResult<TokenPair> {
        let claims = self.codec.decode(refresh_token, TokenKind::Refresh)?;
        let user = self.current_user(&claims).await?;
        debug!(user_id = %user.id(), "refreshed tokens");
        self.codec.issue_pair(&user, self.clock.utc())
    }

    /// Resolves an access token to the user it was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`], [`AuthError::UserNotFound`] or
    /// [`AuthError::TokenRevoked`] (unauthorized) or an account-state error
    /// (forbidden).
    pub async fn authenticate(&self, access_token: &str) -> AuthResult<User> {
        let claims = self.codec.decode(access_token, TokenKind::Access)?;
        self.current_user(&claims).await
    }

    /// Ends a session. Tokens are stateless, so nothing is stored.
    #[expect(clippy::unused_self, reason = "kept on the service for a uniform session API")]
    #[must_use]
    pub const fn logout(&self) -> &'static str {
        "Logged out"
    }

    async fn current_user(&self, claims: &Claims) -> AuthResult<User> {
        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        if user.token_version() != claims.tv {
            return Err(AuthError::TokenRevoked);
        }
        ensure_may_act(&user)?;
        Ok(user)
    }
}

const fn ensure_may_act(user: &User) -> AuthResult<()> {
    match user.access_block() {
        None => Ok(()),
        Some(AccessBlock::Deleted) => Err(AuthError::AccountDeleted),
        Some(AccessBlock::Disabled) => Err(AuthError::AccountDisabled),
        Some(AccessBlock::Pending) => Err(AuthError::AccountPending),
    }
}
