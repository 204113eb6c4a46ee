//! Response bodies for types that do not serialize themselves.

use crate::user::domain::{Email, FullName, Role, User, UserId, UserProfile, UserStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Public representation of an account; never includes credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    /// Identifier.
    pub id: UserId,
    /// Email address.
    pub email: Email,
    /// Display name.
    pub full_name: FullName,
    /// Role.
    pub role: Role,
    /// Account status.
    pub status: UserStatus,
    /// Profile fields.
    #[serde(flatten)]
    pub profile: UserProfile,
    /// Soft-delete flag.
    pub is_deleted: bool,
    /// Last sign-in time.
    pub last_active_at: Option<DateTime<Utc>>,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            email: user.email().clone(),
            full_name: user.full_name().clone(),
            role: user.role(),
            status: user.status(),
            profile: user.profile().clone(),
            is_deleted: user.is_deleted(),
            last_active_at: user.last_active_at(),
            created_at: user.created_at(),
        }
    }
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

/// Converts a list of accounts.
#[must_use]
pub fn users(list: &[User]) -> Vec<UserView> {
    list.iter().map(UserView::from).collect()
}
