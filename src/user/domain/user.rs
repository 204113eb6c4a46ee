//! User aggregate root and profile data.

use super::{Email, FullName, Role, UserDomainError, UserId, UserStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Optional self-description fields shown on profiles and team pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// Faculty or department.
    pub faculty: Option<String>,
    /// Free-text skill list.
    pub skills: Option<String>,
    /// Free-text biography.
    pub about: Option<String>,
    /// Course or year of study.
    pub course: Option<String>,
    /// `LinkedIn` profile URL.
    pub linkedin_url: Option<String>,
    /// `GitHub` profile URL.
    pub github_url: Option<String>,
}

impl UserProfile {
    /// Checks every field against its column limit.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::ProfileFieldTooLong`] for the first field
    /// that exceeds its limit.
    pub fn validate(&self) -> Result<(), UserDomainError> {
        let limits = [
            ("avatar_url", self.avatar_url.as_deref(), 500),
            ("faculty", self.faculty.as_deref(), 255),
            ("skills", self.skills.as_deref(), 500),
            ("course", self.course.as_deref(), 255),
            ("linkedin_url", self.linkedin_url.as_deref(), 500),
            ("github_url", self.github_url.as_deref(), 500),
        ];
        for (field, value, max) in limits {
            if value.is_some_and(|text| text.chars().count() > max) {
                return Err(UserDomainError::ProfileFieldTooLong { field, max });
            }
        }
        Ok(())
    }

    /// Overwrites the fields that are set in `patch`.
    pub fn merge(&mut self, patch: Self) {
        let Self {
            avatar_url,
            faculty,
            skills,
            about,
            course,
            linkedin_url,
            github_url,
        } = patch;
        merge_field(&mut self.avatar_url, avatar_url);
        merge_field(&mut self.faculty, faculty);
        merge_field(&mut self.skills, skills);
        merge_field(&mut self.about, about);
        merge_field(&mut self.course, course);
        merge_field(&mut self.linkedin_url, linkedin_url);
        merge_field(&mut self.github_url, github_url);
    }
}

fn merge_field(target: &mut Option<String>, update: Option<String>) {
    if update.is_some() {
        *target = update;
    }
}

/// Reason a user may not currently act on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessBlock {
    /// The account was soft-deleted.
    Deleted,
    /// The account was disabled by staff.
    Disabled,
    /// The account awaits approval.
    Pending,
}

/// User aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: Email,
    password_hash: String,
    full_name: FullName,
    role: Role,
    status: UserStatus,
    profile: UserProfile,
    is_deleted: bool,
    token_version: u32,
    last_active_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted identifier.
    pub id: UserId,
    /// Persisted email.
    pub email: Email,
    /// Persisted PHC password hash.
    pub password_hash: String,
    /// Persisted display name.
    pub full_name: FullName,
    /// Persisted role.
    pub role: Role,
    /// Persisted account status.
    pub status: UserStatus,
    /// Persisted profile fields.
    pub profile: UserProfile,
    /// Persisted soft-delete flag.
    pub is_deleted: bool,
    /// Persisted token version.
    pub token_version: u32,
    /// Persisted last sign-in time.
    pub last_active_at: Option<DateTime<Utc>>,
    /// Persisted creation time.
    pub created_at: DateTime<Utc>,
}

/// Identity and access fields shared by new and reactivated accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountFields {
    /// Display name.
    pub full_name: FullName,
    /// PHC password hash.
    pub password_hash: String,
    /// Granted role.
    pub role: Role,
    /// Initial status.
    pub status: UserStatus,
    /// Initial profile.
    pub profile: UserProfile,
}

impl User {
    /// Creates a new account.
    #[must_use]
    pub fn new(email: Email, fields: AccountFields, clock: &impl Clock) -> Self {
        let AccountFields {
            full_name,
            password_hash,
            role,
            status,
            profile,
        } = fields;
        Self {
            id: UserId::new(),
            email,
            password_hash,
            full_name,
            role,
            status,
            profile,
            is_deleted: false,
            token_version: 0,
            last_active_at: None,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            email: data.email,
            password_hash: data.password_hash,
            full_name: data.full_name,
            role: data.role,
            status: data.status,
            profile: data.profile,
            is_deleted: data.is_deleted,
            token_version: data.token_version,
            last_active_at: data.last_active_at,
            created_at: data.created_at,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the stored password hash.
    #[must_use]
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Returns the display name.
    #[must_use]
    pub const fn full_name(&self) -> &FullName {
        &self.full_name
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the account status.
    #[must_use]
    pub const fn status(&self) -> UserStatus {
        self.status
    }

    /// Returns the profile fields.
    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Returns whether the account was soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    /// Returns the token version embedded in issued tokens.
    #[must_use]
    pub const fn token_version(&self) -> u32 {
        self.token_version
    }

    /// Returns the last sign-in time.
    #[must_use]
    pub const fn last_active_at(&self) -> Option<DateTime<Utc>> {
        self.last_active_at
    }

    /// Returns the creation time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns why the user may not act, if anything blocks them.
    ///
    /// Deletion takes precedence over status.
    #[must_use]
    pub const fn access_block(&self) -> Option<AccessBlock> {
        if self.is_deleted {
            return Some(AccessBlock::Deleted);
        }
        match self.status {
            UserStatus::Active => None,
            UserStatus::Disabled => Some(AccessBlock::Disabled),
            UserStatus::Pending => Some(AccessBlock::Pending),
        }
    }

    /// Returns true for an active, non-deleted account.
    #[must_use]
    pub const fn is_active_member(&self) -> bool {
        self.access_block().is_none()
    }

    /// Reuses a soft-deleted account row for a new sign-up.
    ///
    /// Outstanding tokens are revoked.
    pub fn reactivate(&mut self, fields: AccountFields) {
        let AccountFields {
            full_name,
            password_hash,
            role,
            status,
            profile,
        } = fields;
        self.full_name = full_name;
        self.password_hash = password_hash;
        self.role = role;
        self.status = status;
        self.profile = profile;
        self.is_deleted = false;
        self.bump_token_version();
    }

    /// Renames the account holder.
    pub fn rename(&mut self, full_name: FullName) {
        self.full_name = full_name;
    }

    /// Applies profile updates.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::ProfileFieldTooLong`] when the merged
    /// profile violates a field limit; the user is left unchanged.
    pub fn update_profile(&mut self, patch: UserProfile) -> Result<(), UserDomainError> {
        let mut merged = self.profile.clone();
        merged.merge(patch);
        merged.validate()?;
        self.profile = merged;
        Ok(())
    }

    /// Grants a new role and revokes outstanding tokens.
    pub fn change_role(&mut self, role: Role) {
        self.role = role;
        self.bump_token_version();
    }

    /// Sets the account status.
    pub const fn set_status(&mut self, status: UserStatus) {
        self.status = status;
    }

    /// Soft-deletes the account and revokes outstanding tokens.
    pub fn soft_delete(&mut self) {
        self.status = UserStatus::Disabled;
        self.is_deleted = true;
        self.bump_token_version();
    }

    /// Records a successful sign-in.
    pub fn mark_active(&mut self, clock: &impl Clock) {
        self.last_active_at = Some(clock.utc());
    }

    const fn bump_token_version(&mut self) {
        self.token_version = self.token_version.saturating_add(1);
    }
}
