//! Account registration, staff management and profile updates.

use crate::Page;
use crate::audit::{
    domain::{AuditAction, EntityKind, EntityRef},
    ports::AuditRepository,
    services::AuditTrail,
};
use crate::auth::domain::{AuthError, hash_password};
use crate::user::{
    domain::{
        AccessDenied, AccountFields, Actor, Email, FullName, Password, Role, User,
        UserDomainError, UserId, UserProfile, UserStatus,
    },
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Roles allowed to manage other accounts.
const ACCOUNT_MANAGERS: [Role; 2] = [Role::Manager, Role::Admin];

/// Self-registration payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    email: String,
    full_name: String,
    password: String,
}

impl RegisterRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        full_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            full_name: full_name.into(),
            password: password.into(),
        }
    }
}

/// Staff-created account payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMemberRequest {
    email: String,
    full_name: String,
    password: String,
    role: Role,
    status: UserStatus,
    profile: UserProfile,
}

impl CreateMemberRequest {
    /// Creates a request for an active account with the given role.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        full_name: impl Into<String>,
        password: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            email: email.into(),
            full_name: full_name.into(),
            password: password.into(),
            role,
            status: UserStatus::Active,
            profile: UserProfile::default(),
        }
    }

    /// Overrides the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: UserStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the faculty.
    #[must_use]
    pub fn with_faculty(mut self, faculty: impl Into<String>) -> Self {
        self.profile.faculty = Some(faculty.into());
        self
    }

    /// Sets the skills.
    #[must_use]
    pub fn with_skills(mut self, skills: impl Into<String>) -> Self {
        self.profile.skills = Some(skills.into());
        self
    }

    /// Sets the course.
    #[must_use]
    pub fn with_course(mut self, course: impl Into<String>) -> Self {
        self.profile.course = Some(course.into());
        self
    }

    /// Returns the requested role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}

/// Changes a user may make to their own account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// New display name.
    pub full_name: Option<String>,
    /// Profile fields to overwrite.
    pub profile: UserProfile,
}

/// Service-level errors for account operations.
#[derive(Debug, Error)]
pub enum AccountServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] UserDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),

    /// Password hashing failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The actor lacks the required role.
    #[error(transparent)]
    Forbidden(#[from] AccessDenied),

    /// The email belongs to an existing account.
    #[error("Email already registered")]
    EmailTaken,

    /// The target account does not exist or has the wrong role.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The requested role does not match the endpoint.
    #[error("Role must be {0}")]
    RoleMismatch(Role),
}

/// Result type for account operations.
pub type AccountResult<T> = Result<T, AccountServiceError>;

/// Account management service.
pub struct AccountService<U, L, C>
where
    U: UserRepository + ?Sized,
    L: AuditRepository + ?Sized,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    audit: AuditTrail<L, C>,
    clock: Arc<C>,
}

impl<U, L, C> AccountService<U, L, C>
where
    U: UserRepository + ?Sized,
    L: AuditRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new account service.
    #[must_use]
    pub fn new(users: Arc<U>, audit: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            users,
            audit: AuditTrail::new(audit, Arc::clone(&clock)),
            clock,
        }
    }

    /// Registers a pending student account.
    ///
    /// A soft-deleted account holding the same email is reactivated in place.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::EmailTaken`] for a live duplicate email,
    /// or a domain error for invalid input.
    pub async fn register(&self, request: RegisterRequest) -> AccountResult<User> {
        let email = Email::new(request.email)?;
        let password = Password::new(request.password)?;
        let fields = AccountFields {
            full_name: FullName::new(request.full_name)?,
            password_hash: hash_password(&password)?,
            role: Role::Student,
            status: UserStatus::Pending,
            profile: UserProfile::default(),
        };
        self.open_account(email, fields, AuditAction::UserRegistered)
            .await
    }

    /// Creates an account with an explicit role on behalf of staff.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::EmailTaken`] for a live duplicate email,
    /// or a domain error for invalid input.
    pub async fn create_member(&self, request: CreateMemberRequest) -> AccountResult<User> {
        request.profile.validate()?;
        let email = Email::new(request.email)?;
        let password = Password::new(request.password)?;
        let fields = AccountFields {
            full_name: FullName::new(request.full_name)?,
            password_hash: hash_password(&password)?,
            role: request.role,
            status: request.status,
            profile: request.profile,
        };
        self.open_account(email, fields, AuditAction::UserCreated)
            .await
    }

    /// Creates a mentor or curator account from a manager endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Forbidden`] unless the actor is a
    /// manager or admin, and [`AccountServiceError::RoleMismatch`] when the
    /// request names a different role than `expected`.
    pub async fn create_staff_member(
        &self,
        actor: Actor,
        request: CreateMemberRequest,
        expected: Role,
    ) -> AccountResult<User> {
        actor.require_any(&ACCOUNT_MANAGERS)?;
        if request.role() != expected {
            return Err(AccountServiceError::RoleMismatch(expected));
        }
        self.create_member(request).await
    }

    /// Loads a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::NotFound`] when the user does not exist.
    pub async fn find(&self, id: UserId) -> AccountResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(AccountServiceError::NotFound("User"))
    }

    /// Lists all accounts in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Repository`] when the lookup fails.
    pub async fn list_users(&self, page: Page) -> AccountResult<Vec<User>> {
        Ok(self.users.list(page).await?)
    }

    /// Updates the actor's own name and profile.
    ///
    /// # Errors
    ///
    /// Returns a domain error for invalid values and
    /// [`AccountServiceError::NotFound`] when the actor's account is gone.
    pub async fn update_profile(&self, actor: Actor, update: ProfileUpdate) -> AccountResult<User> {
        let mut user = self.find(actor.id).await?;
        if let Some(name) = update.full_name {
            user.rename(FullName::new(name)?);
        }
        user.update_profile(update.profile)?;
        self.users.update(&user).await?;
        Ok(user)
    }

    /// Grants a new role, revoking the user's outstanding tokens.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Forbidden`] unless the actor is an
    /// admin, and [`AccountServiceError::NotFound`] for an unknown user.
    pub async fn change_role(&self, actor: Actor, id: UserId, role: Role) -> AccountResult<User> {
        actor.require_any(&[Role::Admin])?;
        let mut user = self.find(id).await?;
        user.change_role(role);
        self.users.update(&user).await?;
        info!(user_id = %id, role = role.as_str(), "changed user role");
        Ok(user)
    }

    /// Lists active, non-deleted users holding `role`.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Repository`] when the lookup fails.
    pub async fn list_active_by_role(&self, role: Role) -> AccountResult<Vec<User>> {
        let users = self.users.list_by_role(role).await?;
        Ok(users.into_iter().filter(User::is_active_member).collect())
    }

    /// Lists non-deleted students regardless of status.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Repository`] when the lookup fails.
    pub async fn list_students(&self) -> AccountResult<Vec<User>> {
        let users = self.users.list_by_role(Role::Student).await?;
        Ok(users.into_iter().filter(|user| !user.is_deleted()).collect())
    }

    /// Lists students awaiting approval.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Repository`] when the lookup fails.
    pub async fn list_pending_students(&self) -> AccountResult<Vec<User>> {
        let students = self.list_students().await?;
        Ok(students
            .into_iter()
            .filter(|user| user.status() == UserStatus::Pending)
            .collect())
    }

    /// Activates a student account.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::NotFound`] unless the target is a
    /// student, and [`AccountServiceError::Forbidden`] unless the actor is a
    /// manager or admin.
    pub async fn approve_student(&self, actor: Actor, id: UserId) -> AccountResult<User> {
        self.decide_student(actor, id, UserStatus::Active, AuditAction::StudentApproved)
            .await
    }

    /// Disables a student account.
    ///
    /// # Errors
    ///
    /// Same as [`AccountService::approve_student`].
    pub async fn reject_student(&self, actor: Actor, id: UserId) -> AccountResult<User> {
        self.decide_student(actor, id, UserStatus::Disabled, AuditAction::StudentRejected)
            .await
    }

    /// Soft-deletes a mentor or curator.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::NotFound`] when the target is missing,
    /// holds another role or is already deleted.
    pub async fn remove_member(
        &self,
        actor: Actor,
        id: UserId,
        expected_role: Role,
    ) -> AccountResult<User> {
        actor.require_any(&ACCOUNT_MANAGERS)?;
        let label = role_label(expected_role);
        let mut user = self
            .users
            .find_by_id(id)
            .await?
            .filter(|user| user.role() == expected_role && !user.is_deleted())
            .ok_or(AccountServiceError::NotFound(label))?;
        user.soft_delete();
        self.users.update(&user).await?;
        info!(user_id = %id, role = expected_role.as_str(), "removed member");
        Ok(user)
    }

    async fn decide_student(
        &self,
        actor: Actor,
        id: UserId,
        status: UserStatus,
        action: AuditAction,
    ) -> AccountResult<User> {
        actor.require_any(&ACCOUNT_MANAGERS)?;
        let mut student = self
            .users
            .find_by_id(id)
            .await?
            .filter(|user| user.role() == Role::Student)
            .ok_or(AccountServiceError::NotFound("Student"))?;
        student.set_status(status);
        self.users.update(&student).await?;
        self.audit
            .record(Some(actor.id), action, user_ref(id), json!({}))
            .await;
        info!(student_id = %id, status = status.as_str(), "decided on student account");
        Ok(student)
    }

    async fn open_account(
        &self,
        email: Email,
        fields: AccountFields,
        created_action: AuditAction,
    ) -> AccountResult<User> {
        match self.users.find_by_email(&email).await? {
            Some(existing) if !existing.is_deleted() => Err(AccountServiceError::EmailTaken),
            Some(mut existing) => {
                existing.reactivate(fields);
                self.users.update(&existing).await?;
                self.audit
                    .record(
                        Some(existing.id()),
                        AuditAction::UserReactivated,
                        user_ref(existing.id()),
                        json!({ "role": existing.role().as_str() }),
                    )
                    .await;
                info!(user_id = %existing.id(), "reactivated account");
                Ok(existing)
            }
            None => {
                let user = User::new(email, fields, &*self.clock);
                self.users.store(&user).await.map_err(|err| match err {
                    UserRepositoryError::DuplicateEmail(_) => AccountServiceError::EmailTaken,
                    other => AccountServiceError::Repository(other),
                })?;
                self.audit
                    .record(
                        Some(user.id()),
                        created_action,
                        user_ref(user.id()),
                        json!({ "role": user.role().as_str() }),
                    )
                    .await;
                info!(user_id = %user.id(), role = user.role().as_str(), "created account");
                Ok(user)
            }
        }
    }
}

const fn user_ref(id: UserId) -> EntityRef {
    EntityRef::new(EntityKind::User, id.into_inner())
}

const fn role_label(role: Role) -> &'static str {
    match role {
        Role::Mentor => "Mentor",
        Role::Curator => "Curator",
        Role::Student => "Student",
        _ => "User",
    }
}
