//! `PostgreSQL` repository implementation for user accounts.

use super::{models::UserRow, schema::users};
use crate::Page;
use crate::db::{self, PgPool};
use crate::user::{
    domain::{
        Email, FullName, PersistedUserData, Role, User, UserId, UserProfile, UserStatus,
    },
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult},
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

const EMAIL_CONSTRAINT: &str = "uq_users_email";

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository over a shared connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let row = to_row(user);
        let user_id = user.id();
        let email = user.email().clone();
        db::run_blocking(&self.pool, move |connection| {
            diesel::insert_into(users::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| map_unique_violation(err, user_id, &email))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let row = to_row(user);
        let user_id = user.id();
        let email = user.email().clone();
        db::run_blocking(&self.pool, move |connection| {
            let updated = diesel::update(users::table.filter(users::id.eq(user_id.into_inner())))
                .set(&row)
                .execute(connection)
                .map_err(|err| map_unique_violation(err, user_id, &email))?;
            if updated == 0 {
                return Err(UserRepositoryError::NotFound(user_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        db::run_blocking(&self.pool, move |connection| {
            users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?
                .map(row_to_user)
                .transpose()
        })
        .await
    }

    async fn find_by_email(&self, email: &Email) -> UserRepositoryResult<Option<User>> {
        let lookup = email.as_str().to_owned();
        db::run_blocking(&self.pool, move |connection| {
            users::table
                .filter(users::email.eq(lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?
                .map(row_to_user)
                .transpose()
        })
        .await
    }

    async fn list(&self, page: Page) -> UserRepositoryResult<Vec<User>> {
        db::run_blocking(&self.pool, move |connection| {
            users::table
                .order((users::created_at.asc(), users::id.asc()))
                .offset(page.offset_i64())
                .limit(page.limit_i64())
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?
                .into_iter()
                .map(row_to_user)
                .collect()
        })
        .await
    }

    async fn list_by_role(&self, role: Role) -> UserRepositoryResult<Vec<User>> {
        db::run_blocking(&self.pool, move |connection| {
            users::table
                .filter(users::role.eq(role.as_str()))
                .order((users::created_at.asc(), users::id.asc()))
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?
                .into_iter()
                .map(row_to_user)
                .collect()
        })
        .await
    }
}

fn map_unique_violation(err: DieselError, user_id: UserId, email: &Email) -> UserRepositoryError {
    if db::is_unique_violation(&err, EMAIL_CONSTRAINT) {
        return UserRepositoryError::DuplicateEmail(email.clone());
    }
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserRepositoryError::DuplicateUser(user_id)
        }
        other => UserRepositoryError::persistence(other),
    }
}

fn to_row(user: &User) -> UserRow {
    let profile = user.profile().clone();
    UserRow {
        id: user.id().into_inner(),
        email: user.email().as_str().to_owned(),
        password_hash: user.password_hash().to_owned(),
        full_name: user.full_name().as_str().to_owned(),
        role: user.role().as_str().to_owned(),
        status: user.status().as_str().to_owned(),
        avatar_url: profile.avatar_url,
        faculty: profile.faculty,
        skills: profile.skills,
        about: profile.about,
        course: profile.course,
        linkedin_url: profile.linkedin_url,
        github_url: profile.github_url,
        is_deleted: user.is_deleted(),
        token_version: db::to_sql_int(user.token_version()),
        last_active_at: user.last_active_at(),
        created_at: user.created_at(),
    }
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let email = Email::new(row.email).map_err(UserRepositoryError::persistence)?;
    let full_name = FullName::new(row.full_name).map_err(UserRepositoryError::persistence)?;
    let role = Role::try_from(row.role.as_str()).map_err(UserRepositoryError::persistence)?;
    let status =
        UserStatus::try_from(row.status.as_str()).map_err(UserRepositoryError::persistence)?;

    Ok(User::from_persisted(PersistedUserData {
        id: UserId::from_uuid(row.id),
        email,
        password_hash: row.password_hash,
        full_name,
        role,
        status,
        profile: UserProfile {
            avatar_url: row.avatar_url,
            faculty: row.faculty,
            skills: row.skills,
            about: row.about,
            course: row.course,
            linkedin_url: row.linkedin_url,
            github_url: row.github_url,
        },
        is_deleted: row.is_deleted,
        token_version: db::from_sql_int(row.token_version),
        last_active_at: row.last_active_at,
        created_at: row.created_at,
    }))
}
