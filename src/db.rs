//! Shared `PostgreSQL` plumbing for the Diesel adapters.
//!
//! Every `PostgreSQL` repository holds a clone of the same r2d2 pool and
//! offloads its synchronous Diesel calls through [`run_blocking`] so the
//! async executor never blocks on the database.

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use thiserror::Error;

/// `PostgreSQL` connection pool type used by all adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failures raised by the shared database plumbing.
#[derive(Debug, Error)]
pub enum DbError {
    /// Pool construction or checkout failed.
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    /// The blocking worker panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// Applying embedded migrations failed.
    #[error("migration failed: {0}")]
    Migration(String),
}

/// Builds a connection pool for the given database URL.
///
/// # Errors
///
/// Returns [`DbError::Pool`] when the pool cannot establish its initial
/// connections.
pub fn connect(database_url: &str, max_size: u32) -> Result<PgPool, DbError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Ok(Pool::builder().max_size(max_size).build(manager)?)
}

/// Applies any pending embedded migrations.
///
/// # Errors
///
/// Returns [`DbError::Pool`] when no connection is available or
/// [`DbError::Migration`] when a migration fails.
pub fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    let mut connection = pool.get()?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| DbError::Migration(err.to_string()))?;
    tracing::info!(count = applied.len(), "applied database migrations");
    Ok(())
}

/// Runs a Diesel closure on the blocking thread pool with a pooled
/// connection.
///
/// Pool and join failures are converted into the caller's error type
/// through `From<DbError>`.
pub async fn run_blocking<F, T, E>(pool: &PgPool, f: F) -> Result<T, E>
where
    F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: From<DbError> + Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get().map_err(|err| E::from(DbError::Pool(err)))?;
        f(&mut connection)
    })
    .await
    .map_err(|err| E::from(DbError::Join(err)))?
}

/// Returns true when `err` is a unique violation of the named constraint.
#[must_use]
pub fn is_unique_violation(err: &DieselError, constraint: &str) -> bool {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => info
            .constraint_name()
            .is_some_and(|name| name == constraint),
        _ => false,
    }
}

/// Converts an unsigned counter into an `i32` column value.
#[must_use]
pub fn to_sql_int(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Converts a persisted `i32` counter back into an unsigned value.
#[must_use]
pub fn from_sql_int(value: i32) -> u32 {
    u32::try_from(value).unwrap_or_default()
}
