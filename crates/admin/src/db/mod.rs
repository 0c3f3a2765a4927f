//! Database operations for the desk `PostgreSQL` store.
//!
//! ## Tables (schema `matchbook`)
//!
//! - `admin_user` - Desk operators with Argon2id password hashes
//! - `game` - Game results
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! mb-cli migrate
//! ```
//!
//! # Stores
//!
//! Services talk to [`AdminUserStore`] and [`GameStore`] rather than to the
//! repositories directly, so they can be exercised against an in-memory
//! store in tests.

pub mod admin_users;
pub mod games;

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use matchbook_core::{AdminUserId, Email, Game, GameId, NewGame, Username};

pub use admin_users::AdminUserRepository;
pub use games::GameRepository;

use crate::config::DeskConfig;
use crate::models::{AdminUser, NewAdminUser};

/// Embedded migrations for the desk schema.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool from the desk configuration.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(config: &DeskConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(config.database_url.expose_secret())
        .await
}

/// Apply any pending migrations.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or the history is inconsistent.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!(count = MIGRATOR.iter().count(), "Running desk migrations");
    MIGRATOR.run(pool).await
}

/// Map a unique violation to `Conflict`, naming the offending column.
pub(crate) fn conflict_or_database(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        let what = match db_err.constraint() {
            Some(c) if c.contains("username") => "username already exists",
            Some(c) if c.contains("email") => "email already exists",
            _ => "record already exists",
        };
        return RepositoryError::Conflict(what.to_owned());
    }
    RepositoryError::Database(e)
}

/// Persistence for operator accounts.
pub trait AdminUserStore: Send + Sync {
    /// Insert an account.
    ///
    /// Fails with `Conflict` when the username or email is taken.
    fn create(
        &self,
        user: &NewAdminUser,
    ) -> impl Future<Output = Result<AdminUser, RepositoryError>> + Send;

    fn get_by_username(
        &self,
        username: &Username,
    ) -> impl Future<Output = Result<Option<AdminUser>, RepositoryError>> + Send;

    fn get_by_email(
        &self,
        email: &Email,
    ) -> impl Future<Output = Result<Option<AdminUser>, RepositoryError>> + Send;

    /// Account and password hash for a login name, matching either the
    /// username or the email (case-insensitive).
    fn get_password_hash(
        &self,
        login: &str,
    ) -> impl Future<Output = Result<Option<(AdminUser, String)>, RepositoryError>> + Send;

    /// All accounts, oldest first.
    fn list_all(&self) -> impl Future<Output = Result<Vec<AdminUser>, RepositoryError>> + Send;

    fn record_login(
        &self,
        id: AdminUserId,
        at: DateTime<Utc>,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    fn set_active(
        &self,
        id: AdminUserId,
        active: bool,
    ) -> impl Future<Output = Result<AdminUser, RepositoryError>> + Send;

    fn update_password_hash(
        &self,
        id: AdminUserId,
        password_hash: &str,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    fn delete(&self, id: AdminUserId) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// Persistence for game records.
pub trait GameStore: Send + Sync {
    fn insert(&self, game: &NewGame) -> impl Future<Output = Result<Game, RepositoryError>> + Send;

    fn get(&self, id: GameId) -> impl Future<Output = Result<Option<Game>, RepositoryError>> + Send;

    /// All games, newest date first.
    fn list_all(&self) -> impl Future<Output = Result<Vec<Game>, RepositoryError>> + Send;

    /// Games played on one date.
    fn list_on_date(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<Game>, RepositoryError>> + Send;

    /// Replace the editable fields of a game and bump `updated_at`.
    fn update(
        &self,
        id: GameId,
        game: &NewGame,
    ) -> impl Future<Output = Result<Game, RepositoryError>> + Send;

    fn delete(&self, id: GameId) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}
