//! Admin user repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use matchbook_core::{AdminUserId, Email, Username};

use super::{AdminUserStore, RepositoryError, conflict_or_database};
use crate::models::{AdminUser, NewAdminUser};

const USER_COLUMNS: &str = "id, username, email, full_name, is_active, created_at, last_login";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` admin user queries.
#[derive(Debug, sqlx::FromRow)]
struct AdminUserRow {
    id: i32,
    username: String,
    email: String,
    full_name: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    last_login: Option<DateTime<Utc>>,
}

impl TryFrom<AdminUserRow> for AdminUser {
    type Error = RepositoryError;

    fn try_from(row: AdminUserRow) -> Result<Self, Self::Error> {
        let username = Username::parse(&row.username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: AdminUserId::new(row.id),
            username,
            email,
            full_name: row.full_name,
            is_active: row.is_active,
            created_at: row.created_at,
            last_login: row.last_login,
        })
    }
}

/// Account row together with its password hash.
#[derive(Debug, sqlx::FromRow)]
struct CredentialRow {
    #[sqlx(flatten)]
    user: AdminUserRow,
    password_hash: String,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for admin user database operations.
pub struct AdminUserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminUserRepository<'a> {
    /// Create a new admin user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(
        &self,
        clause: &str,
        value: &str,
    ) -> Result<Option<AdminUser>, RepositoryError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM matchbook.admin_user WHERE {clause}");
        let row = sqlx::query_as::<_, AdminUserRow>(&sql)
            .bind(value)
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }
}

impl AdminUserStore for AdminUserRepository<'_> {
    async fn create(&self, user: &NewAdminUser) -> Result<AdminUser, RepositoryError> {
        let sql = format!(
            "INSERT INTO matchbook.admin_user (username, email, full_name, password_hash) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, AdminUserRow>(&sql)
            .bind(user.username.as_str())
            .bind(user.email.as_str())
            .bind(&user.full_name)
            .bind(&user.password_hash)
            .fetch_one(self.pool)
            .await
            .map_err(conflict_or_database)?;

        row.try_into()
    }

    async fn get_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<AdminUser>, RepositoryError> {
        self.fetch_one_where("LOWER(username) = LOWER($1)", username.as_str())
            .await
    }

    async fn get_by_email(&self, email: &Email) -> Result<Option<AdminUser>, RepositoryError> {
        self.fetch_one_where("LOWER(email) = LOWER($1)", email.as_str())
            .await
    }

    async fn get_password_hash(
        &self,
        login: &str,
    ) -> Result<Option<(AdminUser, String)>, RepositoryError> {
        let sql = format!(
            "SELECT {USER_COLUMNS}, password_hash FROM matchbook.admin_user \
             WHERE LOWER(username) = LOWER($1) OR LOWER(email) = LOWER($1) \
             ORDER BY id \
             LIMIT 1"
        );
        let row = sqlx::query_as::<_, CredentialRow>(&sql)
            .bind(login.trim())
            .fetch_optional(self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let user = AdminUser::try_from(row.user)?;
        Ok(Some((user, row.password_hash)))
    }

    async fn list_all(&self) -> Result<Vec<AdminUser>, RepositoryError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM matchbook.admin_user ORDER BY created_at, id");
        let rows = sqlx::query_as::<_, AdminUserRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn record_login(&self, id: AdminUserId, at: DateTime<Utc>) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE matchbook.admin_user SET last_login = $1 WHERE id = $2")
            .bind(at)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn set_active(&self, id: AdminUserId, active: bool) -> Result<AdminUser, RepositoryError> {
        let sql = format!(
            "UPDATE matchbook.admin_user SET is_active = $1 WHERE id = $2 RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, AdminUserRow>(&sql)
            .bind(active)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    async fn update_password_hash(
        &self,
        id: AdminUserId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE matchbook.admin_user SET password_hash = $1 WHERE id = $2")
                .bind(password_hash)
                .bind(id)
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, id: AdminUserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM matchbook.admin_user WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
