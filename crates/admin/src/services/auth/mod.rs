//! Operator authentication and account management.
//!
//! Passwords are hashed with Argon2id. Every login failure surfaces as
//! [`AuthError::InvalidCredentials`]: unknown accounts, inactive accounts and
//! wrong passwords are indistinguishable to the caller, and unknown accounts
//! still pay for one hash verification.

mod error;
pub mod password;

pub use error::AuthError;
pub use password::{PasswordIssue, validate_password_strength};

use chrono::Utc;

use matchbook_core::{Email, Username};

use crate::db::{AdminUserStore, RepositoryError};
use crate::models::{AdminUser, NewAdminUser};

/// Longest display name an account can carry.
pub const MAX_FULL_NAME_LENGTH: usize = 100;

/// Registration input as submitted by an operator.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
}

/// Authentication service.
///
/// Handles registration, login and account administration.
pub struct AuthService<S> {
    users: S,
}

impl<S: AdminUserStore> AuthService<S> {
    /// Create a new authentication service over an account store.
    ///
    /// Builds the dummy hash used on failed logins up front.
    #[must_use]
    pub fn new(users: S) -> Self {
        if !password::prepare_dummy() {
            tracing::warn!("Dummy password hash unavailable; unknown logins skip verification");
        }
        Self { users }
    }

    // =========================================================================
    // Registration & Login
    // =========================================================================

    /// Register a new operator.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` / `InvalidEmail` for malformed input.
    /// Returns `AuthError::FullNameTooLong` for an over-long display name.
    /// Returns `AuthError::WeakPassword` listing every failed strength rule.
    /// Returns `AuthError::UsernameTaken` / `EmailTaken` on collision.
    pub async fn register(&self, registration: &Registration) -> Result<AdminUser, AuthError> {
        let username = Username::parse(&registration.username)?;
        let email = Email::parse(&registration.email)?;
        let full_name = registration.full_name.trim();
        if full_name.chars().count() > MAX_FULL_NAME_LENGTH {
            return Err(AuthError::FullNameTooLong);
        }
        validate_password_strength(&registration.password).map_err(AuthError::WeakPassword)?;

        if self.users.get_by_username(&username).await?.is_some() {
            return Err(AuthError::UsernameTaken);
        }
        if self.users.get_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = password::hash_password(&registration.password)?;

        let user = self
            .users
            .create(&NewAdminUser {
                username,
                email,
                full_name: full_name.to_owned(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(ref what) if what.contains("email") => {
                    AuthError::EmailTaken
                }
                RepositoryError::Conflict(_) => AuthError::UsernameTaken,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "Admin registered");
        Ok(user)
    }

    /// Log in with a username or email and a password.
    ///
    /// On success the account's `last_login` is set to now and the refreshed
    /// account is returned.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for every authentication failure.
    pub async fn login(&self, login: &str, password: &str) -> Result<AdminUser, AuthError> {
        let Some((mut user, password_hash)) = self.users.get_password_hash(login).await? else {
            password::verify_dummy(password);
            tracing::warn!("Login failed");
            return Err(AuthError::InvalidCredentials);
        };

        if !user.is_active {
            password::verify_dummy(password);
            tracing::warn!(user_id = %user.id, "Login failed");
            return Err(AuthError::InvalidCredentials);
        }

        if let Err(e) = password::verify_password(password, &password_hash) {
            tracing::warn!(user_id = %user.id, "Login failed");
            return Err(e);
        }

        let now = Utc::now();
        self.users.record_login(user.id, now).await?;
        user.last_login = Some(now);

        tracing::info!(user_id = %user.id, "Admin logged in");
        Ok(user)
    }

    // =========================================================================
    // Account Administration
    // =========================================================================

    /// List all operators.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the store fails.
    pub async fn list_users(&self) -> Result<Vec<AdminUser>, AuthError> {
        Ok(self.users.list_all().await?)
    }

    /// Get an operator by username.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if no such account exists.
    pub async fn get_user(&self, username: &str) -> Result<AdminUser, AuthError> {
        let username = Username::parse(username)?;
        self.users
            .get_by_username(&username)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Allow or block logins for an operator.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if no such account exists.
    pub async fn set_active(&self, username: &str, active: bool) -> Result<AdminUser, AuthError> {
        let user = self.get_user(username).await?;
        let user = self
            .users
            .set_active(user.id, active)
            .await
            .map_err(not_found_as_user)?;

        tracing::info!(user_id = %user.id, active, "Admin activation changed");
        Ok(user)
    }

    /// Replace an operator's password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::WeakPassword` if the new password fails the policy.
    /// Returns `AuthError::UserNotFound` if no such account exists.
    pub async fn change_password(&self, username: &str, new_password: &str) -> Result<(), AuthError> {
        validate_password_strength(new_password).map_err(AuthError::WeakPassword)?;
        let user = self.get_user(username).await?;
        let password_hash = password::hash_password(new_password)?;

        self.users
            .update_password_hash(user.id, &password_hash)
            .await
            .map_err(not_found_as_user)?;

        tracing::info!(user_id = %user.id, "Admin password changed");
        Ok(())
    }

    /// Delete an operator.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if no such account exists.
    pub async fn delete_user(&self, username: &str) -> Result<(), AuthError> {
        let user = self.get_user(username).await?;
        self.users.delete(user.id).await.map_err(not_found_as_user)?;

        tracing::info!(user_id = %user.id, "Admin deleted");
        Ok(())
    }
}

fn not_found_as_user(e: RepositoryError) -> AuthError {
    match e {
        RepositoryError::NotFound => AuthError::UserNotFound,
        other => AuthError::Repository(other),
    }
}
