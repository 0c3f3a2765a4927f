//! Admin user domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use matchbook_core::{AdminUserId, Email, Username};

/// A desk operator (domain type).
///
/// The password hash is deliberately absent; it only leaves the store for
/// verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminUser {
    /// Unique admin user ID.
    pub id: AdminUserId,
    /// Unique login name.
    pub username: Username,
    /// Unique email address.
    pub email: Email,
    /// Display name, may be empty.
    pub full_name: String,
    /// Inactive accounts cannot log in.
    pub is_active: bool,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
    /// Last successful login, `None` until the first one.
    pub last_login: Option<DateTime<Utc>>,
}

impl AdminUser {
    /// Full name if set, otherwise the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            self.username.as_str()
        } else {
            &self.full_name
        }
    }
}

/// A validated registration, ready to be stored.
#[derive(Debug, Clone)]
pub struct NewAdminUser {
    pub username: Username,
    pub email: Email,
    pub full_name: String,
    /// Argon2id PHC string.
    pub password_hash: String,
}
