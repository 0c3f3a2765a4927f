//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

use super::password::PasswordIssue;

/// Errors that can occur during authentication and account management.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid username format.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] matchbook_core::UsernameError),

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] matchbook_core::EmailError),

    /// Display name longer than the account column allows.
    #[error("full name cannot exceed 100 characters")]
    FullNameTooLong,

    /// Password fails one or more strength rules.
    #[error("password does not meet requirements: {}", join(.0))]
    WeakPassword(Vec<PasswordIssue>),

    /// Username is already registered.
    #[error("username already exists")]
    UsernameTaken,

    /// Email is already registered.
    #[error("email already exists")]
    EmailTaken,

    /// Wrong password, unknown account or inactive account.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Admin user not found.
    #[error("admin user not found")]
    UserNotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

fn join(issues: &[PasswordIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
