//! Password policy and Argon2id hashing.

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

use super::AuthError;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Characters that satisfy the special-character rule.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Hash verified when no account matches, so unknown logins cost the same.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("matchbook-timing-equalizer").ok());

/// One failed strength rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordIssue {
    #[error("must be at least 8 characters long")]
    TooShort,
    #[error("must contain at least one uppercase letter")]
    MissingUppercase,
    #[error("must contain at least one lowercase letter")]
    MissingLowercase,
    #[error("must contain at least one number")]
    MissingDigit,
    #[error("must contain at least one special character")]
    MissingSpecial,
}

/// Check every strength rule, reporting all failures at once.
///
/// # Errors
///
/// Returns the list of failed rules.
pub fn validate_password_strength(password: &str) -> Result<(), Vec<PasswordIssue>> {
    let mut issues = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        issues.push(PasswordIssue::TooShort);
    }
    if !password.chars().any(char::is_uppercase) {
        issues.push(PasswordIssue::MissingUppercase);
    }
    if !password.chars().any(char::is_lowercase) {
        issues.push(PasswordIssue::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        issues.push(PasswordIssue::MissingDigit);
    }
    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        issues.push(PasswordIssue::MissingSpecial);
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Hash a password with Argon2id and a random salt.
pub(super) fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a PHC hash string.
pub(super) fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

/// Build the dummy hash now, so the first failed login does not pay for it.
///
/// Returns `false` if hashing is unavailable.
pub(super) fn prepare_dummy() -> bool {
    LazyLock::force(&DUMMY_HASH).is_some()
}

/// Burn one verification against the dummy hash.
pub(super) fn verify_dummy(password: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_password() {
        assert!(validate_password_strength("Str0ng!Pass").is_ok());
    }

    #[test]
    fn test_all_failures_reported() {
        let issues = validate_password_strength("abc").unwrap_err();
        assert_eq!(
            issues,
            vec![
                PasswordIssue::TooShort,
                PasswordIssue::MissingUppercase,
                PasswordIssue::MissingDigit,
                PasswordIssue::MissingSpecial,
            ]
        );
    }

    #[test]
    fn test_special_character_set() {
        assert!(validate_password_strength("Abcdefg1?").is_ok());
        assert_eq!(
            validate_password_strength("Abcdefg1~").unwrap_err(),
            vec![PasswordIssue::MissingSpecial]
        );
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Str0ng!Pass").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("Str0ng!Pass", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_salts_differ() {
        assert_ne!(
            hash_password("Str0ng!Pass").unwrap(),
            hash_password("Str0ng!Pass").unwrap()
        );
    }

    #[test]
    fn test_garbage_hash_is_invalid_credentials() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_dummy_hash_is_usable() {
        assert!(prepare_dummy());
        assert!(DUMMY_HASH.is_some());
        verify_dummy("anything");
    }
}
