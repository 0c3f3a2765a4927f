//! Admin username type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Username`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// Shorter than [`Username::MIN_LENGTH`].
    #[error("username must be at least {min} characters long")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// Longer than [`Username::MAX_LENGTH`].
    #[error("username must be no more than {max} characters long")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// Contains something other than ASCII letters, digits, `_` or `-`.
    #[error("username can only contain letters, numbers, underscores, and hyphens")]
    InvalidCharacters,
    /// Starts or ends with `_` or `-`.
    #[error("username cannot start or end with an underscore or hyphen")]
    InvalidBoundary,
}

/// A unique admin login name.
///
/// 3-50 ASCII letters, digits, underscores and hyphens, not starting or
/// ending with a separator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Minimum username length.
    pub const MIN_LENGTH: usize = 3;
    /// Maximum username length (the `admin_user.username` column width).
    pub const MAX_LENGTH: usize = 50;

    /// Parse a `Username` from a string, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns a [`UsernameError`] for the first rule the input breaks.
    pub fn parse(s: &str) -> Result<Self, UsernameError> {
        let s = s.trim();

        if s.len() < Self::MIN_LENGTH {
            return Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(UsernameError::InvalidCharacters);
        }

        let is_separator = |c: char| c == '_' || c == '-';
        if s.starts_with(is_separator) || s.ends_with(is_separator) {
            return Err(UsernameError::InvalidBoundary);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Username {
    type Err = UsernameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(Username::parse("admin").is_ok());
        assert!(Username::parse("score_keeper-2").is_ok());
        assert!(Username::parse("abc").is_ok());
    }

    #[test]
    fn test_length_limits() {
        assert_eq!(
            Username::parse("ab"),
            Err(UsernameError::TooShort { min: 3 })
        );
        assert_eq!(
            Username::parse(&"a".repeat(51)),
            Err(UsernameError::TooLong { max: 50 })
        );
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(
            Username::parse("bad name"),
            Err(UsernameError::InvalidCharacters)
        );
        assert_eq!(
            Username::parse("drop;table"),
            Err(UsernameError::InvalidCharacters)
        );
    }

    #[test]
    fn test_separator_boundaries() {
        assert_eq!(Username::parse("_admin"), Err(UsernameError::InvalidBoundary));
        assert_eq!(Username::parse("admin-"), Err(UsernameError::InvalidBoundary));
    }
}
