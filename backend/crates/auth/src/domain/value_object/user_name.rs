//! User Name Value Object
//!
//! The login handle. Stored exactly as entered; uniqueness is exact-match.
//!
//! ## Invariants
//! - Length: 3 to 20 characters
//! - Characters: ASCII letters, digits and `_`

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const USER_NAME_MIN_LENGTH: usize = 3;

pub const USER_NAME_MAX_LENGTH: usize = 20;

/// Validated user name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Validate user input (surrounding whitespace is trimmed)
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let value = raw.as_ref().trim();
        let len = value.chars().count();

        if len < USER_NAME_MIN_LENGTH || len > USER_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Username must be {}-{} characters",
                USER_NAME_MIN_LENGTH, USER_NAME_MAX_LENGTH
            ))
            .with_action("Choose a different username"));
        }

        if let Some(bad) = value
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
        {
            return Err(AppError::bad_request(format!(
                "Username contains an invalid character: '{}'",
                bad
            ))
            .with_action("Use only letters, digits and underscores"));
        }

        Ok(Self(value.to_owned()))
    }

    /// Restore from storage without re-validation
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_names() {
        assert!(UserName::new("abc").is_ok());
        assert!(UserName::new("user_01").is_ok());
        assert!(UserName::new("A".repeat(20)).is_ok());
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(UserName::new("  alice ").unwrap().as_str(), "alice");
    }

    #[test]
    fn test_length_bounds() {
        assert!(UserName::new("ab").is_err());
        assert!(UserName::new("a".repeat(21)).is_err());
        assert!(UserName::new("").is_err());
    }

    #[test]
    fn test_invalid_characters() {
        let err = UserName::new("bad-name").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.message().contains('-'));

        assert!(UserName::new("user name").is_err());
        assert!(UserName::new("用户名字").is_err());
        assert!(UserName::new("me@home").is_err());
    }

    #[test]
    fn test_case_preserved() {
        assert_eq!(UserName::new("Alice_1").unwrap().as_str(), "Alice_1");
    }
}
