//! Credential input validation.
//!
//! Checks run before any storage access, so a rejected signup never touches
//! the credential store.

use std::fmt;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A caller-supplied field failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Name of the offending field ("username" or "password").
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validate signup credentials.
///
/// Username must be non-empty; password must be non-empty and at least
/// [`MIN_PASSWORD_LEN`] characters.
pub fn validate_credentials(username: &str, password: &str) -> Result<(), ValidationError> {
    if username.is_empty() {
        return Err(ValidationError::new("username", "username is required"));
    }
    if password.is_empty() {
        return Err(ValidationError::new("password", "password is required"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::new(
            "password",
            format!("password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_credentials() {
        assert!(validate_credentials("alice", "secret1").is_ok());
        assert!(validate_credentials("a", "sixsix").is_ok());
    }

    #[test]
    fn test_empty_username_names_field() {
        let err = validate_credentials("", "secret1").unwrap_err();
        assert_eq!(err.field, "username");
    }

    #[test]
    fn test_empty_password_names_field() {
        let err = validate_credentials("alice", "").unwrap_err();
        assert_eq!(err.field, "password");
    }

    #[test]
    fn test_short_password_rejected() {
        let err = validate_credentials("alice", "five5").unwrap_err();
        assert_eq!(err.field, "password");
        assert!(err.message.contains("6"));
    }

    #[test]
    fn test_username_checked_before_password() {
        let err = validate_credentials("", "").unwrap_err();
        assert_eq!(err.field, "username");
    }
}
