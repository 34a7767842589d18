use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Created by registration and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password in transit from the request to the hasher.
///
/// Never printed: `Debug` is redacted and there is no `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub const MIN_LENGTH: usize = 6;

    /// Password chosen at registration; must meet the minimum length.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 6 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(Self(password))
    }

    /// Password presented at login; only presence is checked so that the
    /// length rule never tells a caller anything about stored accounts.
    ///
    /// # Errors
    /// * `Empty` - Password is empty
    pub fn candidate(password: String) -> Result<Self, PasswordPolicyError> {
        if password.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Command to register a new user with validated fields
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub email: EmailAddress,
    pub password: Password,
}

impl RegisterUserCommand {
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(email: EmailAddress, password: Password) -> Self {
        Self { email, password }
    }
}

/// Credentials presented at login
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: Password,
}

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_accepts_valid_address() {
        let email = EmailAddress::new("a@x.com".to_string()).unwrap();
        assert_eq!(email.as_str(), "a@x.com");
    }

    #[test]
    fn test_email_rejects_malformed_address() {
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
        assert!(EmailAddress::new("".to_string()).is_err());
    }

    #[test]
    fn test_password_minimum_length() {
        assert!(Password::new("secret".to_string()).is_ok());
        assert_eq!(
            Password::new("12345".to_string()).unwrap_err(),
            PasswordPolicyError::TooShort { min: 6, actual: 5 }
        );
    }

    #[test]
    fn test_password_length_counts_characters() {
        // six characters, twelve bytes
        assert!(Password::new("ÿÿÿÿÿÿ".to_string()).is_ok());
        assert!(Password::new("ÿÿÿÿÿ".to_string()).is_err());
    }

    #[test]
    fn test_candidate_password_only_requires_presence() {
        assert!(Password::candidate("x".to_string()).is_ok());
        assert_eq!(
            Password::candidate(String::new()).unwrap_err(),
            PasswordPolicyError::Empty
        );
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("hunter22".to_string()).unwrap();
        assert!(!format!("{:?}", password).contains("hunter22"));
    }

    #[test]
    fn test_user_id_round_trip_through_string() {
        let id = UserId::new();
        assert_eq!(UserId::from_string(&id.to_string()).unwrap(), id);
        assert!(UserId::from_string("nope").is_err());
    }
}
