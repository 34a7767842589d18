use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Payload of an identity assertion.
///
/// Binds a user identifier (`sub`) to the moment the token was issued. The
/// expiry is optional: without it a token stays valid for as long as the
/// signing secret does.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Create claims for a subject, issued now, without expiry.
    pub fn new(sub: impl ToString) -> Self {
        Self {
            sub: sub.to_string(),
            iat: Utc::now().timestamp(),
            exp: None,
        }
    }

    /// Create claims for an authenticated user.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `expiration_hours` - Token lifetime; `None` issues a token without `exp`
    ///
    /// # Returns
    /// Claims with sub and iat set, and exp when a lifetime is given
    pub fn for_user(user_id: impl ToString, expiration_hours: Option<i64>) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expiration_hours.map(|hours| (now + Duration::hours(hours)).timestamp()),
        }
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = iat;
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    pub fn subject(&self) -> &str {
        &self.sub
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims_have_no_expiry() {
        let claims = Claims::new("user123");
        assert_eq!(claims.subject(), "user123");
        assert!(claims.exp.is_none());
        assert!(claims.iat > 0);
    }

    #[test]
    fn test_for_user_with_lifetime() {
        let claims = Claims::for_user("user123", Some(24));

        assert_eq!(claims.sub, "user123");
        let exp = claims.exp.expect("exp should be set");
        assert_eq!(exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_for_user_without_lifetime() {
        let claims = Claims::for_user("user123", None);
        assert!(claims.exp.is_none());
    }

    #[test]
    fn test_exp_omitted_from_serialized_form() {
        let claims = Claims::new("user123").with_issued_at(1700000000);
        let json = serde_json::to_value(&claims).unwrap();

        assert_eq!(json, serde_json::json!({ "sub": "user123", "iat": 1700000000 }));
    }
}
