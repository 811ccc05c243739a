use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Claims carried by an application-scoped access token.
///
/// Binds a user identity to the application the token was issued for.
/// Timestamps are Unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User identifier
    pub uid: i64,

    /// User email as stored at registration
    pub email: String,

    /// Application the token is scoped to
    pub app_id: i32,

    /// Expiration time
    pub exp: i64,

    /// Issued at
    pub iat: i64,
}

impl Claims {
    /// Create claims for a user logging into an application.
    ///
    /// # Arguments
    /// * `uid` - User identifier
    /// * `email` - User email
    /// * `app_id` - Application identifier
    /// * `ttl` - Time until the token expires, counted from now
    ///
    /// # Returns
    /// Claims with `iat` set to now and `exp` set to now + `ttl`
    ///
    /// # Errors
    /// * `ExpirationOutOfRange` - now + `ttl` is not a representable date
    pub fn for_user(
        uid: i64,
        email: impl Into<String>,
        app_id: i32,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(ttl)
            .ok_or(JwtError::ExpirationOutOfRange)?;

        Ok(Self {
            uid,
            email: email.into(),
            app_id,
            exp: expiration.timestamp(),
            iat: now.timestamp(),
        })
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_user() {
        let claims = Claims::for_user(7, "alice@example.com", 3, Duration::hours(24)).unwrap();

        assert_eq!(claims.uid, 7);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.app_id, 3);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_for_user_expiry_is_relative_to_now() {
        let before = Utc::now().timestamp();
        let claims = Claims::for_user(1, "bob@example.com", 1, Duration::minutes(30)).unwrap();
        let after = Utc::now().timestamp();

        assert!(claims.exp >= before + 30 * 60);
        assert!(claims.exp <= after + 30 * 60);
    }

    #[test]
    fn test_for_user_rejects_unrepresentable_expiration() {
        let result = Claims::for_user(
            1,
            "bob@example.com",
            1,
            Duration::seconds(10_000_000_000_000),
        );

        assert_eq!(result, Err(JwtError::ExpirationOutOfRange));
    }

    #[test]
    fn test_is_expired() {
        let mut claims = Claims::for_user(1, "bob@example.com", 1, Duration::zero()).unwrap();
        claims.exp = 1000;

        assert!(!claims.is_expired(999)); // Not expired
        assert!(!claims.is_expired(1000)); // Exactly at expiration
        assert!(claims.is_expired(1001)); // Expired
    }
}
