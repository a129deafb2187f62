//! Session token issuance and verification.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::AuthError;

/// Claims embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub id: i64,
    pub email: String,
    pub username: String,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

/// Issues and verifies HS256 session tokens.
///
/// One instance is built from configuration at startup and shared through
/// the application state.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    expiration: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the signing secret.
        f.debug_struct("TokenService")
            .field("expiration", &self.expiration)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Creates a service signing with `secret`, issuing tokens valid for
    /// `expiration_hours`.
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration: Duration::hours(expiration_hours),
        }
    }

    /// Issues a token for the given user identity.
    pub fn issue(&self, id: i64, email: &str, username: &str) -> Result<String, AuthError> {
        let claims = Claims {
            id,
            email: email.to_string(),
            username: username.to_string(),
            exp: (OffsetDateTime::now_utc() + self.expiration).unix_timestamp(),
        };
        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?)
    }

    /// Decodes and validates a token, returning its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret", 24)
    }

    #[test]
    fn issued_token_round_trips_claims() {
        let token = service().issue(7, "ana@example.com", "ana").unwrap();
        let claims = service().verify(&token).unwrap();
        assert_eq!(claims.id, 7);
        assert_eq!(claims.email, "ana@example.com");
        assert_eq!(claims.username, "ana");
        assert!(claims.exp > OffsetDateTime::now_utc().unix_timestamp());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = TokenService::new("other-secret", 24)
            .issue(7, "ana@example.com", "ana")
            .unwrap();
        let err = service().verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken { .. }));
    }

    #[test]
    fn expired_token_is_rejected() {
        // Negative validity puts exp in the past, beyond the default leeway.
        let token = TokenService::new("test-secret", -1)
            .issue(7, "ana@example.com", "ana")
            .unwrap();
        let err = service().verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::Expired));
    }

    #[test]
    fn debug_does_not_leak_the_secret() {
        let rendered = format!("{:?}", service());
        assert!(!rendered.contains("test-secret"));
    }
}
