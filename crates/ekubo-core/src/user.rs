//! User records and authentication payloads.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A user as exposed in API responses. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A user row as stored, including the hashed password. Internal to the
/// auth flow; converted to [`User`] before anything leaves the server.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            username: record.username,
            created_at: record.created_at,
        }
    }
}

/// Payload for `/auth/signup`.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), String> {
        if !self.email.contains('@') {
            return Err("email must be a valid address".into());
        }
        if self.username.len() < 3 || self.username.len() > 50 {
            return Err("username must be 3-50 characters".into());
        }
        if self.password.len() < 8 || self.password.len() > 100 {
            return Err("password must be 8-100 characters".into());
        }
        Ok(())
    }
}

/// Payload for `/auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_response_never_serializes_the_password() {
        let record: UserRecord = serde_json::from_value(json!({
            "id": 1,
            "email": "ana@example.com",
            "username": "ana",
            "password": "$argon2id$...",
            "created_at": "2024-04-01T12:00:00Z"
        }))
        .unwrap();

        let user: User = record.into();
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["username"], "ana");
    }

    #[test]
    fn signup_validation() {
        let mut req = SignupRequest {
            email: "ana@example.com".into(),
            username: "ana".into(),
            password: "secret-password".into(),
        };
        assert!(req.validate().is_ok());

        req.email = "not-an-email".into();
        assert!(req.validate().is_err());

        req.email = "ana@example.com".into();
        req.password = "short".into();
        assert!(req.validate().is_err());

        req.password = "x".repeat(101);
        assert!(req.validate().is_err());

        req.password = "long-enough".into();
        req.username = "ab".into();
        assert!(req.validate().is_err());
    }
}
