use thiserror::Error;

/// Errors from credential handling.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Hashing failed or a stored hash is not valid PHC format.
    #[error("Password hashing error: {message}")]
    Hashing {
        /// Description of the hashing failure.
        message: String,
    },

    /// The token has expired.
    #[error("Token expired")]
    Expired,

    /// The token could not be encoded or decoded.
    #[error("Invalid token: {message}")]
    InvalidToken {
        /// Description of the token failure.
        message: String,
    },
}

impl AuthError {
    /// Creates a new `Hashing` error.
    #[must_use]
    pub fn hashing(message: impl Into<String>) -> Self {
        Self::Hashing {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidToken` error.
    #[must_use]
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(err: argon2::password_hash::Error) -> Self {
        Self::hashing(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::invalid_token(err.to_string()),
        }
    }
}
