//! Error types for record store operations.

use thiserror::Error;

/// Errors that can occur while talking to the remote record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The targeted record does not exist.
    ///
    /// Only write paths report this: the store answers an update on a
    /// missing id with an empty representation, which the gateway surfaces
    /// here. Plain lookups return `Ok(None)` instead.
    #[error("Record not found: {table}/{id}")]
    NotFound {
        /// Table that was targeted.
        table: String,
        /// Id of the missing record.
        id: i64,
    },

    /// The store answered with an HTTP error status.
    ///
    /// The raw error body is carried verbatim; the gateway does not try to
    /// interpret it (duplicate key vs. constraint violation is a caller
    /// concern).
    #[error("Store operation failed with status {status}: {body}")]
    Upstream {
        /// HTTP status code returned by the store.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The request never completed (connect failure, timeout, ...).
    #[error("Store transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered 2xx but the body was not the expected JSON shape.
    #[error("Invalid store response: {message}")]
    Decode {
        /// Description of the malformed payload.
        message: String,
    },
}

impl StoreError {
    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(table: impl Into<String>, id: i64) -> Self {
        Self::NotFound {
            table: table.into(),
            id,
        }
    }

    /// Creates a new `Upstream` error.
    #[must_use]
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }

    /// Creates a new `Decode` error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the HTTP status reported by the store, if any.
    #[must_use]
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::not_found("songs", 7);
        assert_eq!(err.to_string(), "Record not found: songs/7");

        let err = StoreError::upstream(409, "duplicate key");
        assert_eq!(
            err.to_string(),
            "Store operation failed with status 409: duplicate key"
        );
    }

    #[test]
    fn error_predicates() {
        assert!(StoreError::not_found("songs", 1).is_not_found());
        assert!(!StoreError::upstream(500, "boom").is_not_found());
        assert_eq!(StoreError::upstream(502, "bad").upstream_status(), Some(502));
        assert_eq!(StoreError::not_found("songs", 1).upstream_status(), None);
    }
}
