use thiserror::Error;

/// Errors from the outbound search integrations.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The catalog search matched nothing. A distinct outcome, not a failure.
    #[error("Song not found")]
    NotFound,

    /// The upstream service answered with an error status.
    #[error("Upstream search failed with status {status}: {message}")]
    Upstream {
        /// Status code returned by the upstream service.
        status: u16,
        /// Short description of what failed.
        message: String,
    },

    /// The request never completed.
    #[error("Search transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream answered 2xx but the body was not the expected shape.
    #[error("Invalid search response: {message}")]
    Decode {
        /// Description of the malformed payload.
        message: String,
    },
}

impl SearchError {
    /// Creates a new `Upstream` error.
    #[must_use]
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Creates a new `Decode` error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Returns `true` if this is the empty-result outcome.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Returns the upstream status code, if any.
    #[must_use]
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}
