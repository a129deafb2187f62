//! Free-text lyrics lookup against the LRCLIB API.

use serde_json::Value;
use tracing::debug;

use crate::SearchError;

const DEFAULT_BASE_URL: &str = "https://lrclib.net/api";

/// Client for the LRCLIB lyrics database.
#[derive(Debug, Clone)]
pub struct LyricsClient {
    base_url: String,
    client: reqwest::Client,
}

impl Default for LyricsClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl LyricsClient {
    /// Creates a client against the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Searches lyrics by a free-text query matching any field (artist,
    /// track name, ...). The upstream result is passed through untouched;
    /// a non-2xx answer carries the upstream status.
    pub async fn search(&self, query: &str) -> Result<Value, SearchError> {
        debug!(query, "lyrics search");
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("q", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::upstream(
                status.as_u16(),
                "Failed to fetch data from LRCLIB.",
            ));
        }

        response
            .json()
            .await
            .map_err(|e| SearchError::decode(format!("invalid JSON from LRCLIB: {e}")))
    }
}
