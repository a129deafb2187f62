//! Spotify catalog search: client-credentials token exchange followed by an
//! authenticated track query.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::SearchError;

const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Client for the music catalog search.
///
/// Every search performs the full two-step flow; the short-lived bearer
/// token is not kept between calls.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    token_url: String,
    api_url: String,
    client_id: String,
    client_secret: String,
    client: reqwest::Client,
}

impl CatalogClient {
    /// Creates a client with the production Spotify endpoints.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self::with_endpoints(client_id, client_secret, DEFAULT_TOKEN_URL, DEFAULT_API_URL)
    }

    /// Creates a client against custom endpoints (test servers).
    pub fn with_endpoints(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        token_url: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Self {
        Self {
            token_url: token_url.into(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Searches the catalog for tracks matching a quoted track/artist pair.
    ///
    /// Zero matches is [`SearchError::NotFound`], distinct from an upstream
    /// failure. At most `limit` tracks are returned, as raw catalog objects.
    pub async fn search_tracks(
        &self,
        track_name: &str,
        artist_name: &str,
        limit: u32,
    ) -> Result<Vec<Value>, SearchError> {
        let access_token = self.fetch_access_token().await?;

        debug!(track_name, artist_name, limit, "catalog search");
        let query = format!("track:\"{track_name}\" artist:\"{artist_name}\"");
        let response = self
            .client
            .get(format!("{}/search", self.api_url))
            .bearer_auth(access_token)
            .query(&[
                ("q", query.as_str()),
                ("type", "track"),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::upstream(
                status.as_u16(),
                "Failed to search Spotify for the song.",
            ));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::decode(format!("invalid JSON from catalog: {e}")))?;

        let tracks = body
            .pointer("/tracks/items")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        if tracks.is_empty() {
            return Err(SearchError::NotFound);
        }
        Ok(tracks)
    }

    /// Exchanges client credentials for a short-lived bearer token.
    async fn fetch_access_token(&self) -> Result<String, SearchError> {
        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::upstream(
                status.as_u16(),
                "Failed to get Spotify access token.",
            ));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SearchError::decode(format!("invalid token response: {e}")))?;
        Ok(token.access_token)
    }
}
