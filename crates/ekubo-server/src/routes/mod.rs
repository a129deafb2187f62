//! Route handlers, one module per resource.
//!
//! Every handler follows the same shape: validate the input, call the
//! record store gateway one or more times (related records are joined by
//! explicit sequential lookups, never inside the gateway), and map the
//! result into a response or an [`ApiError`].

use axum::Json;
use ekubo_api::ApiError;
use ekubo_search::SearchError;
use ekubo_store::StoreError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

pub mod auth;
pub mod library;
pub mod lyrics;
pub mod matched;
pub mod progress;
pub mod songs;

pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "ekubo-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn healthz() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// Pagination query parameters shared by the listing endpoints.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

pub(crate) fn default_limit() -> i64 {
    100
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

impl Pagination {
    /// Range checks are a handler contract, not a gateway one.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.skip < 0 {
            return Err(ApiError::bad_request("skip must be >= 0"));
        }
        if !(1..=1000).contains(&self.limit) {
            return Err(ApiError::bad_request("limit must be between 1 and 1000"));
        }
        Ok(())
    }
}

/// Maps a gateway failure at the handler boundary.
///
/// Store failures are never surfaced raw: handlers check existence before
/// writes, so a store-level not-found here means the record vanished
/// between calls, still reported as 404.
pub(crate) fn map_store(err: StoreError) -> ApiError {
    if err.is_not_found() {
        ApiError::not_found(err.to_string())
    } else {
        ApiError::internal(err.to_string())
    }
}

/// Maps a search integration failure: empty catalog results become 404,
/// upstream failures keep the upstream's own status.
pub(crate) fn map_search(err: SearchError) -> ApiError {
    match err {
        SearchError::NotFound => ApiError::not_found("Song not found"),
        SearchError::Upstream { status, message } => ApiError::upstream(status, message),
        other => ApiError::internal(other.to_string()),
    }
}

/// Decodes one store row into a typed model.
pub(crate) fn decode<T: DeserializeOwned>(row: Value) -> Result<T, ApiError> {
    serde_json::from_value(row).map_err(|e| ApiError::internal(format!("invalid store row: {e}")))
}

/// Decodes a row array, preserving order.
pub(crate) fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, ApiError> {
    rows.into_iter().map(decode).collect()
}

/// Serializes a payload for the store.
pub(crate) fn to_fields<T: serde::Serialize>(payload: &T) -> Result<Value, ApiError> {
    serde_json::to_value(payload).map_err(|e| ApiError::internal(format!("invalid payload: {e}")))
}
