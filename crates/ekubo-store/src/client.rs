//! The record store client.

use reqwest::{Method, StatusCode, header};
use serde_json::Value;
use tracing::debug;

use crate::error::StoreError;

/// Equality filters applied to a query, one `field=eq.value` pair each.
pub type Filters<'a> = &'a [(String, String)];

/// Client for the remote row store's REST interface.
///
/// One instance is constructed at startup and cloned into every handler;
/// cloning is cheap because the underlying `reqwest::Client` is an `Arc`.
#[derive(Debug, Clone)]
pub struct RecordStore {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl RecordStore {
    /// Creates a gateway for the store at `base_url` authenticated by `api_key`.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Looks up a single record by id.
    ///
    /// Returns `Ok(None)` when no record matches; absence is never an error.
    pub async fn get(&self, table: &str, id: i64) -> Result<Option<Value>, StoreError> {
        let params = vec![("id".to_string(), format!("eq.{id}"))];
        let rows = self.fetch_rows(table, &params).await?;
        Ok(rows.into_iter().next())
    }

    /// Lists records ordered by id ascending.
    ///
    /// `skip` records are skipped and at most `limit` returned. Optional
    /// equality filters narrow the result; range enforcement on `skip` and
    /// `limit` is the caller's contract, the gateway forwards them as given.
    pub async fn list(
        &self,
        table: &str,
        skip: i64,
        limit: i64,
        filters: Option<Filters<'_>>,
    ) -> Result<Vec<Value>, StoreError> {
        let params = paged_params(skip, limit, filters.unwrap_or(&[]));
        self.fetch_rows(table, &params).await
    }

    /// Searches records by equality filters, ordered by id ascending.
    ///
    /// Same wire shape as [`RecordStore::list`]; kept as a distinct operation
    /// because call sites use it for ad hoc multi-field lookups rather than
    /// the primary listing path.
    pub async fn search(
        &self,
        table: &str,
        filters: Filters<'_>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Value>, StoreError> {
        let params = paged_params(skip, limit, filters);
        self.fetch_rows(table, &params).await
    }

    /// Inserts a record and returns the store's representation of it,
    /// including the server-assigned id and created_at.
    pub async fn create(&self, table: &str, fields: &Value) -> Result<Value, StoreError> {
        let rows = self
            .request_rows(Method::POST, table, &[], Some(fields))
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::decode("store returned no representation for create"))
    }

    /// Replaces the mutable fields of the record identified by `id`.
    ///
    /// The store signals a missing target by returning an empty
    /// representation, surfaced as [`StoreError::NotFound`].
    pub async fn update(&self, table: &str, id: i64, fields: &Value) -> Result<Value, StoreError> {
        let params = vec![("id".to_string(), format!("eq.{id}"))];
        let rows = self
            .request_rows(Method::PATCH, table, &params, Some(fields))
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::not_found(table, id))
    }

    /// Hard-deletes the record identified by `id`.
    pub async fn delete(&self, table: &str, id: i64) -> Result<bool, StoreError> {
        let params = vec![("id".to_string(), format!("eq.{id}"))];
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        let response = self
            .client
            .request(Method::DELETE, &url)
            .query(&params)
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .header("Prefer", "return=representation")
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::upstream(status.as_u16(), body));
        }
        Ok(true)
    }

    async fn fetch_rows(
        &self,
        table: &str,
        params: &[(String, String)],
    ) -> Result<Vec<Value>, StoreError> {
        self.request_rows(Method::GET, table, params, None).await
    }

    /// Issues one request and decodes the row array the store answers with.
    async fn request_rows(
        &self,
        method: Method,
        table: &str,
        params: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Vec<Value>, StoreError> {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        debug!(%method, table, params = params.len(), "store request");

        let mut request = self
            .client
            .request(method, &url)
            .query(params)
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .header("Prefer", "return=representation");

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.as_u16() >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::upstream(status.as_u16(), body));
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }

        let text = response.text().await?;
        if text.is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(rows)) => Ok(rows),
            Ok(other) => Ok(vec![other]),
            Err(e) => Err(StoreError::decode(format!("invalid JSON from store: {e}"))),
        }
    }
}

/// Builds the query parameter list for an ordered, paginated read.
///
/// Ordering is always id ascending; each filter is encoded with the store's
/// equality operator. This fixed encoding is what lets every resource
/// handler share one gateway.
fn paged_params(skip: i64, limit: i64, filters: Filters<'_>) -> Vec<(String, String)> {
    let mut params = vec![
        ("order".to_string(), "id".to_string()),
        ("offset".to_string(), skip.to_string()),
        ("limit".to_string(), limit.to_string()),
    ];
    for (field, value) in filters {
        params.push((field.clone(), format!("eq.{value}")));
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paged_params_encode_order_and_pagination() {
        let params = paged_params(10, 50, &[]);
        assert_eq!(
            params,
            vec![
                ("order".to_string(), "id".to_string()),
                ("offset".to_string(), "10".to_string()),
                ("limit".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    fn paged_params_encode_equality_filters() {
        let filters = vec![
            ("title".to_string(), "Yesterday".to_string()),
            ("artist".to_string(), "The Beatles".to_string()),
        ];
        let params = paged_params(0, 100, &filters);
        assert!(params.contains(&("title".to_string(), "eq.Yesterday".to_string())));
        assert!(params.contains(&("artist".to_string(), "eq.The Beatles".to_string())));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let store = RecordStore::new("https://db.example.com/", "key");
        assert_eq!(store.base_url, "https://db.example.com");
    }
}
