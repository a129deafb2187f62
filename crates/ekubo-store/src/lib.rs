//! # ekubo-store
//!
//! Record store gateway for the Ekubo API.
//!
//! The remote data store exposes a REST convention: one path segment per
//! table, equality filters as `field=eq.value` query parameters, pagination
//! via `offset`/`limit`, and JSON bodies on writes. [`RecordStore`] turns
//! generic CRUD and search intents into those requests so route handlers
//! never build raw HTTP themselves.
//!
//! The gateway is schema-agnostic: records are plain [`serde_json::Value`]
//! objects and table names are strings. It holds no cache and performs no
//! retries; every call is exactly one network round trip.
//!
//! ## Example
//!
//! ```ignore
//! use ekubo_store::RecordStore;
//!
//! let store = RecordStore::new("https://db.example.com", "service-key");
//! let song = store
//!     .get("songs", 42)
//!     .await?
//!     .ok_or_else(|| StoreError::not_found("songs", 42))?;
//! ```

mod client;
mod error;

pub use client::{Filters, RecordStore};
pub use error::StoreError;

/// Convenience result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
