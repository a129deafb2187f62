//! # ekubo-search
//!
//! Outbound search integrations for the Ekubo API:
//!
//! - [`LyricsClient`] — free-text lyrics lookup against the LRCLIB API.
//! - [`CatalogClient`] — two-step Spotify track search (client-credentials
//!   token exchange, then an authenticated catalog query).
//!
//! Both clients are thin passthroughs: upstream failures carry the
//! upstream's own status, and nothing is retried or cached. In particular
//! the catalog client re-authenticates on every search; the access token is
//! intentionally not kept between requests.

mod catalog;
mod error;
mod lyrics;

pub use catalog::CatalogClient;
pub use error::SearchError;
pub use lyrics::LyricsClient;
