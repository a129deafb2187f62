//! # ekubo-server
//!
//! The Ekubo API server binary crate: configuration loading, tracing
//! setup, router assembly and all route handlers. Handlers are thin:
//! validate the request, call the record store gateway (joining related
//! records with explicit sequential lookups), shape the response.

pub mod config;
pub mod observability;
pub mod routes;
pub mod server;

pub use server::{AppState, EkuboServer, ServerBuilder, build_app};
