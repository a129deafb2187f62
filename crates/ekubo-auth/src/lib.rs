//! # ekubo-auth
//!
//! Credential handling for the Ekubo API: Argon2id password hashing for
//! stored user records and HS256 JWT issuance for logged-in sessions.
//!
//! The login handler deliberately collapses "no such user" and "wrong
//! password" into one outcome; nothing in this crate distinguishes them
//! either.

mod error;
pub mod password;
mod token;

pub use error::AuthError;
pub use token::{Claims, TokenService};
