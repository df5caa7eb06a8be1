//! # Session Client Library
//!
//! Exchanges a long-lived access token for a short-lived JWT session token,
//! caches it, refreshes it in the background before it expires, and uses it
//! to authorize GraphQL queries.
//!
//! Modules:
//! - `cache` — single-slot session token cache
//! - `token` — payload decoding and expiry math
//! - `auth` — remote auth service routes (issue / refresh / expire)
//! - `session` — token lifecycle manager and refresh loop
//! - `graphql` — authorized query client

pub mod auth;
pub mod cache;
pub mod client;
pub mod error;
pub mod graphql;
pub mod helpers;
pub mod session;
pub mod token;

#[cfg(test)]
mod tests;

pub use crate::cache::token_cache::{TokenCache, SESSION_TOKEN_KEY};
pub use crate::client::{Client, ClientOptions};
pub use crate::error::Error;
pub use crate::token::decode::decode;
pub use crate::token::payload::TokenPayload;
