use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use httpmock::MockServer;
use reqwest::Client;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use crate::auth::endpoints::AuthEndpoints;
use crate::cache::token_cache::TokenCache;
use crate::session::manager::SessionManager;

pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .try_init();
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

/// Minimal unsigned session token carrying the given payload.
pub fn sample_jwt_with(payload: Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"typ":"JWT","alg":"none"}"#);
    let payload = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{payload}.sig")
}

/// Session token expiring at the given unix second, with platform-shaped claims.
pub fn sample_jwt(exp: i64) -> String {
    sample_jwt_with(json!({
        "sub": "674",
        "iat": exp - 3600,
        "exp": exp,
        "https://hasura.io/jwt/claims": {
            "x-hasura-allowed-roles": ["user", "admin"],
            "x-hasura-default-role": "admin",
            "x-hasura-user-id": "674",
        },
    }))
}

/// Session manager wired to a mock auth service, sharing a fresh cache.
pub fn mock_manager(server: &MockServer) -> (SessionManager, TokenCache) {
    let cache = TokenCache::new();
    let endpoints = AuthEndpoints::new(server.base_url(), build_reqwest_client());
    (SessionManager::new(endpoints, cache.clone()), cache)
}
