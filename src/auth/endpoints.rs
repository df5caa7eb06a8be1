use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::Error;

/// Header carrying the current session token on refresh and expire calls.
pub const JWT_HEADER: &str = "x-jwt-token";

/// Routes of the remote auth service, relative to the configured base URL.
const TOKEN_PATH: &str = "/api/auth/token";
const REFRESH_PATH: &str = "/api/auth/refresh";
const EXPIRE_PATH: &str = "/api/auth/expire";

/// Thin wrapper over the remote auth service routes.
///
/// Response bodies are JSON-encoded session token strings; statuses are
/// mapped to error kinds so callers can tell rejected credentials apart
/// from transport failures.
#[derive(Debug, Clone)]
pub struct AuthEndpoints {
    base_url: String,
    http: Client,
}

impl AuthEndpoints {
    pub fn new(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    /// Exchange a long-lived access token for a session token.
    pub async fn issue(&self, access_token: &str) -> Result<String, Error> {
        let url = format!("{}{}", self.base_url, TOKEN_PATH);
        let response = self
            .http
            .get(&url)
            .query(&[("token", access_token)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "token issuance rejected");
            return Err(Error::Auth { status });
        }
        debug!("session token issued");
        Ok(response.json().await?)
    }

    /// Trade the current session token for a fresh one.
    pub async fn refresh(&self, session_token: &str) -> Result<String, Error> {
        let url = format!("{}{}", self.base_url, REFRESH_PATH);
        let response = self
            .http
            .get(&url)
            .header(JWT_HEADER, session_token)
            .send()
            .await
            .map_err(Error::refresh_transport)?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "session refresh rejected");
            return Err(Error::refresh_rejected(status));
        }
        response.json().await.map_err(Error::refresh_transport)
    }

    /// Invalidate the session token server-side.
    pub async fn expire(&self, session_token: &str) -> Result<Value, Error> {
        let url = format!("{}{}", self.base_url, EXPIRE_PATH);
        let response = self
            .http
            .get(&url)
            .header(JWT_HEADER, session_token)
            .send()
            .await
            .map_err(Error::refresh_transport)?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "session expire rejected");
            return Err(Error::refresh_rejected(status));
        }
        // expire responses have no defined body
        Ok(response.json().await.unwrap_or_default())
    }
}
