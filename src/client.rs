use std::time::Duration;

use serde_json::Value;

use crate::auth::endpoints::AuthEndpoints;
use crate::cache::token_cache::TokenCache;
use crate::error::Error;
use crate::graphql::client::GraphqlClient;
use crate::session::manager::SessionManager;

/// Bound on every call to the auth and GraphQL services; a hung refresh
/// call surfaces as an error instead of stalling the refresh loop.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection parameters for [`Client::create`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub domain: String,
    pub access_token: String,
}

impl ClientOptions {
    pub fn new(domain: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            access_token: access_token.into(),
        }
    }

    /// A bare domain is addressed over HTTPS; a value carrying an explicit
    /// scheme is used as-is (self-hosted dev instances, mock servers).
    fn base_url(&self) -> String {
        if self.domain.contains("://") {
            self.domain.trim_end_matches('/').to_owned()
        } else {
            format!("https://{}", self.domain)
        }
    }
}

/// Handle to an authorized session: query runner, sign-out and the token
/// cache backing both.
#[derive(Debug, Clone)]
pub struct Client {
    cache: TokenCache,
    session: SessionManager,
    graphql: GraphqlClient,
}

impl Client {
    /// Sign in with the given access token and arm the background refresh
    /// loop. Fails when the auth service rejects the access token or the
    /// issued token cannot be decoded.
    pub async fn create(options: ClientOptions) -> Result<Client, Error> {
        let http = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;
        let base_url = options.base_url();

        let cache = TokenCache::new();
        let endpoints = AuthEndpoints::new(&base_url, http.clone());
        let session = SessionManager::new(endpoints, cache.clone());

        let (token, payload) = session.sign_in(&options.access_token).await?;
        session.schedule_refresh(token, payload).await;

        let graphql = GraphqlClient::new(&base_url, cache.clone(), http);
        Ok(Client {
            cache,
            session,
            graphql,
        })
    }

    /// Run an authorized GraphQL query; see [`GraphqlClient::run`].
    pub async fn run(&self, query: &str, variables: Option<Value>) -> Result<Value, Error> {
        self.graphql.run(query, variables).await
    }

    /// Invalidate the session: clears the cache, cancels the refresh loop
    /// and expires the token server-side. Returns the expire route's
    /// response body, or `None` when no token was cached.
    pub async fn sign_out(&self) -> Result<Option<Value>, Error> {
        self.session.sign_out().await
    }

    pub fn cache(&self) -> &TokenCache {
        &self.cache
    }
}
