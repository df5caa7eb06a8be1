use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::cache::token_cache::{TokenCache, SESSION_TOKEN_KEY};
use crate::error::Error;

const GRAPHQL_PATH: &str = "/api/graphql-engine/v1/graphql";

/// Authorized GraphQL query client.
///
/// Reads the session token from the cache on every call and never triggers
/// a refresh itself; the refresh loop is expected to keep the slot current.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    url: String,
    cache: TokenCache,
    http: Client,
}

impl GraphqlClient {
    pub fn new(base_url: &str, cache: TokenCache, http: Client) -> Self {
        Self {
            url: format!("{base_url}{GRAPHQL_PATH}"),
            cache,
            http,
        }
    }

    /// POST the query/variables pair and return the parsed response body.
    ///
    /// A response carrying a non-empty `errors` list fails with
    /// [`Error::Query`] holding every error message. An empty cache slot
    /// still issues the request, with an empty bearer credential.
    pub async fn run(&self, query: &str, variables: Option<Value>) -> Result<Value, Error> {
        let token = self.cache.get(SESSION_TOKEN_KEY).await.unwrap_or_default();
        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;

        if let Some(errors) = body.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                let messages = errors
                    .iter()
                    .map(|e| {
                        e.get("message")
                            .and_then(Value::as_str)
                            .unwrap_or("unknown error")
                            .to_owned()
                    })
                    .collect();
                return Err(Error::Query { messages });
            }
        }
        if !status.is_success() {
            return Err(Error::Query {
                messages: vec![format!("graphql endpoint returned {status}")],
            });
        }

        debug!(%status, "graphql query completed");
        Ok(body)
    }
}
