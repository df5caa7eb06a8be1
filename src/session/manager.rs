use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::auth::endpoints::AuthEndpoints;
use crate::cache::token_cache::{TokenCache, SESSION_TOKEN_KEY};
use crate::error::Error;
use crate::token::decode::decode;
use crate::token::payload::TokenPayload;

/// Session token lifecycle: acquisition, refresh decision, scheduled
/// refresh and sign-out.
///
/// At most one refresh timer is armed per manager; arming again cancels the
/// previous one. Cloning shares the cache, the endpoints and the timer slot.
#[derive(Debug, Clone)]
pub struct SessionManager {
    endpoints: AuthEndpoints,
    cache: TokenCache,
    refresh_task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl SessionManager {
    pub fn new(endpoints: AuthEndpoints, cache: TokenCache) -> Self {
        Self {
            endpoints,
            cache,
            refresh_task: Arc::new(Mutex::new(None)),
        }
    }

    /// Exchange an access token for a session token, cache it and return
    /// the token together with its decoded payload.
    pub async fn sign_in(&self, access_token: &str) -> Result<(String, TokenPayload), Error> {
        let token = self.endpoints.issue(access_token).await?;
        let payload = decode(&token)?;
        self.cache.set(SESSION_TOKEN_KEY, &token).await;
        debug!(expires_at = payload.exp, "session token cached");
        Ok((token, payload))
    }

    /// Refresh decision and call.
    ///
    /// While the payload's expiry is in the future and the cache slot is
    /// populated, the pair is returned unchanged without touching the
    /// network. Otherwise the refresh route is called and the new pair is
    /// decoded and recached. A failed refresh evicts the cached token and
    /// propagates the error.
    pub async fn refresh(
        &self,
        token: &str,
        payload: &TokenPayload,
    ) -> Result<(String, TokenPayload), Error> {
        if !payload.is_expired() && self.cache.get(SESSION_TOKEN_KEY).await.is_some() {
            debug!(
                expires_in_ms = payload.expires_in_ms(),
                "session token still valid, refresh skipped"
            );
            return Ok((token.to_owned(), payload.clone()));
        }

        let refreshed = self.call_refresh(token).await;
        match refreshed {
            Ok((new_token, new_payload)) => {
                self.cache.set(SESSION_TOKEN_KEY, &new_token).await;
                info!(expires_at = new_payload.exp, "session token refreshed");
                Ok((new_token, new_payload))
            }
            Err(err) => {
                self.cache.set(SESSION_TOKEN_KEY, "").await;
                Err(err)
            }
        }
    }

    async fn call_refresh(&self, token: &str) -> Result<(String, TokenPayload), Error> {
        let new_token = self.endpoints.refresh(token).await?;
        let new_payload = decode(&new_token)?;
        Ok((new_token, new_payload))
    }

    /// Arm the refresh loop for the given token/payload pair.
    ///
    /// The loop sleeps until the payload's expiry, then runs the refresh
    /// decision: a pair that is still valid re-arms unchanged, a refreshed
    /// pair re-arms with its new expiry, and a failure stops the loop so a
    /// persistent auth problem is not masked by silent retries. A pending
    /// timer from an earlier call is cancelled before the new one is armed.
    pub async fn schedule_refresh(&self, token: String, payload: TokenPayload) {
        let manager = self.clone();
        let mut guard = self.refresh_task.lock().await;
        if let Some(previous) = guard.take() {
            debug!("pending refresh timer cancelled");
            previous.abort();
        }
        *guard = Some(tokio::spawn(async move {
            let mut token = token;
            let mut payload = payload;
            loop {
                let wait_ms = payload.expires_in_ms().max(0) as u64;
                info!(expires_at = payload.exp, wait_ms, "session refresh armed");
                sleep(Duration::from_millis(wait_ms)).await;

                match manager.refresh(&token, &payload).await {
                    Ok((new_token, new_payload)) => {
                        token = new_token;
                        payload = new_payload;
                    }
                    Err(err) => {
                        error!(error = %err, "session refresh failed, refresh loop stopped");
                        break;
                    }
                }
            }
        }));
    }

    /// Cancel any pending refresh timer, clear the cache and, when a token
    /// was cached, expire it server-side. Safe to call with nothing cached.
    ///
    /// The timer is disarmed before the cache is touched; an in-flight
    /// refresh cannot repopulate the slot after the clear.
    pub async fn sign_out(&self) -> Result<Option<Value>, Error> {
        self.disarm().await;
        let token = self.cache.get(SESSION_TOKEN_KEY).await;
        self.cache.clear().await;

        match token {
            Some(token) => {
                info!("expiring session token server-side");
                let body = self.endpoints.expire(&token).await?;
                Ok(Some(body))
            }
            None => Ok(None),
        }
    }

    async fn disarm(&self) {
        if let Some(task) = self.refresh_task.lock().await.take() {
            task.abort();
            // wait until the task is actually gone, not merely flagged
            let _ = task.await;
        }
    }
}
