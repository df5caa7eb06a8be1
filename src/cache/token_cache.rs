use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

/// Cache slot holding the current session token.
pub const SESSION_TOKEN_KEY: &str = "session-token";

/// Key-value store for the session token, owned by a client instance.
///
/// The interface is generic but only the [`SESSION_TOKEN_KEY`] slot is used:
/// at most one session token exists at a time. Cloning shares the underlying
/// store, so the refresh loop and the query client see the same slot.
#[derive(Debug, Clone, Default)]
pub struct TokenCache {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Store a value, or remove the key when the value is empty.
    pub async fn set(&self, key: &str, value: &str) {
        let mut map = self.inner.write().await;
        if value.is_empty() {
            map.remove(key);
        } else {
            map.insert(key.to_owned(), value.to_owned());
        }
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Remove all entries.
    pub async fn clear(&self) {
        let mut map = self.inner.write().await;
        map.clear();
    }
}
