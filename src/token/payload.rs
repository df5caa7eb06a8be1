use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::helpers::time::now_millis;

/// Decoded payload segment of a session token.
///
/// Only `exp` drives the lifecycle; everything else is carried as opaque
/// claims for the host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// Expiry instant, seconds since epoch.
    pub exp: i64,
    /// Issued-at instant, seconds since epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Subject id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Remaining claims, kept as-is (roles, user id, token id, ...).
    #[serde(flatten)]
    pub claims: Map<String, Value>,
}

impl TokenPayload {
    /// Milliseconds until expiry; negative when already expired.
    /// Saturates instead of overflowing on out-of-range `exp` claims.
    pub fn expires_in_ms(&self) -> i64 {
        self.exp.saturating_mul(1000).saturating_sub(now_millis())
    }

    pub fn is_expired(&self) -> bool {
        self.expires_in_ms() <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::time::now_i64;

    fn payload_with_exp(exp: i64) -> TokenPayload {
        TokenPayload {
            exp,
            iat: None,
            sub: None,
            claims: Map::new(),
        }
    }

    #[test]
    fn future_exp_is_not_expired() {
        let payload = payload_with_exp(now_i64() + 3600);
        assert!(payload.expires_in_ms() > 0);
        assert!(!payload.is_expired());
    }

    #[test]
    fn out_of_range_exp_saturates_instead_of_overflowing() {
        let far_future = payload_with_exp(i64::MAX);
        assert!(far_future.expires_in_ms() > 0);
        assert!(!far_future.is_expired());

        let far_past = payload_with_exp(i64::MIN);
        assert!(far_past.is_expired());
    }

    #[test]
    fn past_exp_is_expired() {
        let payload = payload_with_exp(now_i64() - 10);
        assert!(payload.expires_in_ms() < 0);
        assert!(payload.is_expired());
    }
}
