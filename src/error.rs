use reqwest::StatusCode;

/// Error kinds for the session lifecycle and query client.
///
/// Callers can branch on the variant to tell a rejected credential apart
/// from a transport failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The session token could not be decoded (structure, base64 or JSON).
    #[error("malformed session token: {0}")]
    Decode(String),

    /// The auth service rejected the access token during issuance.
    #[error("token issuance rejected by auth service ({status})")]
    Auth { status: StatusCode },

    /// A refresh or expire call was rejected by the auth service, or timed out.
    #[error("session refresh failed: {reason}")]
    Refresh {
        status: Option<StatusCode>,
        reason: String,
    },

    /// The GraphQL endpoint answered with an error list. All messages are
    /// kept; the display shows the first one.
    #[error("graphql query failed: {}", .messages.first().map(|m| m.as_str()).unwrap_or("unknown error"))]
    Query { messages: Vec<String> },

    /// Network or HTTP-layer failure from the transport.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

impl Error {
    pub(crate) fn refresh_rejected(status: StatusCode) -> Self {
        Error::Refresh {
            status: Some(status),
            reason: format!("auth service returned {status}"),
        }
    }

    pub(crate) fn refresh_transport(err: reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            "refresh call timed out".to_owned()
        } else {
            err.to_string()
        };
        Error::Refresh {
            status: err.status(),
            reason,
        }
    }
}
