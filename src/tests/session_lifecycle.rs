#[cfg(test)]
mod test {
    use anyhow::Result;
    use httpmock::Method::GET;
    use httpmock::MockServer;
    use reqwest::StatusCode;
    use serde_json::json;

    use crate::cache::token_cache::SESSION_TOKEN_KEY;
    use crate::error::Error;
    use crate::helpers::time::now_i64;
    use crate::tests::common::{init_logging, mock_manager, sample_jwt};

    const CLAIMS: &str = "https://hasura.io/jwt/claims";

    #[tokio::test]
    async fn valid_access_token_populates_cache_and_returns_claims() -> Result<()> {
        init_logging();
        let server = MockServer::start_async().await;
        let jwt = sample_jwt(now_i64() + 3600);

        let issue = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/auth/token")
                    .query_param("token", "41e831f2d9e15d63e07a6a4e77cd6700961bf80e");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(json!(jwt));
            })
            .await;

        let (manager, cache) = mock_manager(&server);
        let (token, payload) = manager
            .sign_in("41e831f2d9e15d63e07a6a4e77cd6700961bf80e")
            .await?;

        issue.assert_async().await;
        assert_eq!(token, jwt);
        assert_eq!(cache.get(SESSION_TOKEN_KEY).await, Some(jwt));
        assert_eq!(
            payload.claims[CLAIMS]["x-hasura-default-role"],
            json!("admin")
        );
        assert_eq!(payload.claims[CLAIMS]["x-hasura-user-id"], json!("674"));
        Ok(())
    }

    #[tokio::test]
    async fn rejected_access_token_surfaces_the_remote_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/auth/token");
                then.status(401).body("Unauthorized");
            })
            .await;

        let (manager, cache) = mock_manager(&server);
        let err = manager.sign_in("bad-access-token").await.unwrap_err();

        match err {
            Error::Auth { status } => assert_eq!(status, StatusCode::UNAUTHORIZED),
            other => panic!("expected Auth error, got {other:?}"),
        }
        assert_eq!(cache.get(SESSION_TOKEN_KEY).await, None);
    }

    #[tokio::test]
    async fn undecodable_issued_token_fails_with_decode_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/auth/token");
                then.status(200).json_body(json!("not-a-jwt"));
            })
            .await;

        let (manager, _cache) = mock_manager(&server);
        let err = manager.sign_in("some-access-token").await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}
