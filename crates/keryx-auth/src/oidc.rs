//! Ambient OIDC context for CI-issued identity tokens.
//!
//! GitHub Actions exposes a per-job endpoint for minting OIDC tokens via
//! the `ACTIONS_ID_TOKEN_REQUEST_URL` / `ACTIONS_ID_TOKEN_REQUEST_TOKEN`
//! environment variables (the workflow must grant `id-token: write`).

use std::time::Duration;

use serde::Deserialize;

use crate::error::AuthError;

/// Environment variable carrying the token mint endpoint.
pub const OIDC_REQUEST_URL_VAR: &str = "ACTIONS_ID_TOKEN_REQUEST_URL";

/// Environment variable carrying the bearer token for the mint endpoint.
pub const OIDC_REQUEST_TOKEN_VAR: &str = "ACTIONS_ID_TOKEN_REQUEST_TOKEN";

#[derive(Debug, Deserialize)]
struct IdTokenResponse {
    value: String,
}

/// The ambient CI context used to mint OIDC identity tokens.
#[derive(Debug, Clone)]
pub struct OidcContext {
    request_url: String,
    request_token: String,
}

impl OidcContext {
    /// Creates a context from explicit endpoint values.
    #[must_use]
    pub fn new(request_url: impl Into<String>, request_token: impl Into<String>) -> Self {
        Self {
            request_url: request_url.into(),
            request_token: request_token.into(),
        }
    }

    /// Reads the context from the CI environment, if present.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let request_url = std::env::var(OIDC_REQUEST_URL_VAR).ok()?;
        let request_token = std::env::var(OIDC_REQUEST_TOKEN_VAR).ok()?;
        if request_url.is_empty() || request_token.is_empty() {
            return None;
        }
        Some(Self::new(request_url, request_token))
    }

    /// Mints an identity token scoped to `audience`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::ChallengeFailed`] if the mint endpoint cannot
    /// be reached within `timeout` or answers with anything but a token.
    pub async fn mint(&self, audience: &str, timeout: Duration) -> Result<String, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::ChallengeFailed {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        let response = http
            .get(&self.request_url)
            .query(&[("audience", audience)])
            .bearer_auth(&self.request_token)
            .send()
            .await
            .map_err(|e| AuthError::ChallengeFailed {
                reason: format!("OIDC token mint failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::ChallengeFailed {
                reason: format!("OIDC token mint returned {status}"),
            });
        }

        let body: IdTokenResponse =
            response.json().await.map_err(|e| AuthError::ChallengeFailed {
                reason: format!("OIDC token mint returned an invalid body: {e}"),
            })?;

        if body.value.is_empty() {
            return Err(AuthError::ChallengeFailed {
                reason: "OIDC token mint returned an empty token".to_string(),
            });
        }

        tracing::debug!(audience, "Minted CI-issued OIDC token");
        Ok(body.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::extract::Query;
    use axum::http::HeaderMap;
    use axum::routing::get;
    use axum::{Json, Router};
    use std::collections::HashMap;

    async fn spawn(app: Router) -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        addr
    }

    async fn mint_endpoint(
        Query(params): Query<HashMap<String, String>>,
        headers: HeaderMap,
    ) -> Json<serde_json::Value> {
        assert_eq!(params.get("audience").map(String::as_str), Some("keryx-registry"));
        assert_eq!(
            headers.get("authorization").and_then(|v| v.to_str().ok()),
            Some("Bearer runner-token")
        );
        Json(serde_json::json!({"value": "signed-jwt"}))
    }

    #[tokio::test]
    async fn test_mint_returns_token_value() {
        let addr = spawn(Router::new().route("/token", get(mint_endpoint))).await;

        let context = OidcContext::new(format!("http://{addr}/token"), "runner-token");
        let token = context
            .mint("keryx-registry", Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(token, "signed-jwt");
    }

    #[tokio::test]
    async fn test_mint_unreachable_endpoint_fails_as_challenge() {
        let context = OidcContext::new("http://127.0.0.1:1/token", "runner-token");
        let err = context
            .mint("keryx-registry", Duration::from_millis(200))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::ChallengeFailed { .. }));
    }
}
