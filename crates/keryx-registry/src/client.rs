//! HTTP client for the registry's client-facing API.

use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;

use keryx_core::{Credential, ServerManifest};

use crate::api::{ChallengeGrant, ChallengeRequest, PublishReceipt, TokenGrant, TokenRequest};
use crate::config::RegistryConfig;
use crate::error::RegistryError;

/// Client for the server registry.
#[derive(Debug)]
pub struct RegistryClient {
    config: RegistryConfig,
    http: reqwest::Client,
}

impl RegistryClient {
    /// Creates a new registry client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured URL is not an http(s) URL or the
    /// HTTP client cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use keryx_registry::{RegistryClient, RegistryConfig};
    ///
    /// let config = RegistryConfig::new("https://registry.example.com");
    /// let client = RegistryClient::new(config)?;
    /// # Ok::<(), keryx_registry::RegistryError>(())
    /// ```
    pub fn new(config: RegistryConfig) -> Result<Self, RegistryError> {
        match url::Url::parse(&config.url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            _ => {
                return Err(RegistryError::InvalidUrl {
                    url: config.url.clone(),
                })
            }
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|source| RegistryError::Client { source })?;

        Ok(Self { config, http })
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Requests a proof-of-control challenge for a domain.
    ///
    /// # Arguments
    ///
    /// * `method` - Authentication method name (`http` or `dns`).
    /// * `domain` - Domain ownership is being proven for.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be reached or refuses to
    /// issue a challenge.
    pub async fn request_challenge(
        &self,
        method: &str,
        domain: &str,
    ) -> Result<ChallengeGrant, RegistryError> {
        let body = ChallengeRequest {
            method: method.to_string(),
            domain: domain.to_string(),
        };

        self.post_json("/v0/auth/challenge", &body).await
    }

    /// Exchanges an ambient CI identity token for a registry token.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be reached or rejects the
    /// identity token.
    pub async fn exchange_oidc(&self, id_token: &str) -> Result<TokenGrant, RegistryError> {
        let body = TokenRequest {
            method: "github-oidc".to_string(),
            domain: None,
            challenge: None,
            id_token: Some(id_token.to_string()),
        };

        self.post_json("/v0/auth/token", &body).await
    }

    /// Exchanges a proven challenge for a registry token.
    ///
    /// # Arguments
    ///
    /// * `method` - Authentication method name (`http` or `dns`).
    /// * `domain` - Domain the challenge was issued for.
    /// * `challenge` - Challenge value that has been published.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be reached or does not
    /// accept the challenge.
    pub async fn exchange_challenge(
        &self,
        method: &str,
        domain: &str,
        challenge: &str,
    ) -> Result<TokenGrant, RegistryError> {
        let body = TokenRequest {
            method: method.to_string(),
            domain: Some(domain.to_string()),
            challenge: Some(challenge.to_string()),
            id_token: None,
        };

        self.post_json("/v0/auth/token", &body).await
    }

    /// Submits a manifest for publication.
    ///
    /// Anonymous credentials send no `Authorization` header; permissive
    /// registries accept that for testing.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Http`] when the registry rejects the
    /// submission, or a transport error when it cannot be reached.
    pub async fn publish(
        &self,
        manifest: &ServerManifest,
        credential: &Credential,
    ) -> Result<PublishReceipt, RegistryError> {
        let url = self.config.endpoint("/v0/servers");

        let mut request = self.http.post(&url).json(manifest);
        if !credential.is_anonymous() {
            request = request.header(AUTHORIZATION, format!("Bearer {}", credential.token));
        }

        let response = request.send().await?;
        let receipt: PublishReceipt = Self::decode(response).await?;

        tracing::info!(
            name = %manifest.name,
            version = %manifest.version,
            id = %receipt.id,
            "Published server manifest"
        );

        Ok(receipt)
    }

    /// POSTs a JSON body and decodes a JSON response.
    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, RegistryError>
    where
        B: serde::Serialize,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        let response = self.http.post(&url).json(body).send().await?;
        Self::decode(response).await
    }

    /// Turns a response into a decoded body or a status-bearing error.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, RegistryError> {
        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::Http {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        response.json().await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_client_creation() {
        let config = RegistryConfig::new("https://registry.example.com");
        assert!(RegistryClient::new(config).is_ok());
    }

    #[test]
    fn test_client_rejects_non_http_url() {
        let config = RegistryConfig::new("ftp://registry.example.com");
        let err = RegistryClient::new(config).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidUrl { .. }));
    }

    #[test]
    fn test_client_rejects_unparseable_url() {
        let config = RegistryConfig::new("registry.example.com");
        assert!(RegistryClient::new(config).is_err());
    }

    #[test]
    fn test_client_keeps_config() {
        let config = RegistryConfig::new("https://registry.example.com")
            .with_timeout(Duration::from_secs(3));
        let client = RegistryClient::new(config).unwrap();
        assert_eq!(client.config().timeout, Duration::from_secs(3));
    }
}
