//! Authentication manager: method selection, challenge, commit.

use keryx_core::{Credential, CredentialStore};
use keryx_registry::RegistryClient;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::method::{AuthMethod, MethodArgs};

/// Runs login flows and commits the resulting credential.
///
/// The store and client are injected so the flow stays testable with an
/// in-memory store substitute.
#[derive(Debug)]
pub struct AuthManager<'a, S> {
    store: &'a S,
    client: &'a RegistryClient,
    config: AuthConfig,
}

impl<'a, S: CredentialStore> AuthManager<'a, S> {
    /// Creates a manager over the given store and registry client.
    pub fn new(store: &'a S, client: &'a RegistryClient) -> Self {
        Self {
            store,
            client,
            config: AuthConfig::default(),
        }
    }

    /// Replaces the authentication configuration.
    #[must_use]
    pub fn with_config(mut self, config: AuthConfig) -> Self {
        self.config = config;
        self
    }

    /// Authenticates with the named method and persists the credential,
    /// replacing any previous one.
    ///
    /// On any failure the store is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UnsupportedMethod`] for unknown method names,
    /// the method-specific error when its challenge fails, or
    /// [`AuthError::Store`] when the credential cannot be persisted.
    pub async fn authenticate(
        &self,
        method_name: &str,
        args: &MethodArgs,
    ) -> Result<Credential, AuthError> {
        let method = AuthMethod::from_name(method_name, args)?;
        tracing::info!(method = method_name, "Authenticating with registry");

        let credential = method.challenge(self.client, &self.config).await?;
        self.store.save(&credential)?;

        tracing::info!(method = %credential.method, "Stored registry credential");
        Ok(credential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keryx_core::{CredentialMethod, MemoryCredentialStore};
    use keryx_registry::RegistryConfig;

    fn offline_client() -> RegistryClient {
        RegistryClient::new(RegistryConfig::new("https://registry.example.com")).unwrap()
    }

    #[tokio::test]
    async fn test_authenticate_none_commits_credential() {
        let store = MemoryCredentialStore::new();
        let client = offline_client();
        let manager = AuthManager::new(&store, &client);

        let credential = manager
            .authenticate("none", &MethodArgs::default())
            .await
            .unwrap();
        assert_eq!(credential.method, CredentialMethod::Anonymous);
        assert_eq!(store.load().unwrap(), Some(credential));
    }

    #[tokio::test]
    async fn test_authenticate_github_token_commits_credential() {
        let store = MemoryCredentialStore::new();
        let client = offline_client();
        let manager = AuthManager::new(&store, &client);

        let args = MethodArgs {
            token: Some("ghp_abc123".to_string()),
            domain: None,
        };
        let credential = manager.authenticate("github-at", &args).await.unwrap();
        assert_eq!(credential.method, CredentialMethod::GithubToken);
        assert_eq!(store.load().unwrap().unwrap().token, "ghp_abc123");
    }

    #[tokio::test]
    async fn test_new_login_replaces_previous_credential() {
        let store = MemoryCredentialStore::new();
        let client = offline_client();
        let manager = AuthManager::new(&store, &client);

        let args = MethodArgs {
            token: Some("ghp_first".to_string()),
            domain: None,
        };
        manager.authenticate("github-at", &args).await.unwrap();
        manager.authenticate("none", &MethodArgs::default()).await.unwrap();

        let active = store.load().unwrap().unwrap();
        assert_eq!(active.method, CredentialMethod::Anonymous);
    }

    #[tokio::test]
    async fn test_unsupported_method_leaves_store_untouched() {
        let store = MemoryCredentialStore::new();
        let client = offline_client();
        let manager = AuthManager::new(&store, &client);

        let err = manager
            .authenticate("bogus", &MethodArgs::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UnsupportedMethod { .. }));
        assert_eq!(store.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_failed_challenge_leaves_store_untouched() {
        let store = MemoryCredentialStore::new();
        let client = offline_client();
        let manager = AuthManager::new(&store, &client);

        let args = MethodArgs {
            token: Some(String::new()),
            domain: None,
        };
        let err = manager.authenticate("github-at", &args).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken { .. }));
        assert_eq!(store.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_failed_challenge_keeps_previous_credential() {
        let store = MemoryCredentialStore::new();
        let client = offline_client();
        let manager = AuthManager::new(&store, &client);

        let args = MethodArgs {
            token: Some("ghp_keep".to_string()),
            domain: None,
        };
        manager.authenticate("github-at", &args).await.unwrap();

        let bad = MethodArgs {
            token: Some(String::new()),
            domain: None,
        };
        manager.authenticate("github-at", &bad).await.unwrap_err();

        assert_eq!(store.load().unwrap().unwrap().token, "ghp_keep");
    }
}
