//! Login command implementation.
//!
//! Authenticates against the registry with one of the supported methods
//! and stores the resulting credential for subsequent publishes.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use keryx_auth::{AuthConfig, AuthManager, MethodArgs};
use keryx_core::FileCredentialStore;
use keryx_registry::{RegistryClient, RegistryConfig, DEFAULT_REGISTRY_URL};

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Authentication method: github-at, github-oidc, http, dns or none
    pub method: String,

    /// Personal access token (github-at)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Domain to prove ownership of (http/dns)
    #[arg(long)]
    pub domain: Option<String>,

    /// Registry URL
    #[arg(short, long, env = "KERYX_REGISTRY_URL", default_value = DEFAULT_REGISTRY_URL)]
    pub registry: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,
}

/// Executes the login command.
///
/// # Errors
///
/// Returns an error if the method is unsupported, its challenge fails,
/// or the credential cannot be stored.
pub async fn execute(args: LoginArgs) -> Result<()> {
    info!(method = %args.method, registry = %args.registry, "Logging in");

    let config = RegistryConfig::new(&args.registry)
        .with_timeout(Duration::from_secs(args.timeout));
    let client = RegistryClient::new(config).context("Failed to create registry client")?;

    let store =
        FileCredentialStore::default_location().context("Failed to locate credential store")?;

    let manager = AuthManager::new(&store, &client).with_config(AuthConfig::default());
    let method_args = MethodArgs {
        token: args.token,
        domain: args.domain,
    };

    let credential = manager.authenticate(&args.method, &method_args).await?;

    println!("Logged in with method '{}'.", credential.method);
    if let Some(ref subject) = credential.subject {
        println!("  Subject: {subject}");
    }
    if let Some(expires_at) = credential.expires_at {
        println!("  Expires: {expires_at}");
    }
    println!();
    println!("Credential saved to {}", store.path().display());

    Ok(())
}
