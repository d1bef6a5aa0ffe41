//! The supported authentication methods.
//!
//! The method set is fixed at design time, so it is a closed enum rather
//! than open-ended dynamic dispatch.

use keryx_core::{Credential, CredentialMethod};
use keryx_registry::{RegistryClient, TokenGrant};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::oidc::OidcContext;
use crate::{dns, http};

/// Method names accepted by `login`.
pub const SUPPORTED_METHODS: &[&str] = &["github-at", "github-oidc", "http", "dns", "none"];

/// Fully-parsed method arguments handed over by the command router.
#[derive(Debug, Clone, Default)]
pub struct MethodArgs {
    /// Personal access token (`github-at`).
    pub token: Option<String>,

    /// Domain ownership is proven for (`http`/`dns`).
    pub domain: Option<String>,
}

/// An authentication method and its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// GitHub personal access token supplied by the caller.
    GithubToken {
        /// The token value.
        token: String,
    },

    /// GitHub Actions OIDC token exchange.
    GithubOidc,

    /// Proof of domain control through an HTTP well-known endpoint.
    HttpChallenge {
        /// Domain being proven.
        domain: String,
    },

    /// Proof of domain control through a DNS TXT record.
    DnsChallenge {
        /// Domain being proven.
        domain: String,
    },

    /// No authentication, for permissive registries.
    Anonymous,
}

impl AuthMethod {
    /// Selects a method by name with its arguments.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UnsupportedMethod`] for names outside the
    /// supported set and [`AuthError::InvalidArguments`] when a required
    /// method argument is missing or malformed.
    pub fn from_name(name: &str, args: &MethodArgs) -> Result<Self, AuthError> {
        match name {
            "github-at" => Ok(Self::GithubToken {
                token: args.token.clone().unwrap_or_default(),
            }),
            "github-oidc" => Ok(Self::GithubOidc),
            "http" => Ok(Self::HttpChallenge {
                domain: required_domain(args)?,
            }),
            "dns" => Ok(Self::DnsChallenge {
                domain: required_domain(args)?,
            }),
            "none" => Ok(Self::Anonymous),
            other => Err(AuthError::UnsupportedMethod {
                name: other.to_string(),
            }),
        }
    }

    /// The credential method this variant produces.
    #[must_use]
    pub const fn kind(&self) -> CredentialMethod {
        match self {
            Self::GithubToken { .. } => CredentialMethod::GithubToken,
            Self::GithubOidc => CredentialMethod::GithubOidc,
            Self::HttpChallenge { .. } => CredentialMethod::Http,
            Self::DnsChallenge { .. } => CredentialMethod::Dns,
            Self::Anonymous => CredentialMethod::Anonymous,
        }
    }

    /// Executes the method's challenge flow and produces a credential.
    ///
    /// Network-facing methods are bounded by the method-specific timeouts
    /// in `config`.
    ///
    /// # Errors
    ///
    /// Returns the method-specific [`AuthError`]: `InvalidToken` for an
    /// unusable personal access token, `NoOidcContext` outside a CI
    /// context, `ChallengeFailed` for probe or exchange failures, and
    /// `DnsRecordMissing`/`DnsTimeout` for TXT verification failures.
    pub async fn challenge(
        &self,
        client: &RegistryClient,
        config: &AuthConfig,
    ) -> Result<Credential, AuthError> {
        match self {
            Self::GithubToken { token } => challenge_github_token(token),
            Self::GithubOidc => challenge_github_oidc(client, config).await,
            Self::HttpChallenge { domain } => challenge_http(client, config, domain).await,
            Self::DnsChallenge { domain } => challenge_dns(client, config, domain).await,
            Self::Anonymous => Ok(Credential::anonymous()),
        }
    }
}

fn required_domain(args: &MethodArgs) -> Result<String, AuthError> {
    let domain = args
        .domain
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();

    if domain.is_empty() {
        return Err(AuthError::InvalidArguments {
            reason: "--domain is required for this method".to_string(),
        });
    }
    if domain.contains('/') || domain.chars().any(char::is_whitespace) {
        return Err(AuthError::InvalidArguments {
            reason: format!("'{domain}' is not a plain domain name"),
        });
    }

    Ok(domain.to_string())
}

fn challenge_github_token(token: &str) -> Result<Credential, AuthError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::InvalidToken {
            reason: "token is empty (pass --token or set GITHUB_TOKEN)".to_string(),
        });
    }
    if token.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(AuthError::InvalidToken {
            reason: "token contains whitespace or control characters".to_string(),
        });
    }

    Ok(Credential::new(
        CredentialMethod::GithubToken,
        token.to_string(),
    ))
}

async fn challenge_github_oidc(
    client: &RegistryClient,
    config: &AuthConfig,
) -> Result<Credential, AuthError> {
    let context = OidcContext::from_env().ok_or(AuthError::NoOidcContext)?;
    let id_token = context.mint(&config.oidc_audience, config.oidc_timeout).await?;

    let grant = client
        .exchange_oidc(&id_token)
        .await
        .map_err(|e| AuthError::ChallengeFailed {
            reason: format!("OIDC exchange rejected: {e}"),
        })?;

    Ok(credential_from_grant(CredentialMethod::GithubOidc, grant))
}

async fn challenge_http(
    client: &RegistryClient,
    config: &AuthConfig,
    domain: &str,
) -> Result<Credential, AuthError> {
    let grant = client
        .request_challenge("http", domain)
        .await
        .map_err(|e| AuthError::ChallengeFailed {
            reason: format!("could not obtain a challenge: {e}"),
        })?;

    let url = http::well_known_url(domain);
    tracing::info!(domain, url, "Verifying HTTP challenge");
    http::verify_challenge_at(&url, &grant.challenge, config.http_timeout).await?;

    let grant = client
        .exchange_challenge("http", domain, &grant.challenge)
        .await
        .map_err(|e| AuthError::ChallengeFailed {
            reason: format!("challenge exchange rejected: {e}"),
        })?;

    Ok(credential_from_grant(CredentialMethod::Http, grant))
}

async fn challenge_dns(
    client: &RegistryClient,
    config: &AuthConfig,
    domain: &str,
) -> Result<Credential, AuthError> {
    let grant = client
        .request_challenge("dns", domain)
        .await
        .map_err(|e| AuthError::ChallengeFailed {
            reason: format!("could not obtain a challenge: {e}"),
        })?;

    tracing::info!(domain, record = %dns::challenge_record_name(domain), "Verifying DNS challenge");
    dns::verify_txt_challenge(domain, &grant.challenge, config.dns_timeout).await?;

    let grant = client
        .exchange_challenge("dns", domain, &grant.challenge)
        .await
        .map_err(|e| AuthError::ChallengeFailed {
            reason: format!("challenge exchange rejected: {e}"),
        })?;

    Ok(credential_from_grant(CredentialMethod::Dns, grant))
}

fn credential_from_grant(method: CredentialMethod, grant: TokenGrant) -> Credential {
    let mut credential = Credential::new(method, grant.token);
    credential.expires_at = grant.expires_at;
    credential.subject = grant.subject;
    credential
}
