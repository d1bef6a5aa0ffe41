//! Credential record issued by a login and consumed by publish.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authentication method a credential was obtained through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CredentialMethod {
    /// GitHub personal access token, supplied by the caller.
    #[serde(rename = "github-at")]
    GithubToken,

    /// GitHub Actions OIDC token exchange.
    GithubOidc,

    /// HTTP well-known endpoint challenge.
    Http,

    /// DNS TXT record challenge.
    Dns,

    /// No authentication, for permissive registries.
    #[serde(rename = "none")]
    Anonymous,
}

impl CredentialMethod {
    /// Canonical method name as accepted on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GithubToken => "github-at",
            Self::GithubOidc => "github-oidc",
            Self::Http => "http",
            Self::Dns => "dns",
            Self::Anonymous => "none",
        }
    }
}

impl fmt::Display for CredentialMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CredentialMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "github-at" => Ok(Self::GithubToken),
            "github-oidc" => Ok(Self::GithubOidc),
            "http" => Ok(Self::Http),
            "dns" => Ok(Self::Dns),
            "none" => Ok(Self::Anonymous),
            other => Err(format!("unknown credential method '{other}'")),
        }
    }
}

/// Proof of identity accepted by the registry.
///
/// At most one credential is active per local environment; a new login
/// overwrites the previous record through the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Method the credential was obtained through.
    pub method: CredentialMethod,

    /// Opaque secret presented to the registry.
    pub token: String,

    /// Expiry, if the registry bounded the credential's lifetime.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Identity the registry associated with the credential.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl Credential {
    /// Creates a credential with no expiry or subject.
    #[must_use]
    pub const fn new(method: CredentialMethod, token: String) -> Self {
        Self {
            method,
            token,
            expires_at: None,
            subject: None,
        }
    }

    /// Creates the anonymous credential used with permissive registries.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self::new(CredentialMethod::Anonymous, String::new())
    }

    /// Sets the expiry timestamp.
    #[must_use]
    pub const fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Sets the subject identity.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Returns true if the credential carries no secret.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.method == CredentialMethod::Anonymous || self.token.is_empty()
    }

    /// Returns true if the credential expired before `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_method_round_trip_names() {
        for name in ["github-at", "github-oidc", "http", "dns", "none"] {
            let method: CredentialMethod = name.parse().unwrap();
            assert_eq!(method.as_str(), name);
        }
    }

    #[test]
    fn test_method_unknown_name() {
        assert!("password".parse::<CredentialMethod>().is_err());
    }

    #[test]
    fn test_anonymous_credential() {
        let credential = Credential::anonymous();
        assert!(credential.is_anonymous());
        assert!(credential.token.is_empty());
    }

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        let live = Credential::new(CredentialMethod::Http, "tok".to_string())
            .with_expiry(now + Duration::minutes(5));
        let stale = Credential::new(CredentialMethod::Http, "tok".to_string())
            .with_expiry(now - Duration::minutes(5));
        let unbounded = Credential::new(CredentialMethod::GithubToken, "tok".to_string());

        assert!(!live.is_expired(now));
        assert!(stale.is_expired(now));
        assert!(!unbounded.is_expired(now));
    }

    #[test]
    fn test_serde_round_trip() {
        let credential = Credential::new(CredentialMethod::Dns, "secret".to_string())
            .with_subject("weather.acme.dev");

        let json = serde_json::to_string(&credential).unwrap();
        assert!(json.contains("\"dns\""));
        let back: Credential = serde_json::from_str(&json).unwrap();
        assert_eq!(back, credential);
    }
}
