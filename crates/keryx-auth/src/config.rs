//! Configuration for authentication flows.

use std::time::Duration;

/// Tunables for the authentication methods.
///
/// Every network-facing method is bounded by its own timeout so a login
/// surfaces a typed failure instead of hanging indefinitely.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Audience requested for CI-issued OIDC tokens.
    pub oidc_audience: String,

    /// Timeout for minting and exchanging OIDC tokens.
    pub oidc_timeout: Duration,

    /// Timeout for probing the HTTP well-known endpoint.
    pub http_timeout: Duration,

    /// Timeout for DNS TXT lookups.
    pub dns_timeout: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            oidc_audience: "keryx-registry".to_string(),
            oidc_timeout: Duration::from_secs(10),
            http_timeout: Duration::from_secs(10),
            dns_timeout: Duration::from_secs(5),
        }
    }
}

impl AuthConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the OIDC audience.
    #[must_use]
    pub fn with_oidc_audience(mut self, audience: impl Into<String>) -> Self {
        self.oidc_audience = audience.into();
        self
    }

    /// Sets the OIDC mint/exchange timeout.
    #[must_use]
    pub const fn with_oidc_timeout(mut self, timeout: Duration) -> Self {
        self.oidc_timeout = timeout;
        self
    }

    /// Sets the HTTP challenge probe timeout.
    #[must_use]
    pub const fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Sets the DNS lookup timeout.
    #[must_use]
    pub const fn with_dns_timeout(mut self, timeout: Duration) -> Self {
        self.dns_timeout = timeout;
        self
    }
}
