//! Configuration for the registry client.

use std::time::Duration;

/// Default registry endpoint.
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.keryx.dev";

/// Configuration for the registry client.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Registry base URL (e.g. "<https://registry.keryx.dev>").
    pub url: String,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRY_URL)
    }
}

impl RegistryConfig {
    /// Creates a new registry configuration with the given base URL.
    ///
    /// A trailing slash on the URL is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use keryx_registry::RegistryConfig;
    ///
    /// let config = RegistryConfig::new("https://registry.example.com/");
    /// assert_eq!(config.url, "https://registry.example.com");
    /// ```
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        let mut url = url.into();
        while url.ends_with('/') {
            url.pop();
        }
        Self {
            url,
            timeout: Duration::from_secs(30),
            user_agent: format!("keryx/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the absolute URL for an API path.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.url)
    }
}
