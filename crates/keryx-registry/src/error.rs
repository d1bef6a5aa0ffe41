//! Error types for registry operations.

use thiserror::Error;

/// Errors that can occur while talking to the registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {source}")]
    Client {
        /// Underlying error.
        #[source]
        source: reqwest::Error,
    },

    /// The configured registry URL is not usable.
    #[error("Invalid registry URL: {url}")]
    InvalidUrl {
        /// URL string.
        url: String,
    },

    /// The registry could not be reached (connect failure or timeout).
    #[error("Failed to reach registry at {url}: {source}")]
    Transport {
        /// Request URL.
        url: String,
        /// Underlying error.
        #[source]
        source: reqwest::Error,
    },

    /// The registry answered with a non-success status.
    #[error("Registry returned {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body or status text.
        message: String,
    },

    /// The registry answered with a body the client could not decode.
    #[error("Invalid response from registry: {source}")]
    Decode {
        /// Underlying error.
        #[source]
        source: reqwest::Error,
    },
}

impl From<reqwest::Error> for RegistryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode { source: err }
        } else {
            Self::Transport {
                url: err
                    .url()
                    .map_or_else(|| "unknown".to_string(), ToString::to_string),
                source: err,
            }
        }
    }
}

impl RegistryError {
    /// Returns the HTTP status code for status-bearing errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
