//! Error types for authentication flows.

use thiserror::Error;

use keryx_core::StoreError;

/// Errors that can occur while authenticating with the registry.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The requested method name is not one of the supported set.
    #[error("Unsupported authentication method '{name}' (supported: github-at, github-oidc, http, dns, none)")]
    UnsupportedMethod {
        /// Name as given by the caller.
        name: String,
    },

    /// A method-specific argument is missing or malformed.
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// What is wrong with the arguments.
        reason: String,
    },

    /// The supplied token is empty or malformed.
    #[error("Invalid token: {reason}")]
    InvalidToken {
        /// What is wrong with the token.
        reason: String,
    },

    /// No ambient CI-issued OIDC context is available.
    #[error("No OIDC context: expected to run inside GitHub Actions with id-token permissions")]
    NoOidcContext,

    /// A challenge or token exchange step failed.
    #[error("Challenge failed: {reason}")]
    ChallengeFailed {
        /// What went wrong.
        reason: String,
    },

    /// The expected DNS TXT record was not found.
    #[error("DNS TXT record missing or does not carry the challenge value: {record}")]
    DnsRecordMissing {
        /// Fully qualified record name that was looked up.
        record: String,
    },

    /// The DNS lookup did not complete within the configured timeout.
    #[error("DNS lookup timed out for {record}")]
    DnsTimeout {
        /// Fully qualified record name that was looked up.
        record: String,
    },

    /// The credential could not be persisted.
    #[error(transparent)]
    Store(#[from] StoreError),
}
