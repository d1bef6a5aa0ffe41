//! # Keryx Auth
//!
//! Authentication methods and credential lifecycle for the keryx
//! registry publisher.
//!
//! Five methods are supported: `github-at` (personal access token),
//! `github-oidc` (CI token exchange), `http` (well-known endpoint
//! challenge), `dns` (TXT record challenge) and `none` (anonymous, for
//! permissive registries). The set is closed by design; methods are
//! selected by name and produce a [`keryx_core::Credential`] that the
//! manager commits to the injected store.
//!
//! ## Example
//!
//! ```rust,no_run
//! use keryx_auth::{AuthManager, MethodArgs};
//! use keryx_core::FileCredentialStore;
//! use keryx_registry::{RegistryClient, RegistryConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = FileCredentialStore::default_location()?;
//!     let client = RegistryClient::new(RegistryConfig::default())?;
//!
//!     let manager = AuthManager::new(&store, &client);
//!     let args = MethodArgs { token: None, domain: Some("acme.dev".to_string()) };
//!     let credential = manager.authenticate("dns", &args).await?;
//!     println!("authenticated as {:?}", credential.subject);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod dns;
mod error;
mod http;
mod manager;
mod method;
mod oidc;

pub use config::AuthConfig;
pub use dns::{challenge_record_name, CHALLENGE_LABEL};
pub use error::AuthError;
pub use http::{well_known_url, WELL_KNOWN_PATH};
pub use manager::AuthManager;
pub use method::{AuthMethod, MethodArgs, SUPPORTED_METHODS};
pub use oidc::{OidcContext, OIDC_REQUEST_TOKEN_VAR, OIDC_REQUEST_URL_VAR};
