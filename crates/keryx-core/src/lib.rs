//! # Keryx Core
//!
//! Core types for the keryx registry publisher.
//!
//! This crate provides the foundational data structures shared by the
//! keryx tooling:
//!
//! - [`ServerManifest`] - The server description read from `server.json`
//! - [`ValidationReport`] - Schema validation outcome for a manifest
//! - [`Credential`] - Proof of identity accepted by the registry
//! - [`CredentialStore`] - Persistence for the single active credential
//!
//! ## Example
//!
//! ```rust
//! use keryx_core::ServerManifest;
//!
//! let manifest = ServerManifest::from_json(
//!     r#"{
//!         "name": "io.github.acme/weather",
//!         "description": "Weather lookups",
//!         "version": "1.0.0",
//!         "remotes": [{"transport": "sse", "url": "https://weather.acme.dev/sse"}]
//!     }"#,
//! )?;
//!
//! assert!(manifest.validate().is_empty());
//! # Ok::<(), keryx_core::LoadError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod credential;
pub mod manifest;
pub mod store;
pub mod validation;


// Re-export main types at crate root
pub use credential::{Credential, CredentialMethod};
pub use manifest::{
    AuthHint, LoadError, PackageRef, RemoteEndpoint, Repository, ServerManifest,
    DEFAULT_MANIFEST_FILE,
};
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore, StoreError};
pub use validation::{ValidationReport, Violation};
