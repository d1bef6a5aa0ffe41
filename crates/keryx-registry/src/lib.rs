//! # Keryx Registry
//!
//! HTTP client and publish pipeline for the server registry.
//!
//! This crate provides the network half of keryx: a [`RegistryClient`]
//! speaking the registry's client-facing API (challenge issuance, token
//! exchange, manifest submission) and the [`PublishPipeline`] that
//! orchestrates load → validate → submit.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use keryx_core::FileCredentialStore;
//! use keryx_registry::{PublishPipeline, RegistryClient, RegistryConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RegistryClient::new(RegistryConfig::default())?;
//!     let store = FileCredentialStore::default_location()?;
//!
//!     let pipeline = PublishPipeline::new(&client, &store);
//!     let outcome = pipeline.publish("server.json".as_ref(), true).await?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod client;
mod config;
mod error;
mod publish;

pub use api::{ChallengeGrant, ChallengeRequest, PublishReceipt, TokenGrant, TokenRequest};
pub use client::RegistryClient;
pub use config::{RegistryConfig, DEFAULT_REGISTRY_URL};
pub use error::RegistryError;
pub use publish::{PublishError, PublishOutcome, PublishPipeline};
