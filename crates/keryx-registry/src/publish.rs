//! Publish pipeline: load, validate, then submit a manifest.
//!
//! The pipeline runs Loaded → Validated → {Stopped | Submitted →
//! Acknowledged}. Dry-run stops after validation with no credential read
//! and no network traffic; an invalid manifest is never submitted.

use std::path::Path;

use thiserror::Error;

use keryx_core::{
    CredentialStore, LoadError, ServerManifest, StoreError, ValidationReport,
};

use crate::api::PublishReceipt;
use crate::client::RegistryClient;
use crate::error::RegistryError;

/// Errors that can occur during a publish invocation.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The manifest could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The manifest does not conform to the registry schema.
    #[error("Manifest failed validation with {} violation(s)", .0.len())]
    Invalid(ValidationReport),

    /// No active credential; run `login` first.
    #[error("Not authenticated with the registry (run `keryx login <method>` first)")]
    Unauthenticated,

    /// The stored credential could not be read.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The registry refused the submission.
    #[error("Registry rejected the manifest ({status}): {reason}")]
    Rejected {
        /// HTTP status the registry answered with.
        status: u16,
        /// Reason reported by the registry.
        reason: String,
    },

    /// The registry could not be reached; the submission was not retried.
    #[error("Failed to submit manifest: {0}")]
    Network(#[source] RegistryError),
}

/// Successful outcome of a publish invocation.
#[derive(Debug, Clone)]
pub enum PublishOutcome {
    /// Validation passed and the pipeline stopped before submission.
    DryRun,

    /// The registry acknowledged the submission.
    Published(PublishReceipt),
}

/// Orchestrates manifest loading, validation and submission.
///
/// The credential store is injected so the flow stays testable with an
/// in-memory substitute.
#[derive(Debug)]
pub struct PublishPipeline<'a, S> {
    client: &'a RegistryClient,
    store: &'a S,
}

impl<'a, S: CredentialStore> PublishPipeline<'a, S> {
    /// Creates a pipeline over the given client and credential store.
    #[must_use]
    pub const fn new(client: &'a RegistryClient, store: &'a S) -> Self {
        Self { client, store }
    }

    /// Publishes the manifest at `path`.
    ///
    /// With `dry_run`, stops after validation: no credential is read and
    /// no network call is made, whatever the validation outcome.
    ///
    /// # Errors
    ///
    /// Returns a [`PublishError`] naming the failed stage; validation
    /// failures carry every violation found. Network failures are not
    /// retried automatically.
    pub async fn publish(
        &self,
        path: &Path,
        dry_run: bool,
    ) -> Result<PublishOutcome, PublishError> {
        let manifest = ServerManifest::from_file(path)?;

        let report = manifest.validate();
        if !report.is_empty() {
            return Err(PublishError::Invalid(report));
        }

        if dry_run {
            tracing::info!(name = %manifest.name, "Dry run: manifest is valid, stopping before submission");
            return Ok(PublishOutcome::DryRun);
        }

        let credential = self
            .store
            .load()?
            .filter(|c| !c.is_expired(chrono::Utc::now()))
            .ok_or(PublishError::Unauthenticated)?;

        let receipt = self
            .client
            .publish(&manifest, &credential)
            .await
            .map_err(|e| match e {
                RegistryError::Http { status, message } => PublishError::Rejected {
                    status,
                    reason: message,
                },
                other => PublishError::Network(other),
            })?;

        Ok(PublishOutcome::Published(receipt))
    }
}
