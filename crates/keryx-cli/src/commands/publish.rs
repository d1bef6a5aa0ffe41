//! Publish command implementation.
//!
//! Loads and validates the manifest, then submits it to the registry
//! using the stored credential. With `--dry-run`, stops after validation.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use keryx_core::{FileCredentialStore, DEFAULT_MANIFEST_FILE};
use keryx_registry::{
    PublishError, PublishOutcome, PublishPipeline, RegistryClient, RegistryConfig,
    DEFAULT_REGISTRY_URL,
};

/// Arguments for the publish command.
#[derive(Args)]
pub struct PublishArgs {
    /// Path to the manifest file
    #[arg(long, default_value = DEFAULT_MANIFEST_FILE)]
    pub file: PathBuf,

    /// Validate the manifest without publishing
    #[arg(long)]
    pub dry_run: bool,

    /// Registry URL
    #[arg(short, long, env = "KERYX_REGISTRY_URL", default_value = DEFAULT_REGISTRY_URL)]
    pub registry: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "60")]
    pub timeout: u64,
}

/// Executes the publish command.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded, fails validation
/// (every violation is listed), no login is active, or the registry
/// rejects or cannot receive the submission.
pub async fn execute(args: PublishArgs) -> Result<()> {
    info!(
        file = ?args.file,
        registry = %args.registry,
        dry_run = args.dry_run,
        "Publishing manifest"
    );

    println!("Keryx Publisher");
    println!("===============");
    println!();

    let config = RegistryConfig::new(&args.registry)
        .with_timeout(Duration::from_secs(args.timeout));
    let client = RegistryClient::new(config).context("Failed to create registry client")?;

    let store =
        FileCredentialStore::default_location().context("Failed to locate credential store")?;

    let pipeline = PublishPipeline::new(&client, &store);

    match pipeline.publish(&args.file, args.dry_run).await {
        Ok(PublishOutcome::DryRun) => {
            println!("✓ {} is valid", args.file.display());
            println!();
            println!("Dry run: nothing was published.");
            Ok(())
        }
        Ok(PublishOutcome::Published(receipt)) => {
            println!("✓ {} is valid", args.file.display());
            println!("✓ Published to {}", args.registry);
            println!();
            println!("  Id: {}", receipt.id);
            Ok(())
        }
        Err(PublishError::Invalid(report)) => {
            println!("✗ {} failed validation", args.file.display());
            println!();
            print!("{report}");
            anyhow::bail!("manifest failed validation with {} violation(s)", report.len());
        }
        Err(e) => Err(e.into()),
    }
}
