//! Init command implementation.
//!
//! Writes a `server.json` template to be filled in before publishing.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use keryx_core::DEFAULT_MANIFEST_FILE;

const TEMPLATE: &str = r#"{
  "name": "io.github.example/my-server",
  "description": "A short description of what the server does",
  "version": "0.1.0",
  "packages": [
    {
      "registry": "npm",
      "identifier": "@example/my-server",
      "version": "0.1.0",
      "runtime_hint": "node"
    }
  ],
  "repository": {
    "url": "https://github.com/example/my-server",
    "source": "github"
  },
  "tags": ["example"]
}
"#;

/// Arguments for the init command.
#[derive(Args)]
pub struct InitArgs {
    /// Output path for the template
    #[arg(long, default_value = DEFAULT_MANIFEST_FILE)]
    pub file: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Runs the init command.
///
/// # Errors
///
/// Returns an error if the target exists (without `--force`) or cannot be
/// written.
pub fn run(args: &InitArgs) -> Result<()> {
    if args.file.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (pass --force to overwrite)",
            args.file.display()
        );
    }

    std::fs::write(&args.file, TEMPLATE)
        .with_context(|| format!("Failed to write {}", args.file.display()))?;

    println!("Created {}", args.file.display());
    println!();
    println!("Fill in your server's details, then:");
    println!("  keryx login <method>");
    println!("  keryx publish");
    Ok(())
}
