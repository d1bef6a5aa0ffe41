//! Logout command implementation.

use anyhow::{Context, Result};

use keryx_core::{CredentialStore, FileCredentialStore};

/// Runs the logout command. Logging out while already logged out is fine.
///
/// # Errors
///
/// Returns an error if an existing credential record cannot be removed.
pub fn run() -> Result<()> {
    let store =
        FileCredentialStore::default_location().context("Failed to locate credential store")?;
    store.clear().context("Failed to clear credential")?;

    println!("Logged out. Saved credentials cleared.");
    Ok(())
}
