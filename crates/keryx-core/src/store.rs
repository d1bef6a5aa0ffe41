//! Local credential persistence.
//!
//! A store holds at most one active credential per local environment. A
//! successful login overwrites the previous record atomically; a reader
//! never observes a half-written record.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

use crate::credential::Credential;

/// Errors that can occur while persisting credentials.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A filesystem operation on the credential record failed.
    #[error("Credential store I/O error at {path}: {source}")]
    Io {
        /// Path that was being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The credential record could not be encoded or decoded.
    #[error("Credential record serialization error: {source}")]
    Serialize {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// No user configuration directory is available on this system.
    #[error("Could not determine a user configuration directory")]
    NoConfigDir,
}

/// Persistence for the single active credential.
///
/// Implementations are injected into the authentication manager and the
/// publish pipeline so both flows stay testable with an in-memory
/// substitute.
pub trait CredentialStore {
    /// Overwrites the stored record with `credential`.
    ///
    /// The overwrite is atomic with respect to a concurrent [`Self::load`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the record cannot be written.
    fn save(&self, credential: &Credential) -> Result<(), StoreError>;

    /// Returns the active credential, or `None` when no login has occurred.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if an existing record cannot be read.
    fn load(&self) -> Result<Option<Credential>, StoreError>;

    /// Removes the stored record. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if an existing record cannot be removed.
    fn clear(&self) -> Result<(), StoreError>;
}

/// File-backed credential store in the user's configuration directory.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Creates a store backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default user-scoped location
    /// (`<config dir>/keryx/credentials.json`).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoConfigDir`] if the platform exposes no user
    /// configuration directory.
    pub fn default_location() -> Result<Self, StoreError> {
        let dir = dirs::config_dir().ok_or(StoreError::NoConfigDir)?;
        Ok(Self::new(dir.join("keryx").join("credentials.json")))
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let encoded = serde_json::to_vec_pretty(credential)?;

        // Write to a sibling temp file, then rename over the record so a
        // concurrent load sees either the old record or the new one.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, &encoded).map_err(|e| self.io_error(e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o600))
                .map_err(|e| self.io_error(e))?;
        }

        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        tracing::debug!(path = %self.path.display(), "Saved credential record");
        Ok(())
    }

    fn load(&self) -> Result<Option<Credential>, StoreError> {
        let content = match std::fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        let credential = serde_json::from_slice(&content)?;
        Ok(Some(credential))
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Cleared credential record");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// In-memory credential store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<Credential>>,
}

impl MemoryCredentialStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        *self.slot.lock().expect("store lock poisoned") = Some(credential.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<Credential>, StoreError> {
        Ok(self.slot.lock().expect("store lock poisoned").clone())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot.lock().expect("store lock poisoned") = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::CredentialMethod;

    fn sample_credential() -> Credential {
        Credential::new(CredentialMethod::Http, "registry-token".to_string())
            .with_subject("weather.acme.dev")
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));

        let credential = sample_credential();
        store.save(&credential).unwrap();
        assert_eq!(store.load().unwrap(), Some(credential));
    }

    #[test]
    fn test_file_store_load_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_overwrite_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));

        store.save(&sample_credential()).unwrap();
        let replacement = Credential::new(CredentialMethod::GithubToken, "pat".to_string());
        store.save(&replacement).unwrap();

        assert_eq!(store.load().unwrap(), Some(replacement));
    }

    #[test]
    fn test_file_store_clear_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));

        store.save(&sample_credential()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);

        // Clearing an already-empty store succeeds.
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nested/keryx/credentials.json"));

        store.save(&sample_credential()).unwrap();
        assert!(store.load().unwrap().is_some());
    }

    #[test]
    fn test_file_store_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));

        store.save(&sample_credential()).unwrap();
        let entries: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, vec!["credentials.json"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));
        store.save(&sample_credential()).unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.load().unwrap(), None);

        let credential = sample_credential();
        store.save(&credential).unwrap();
        assert_eq!(store.load().unwrap(), Some(credential));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }
}
