//! Server manifest model and loading.
//!
//! This module defines the [`ServerManifest`] structure that describes a
//! server's publishable metadata, read from a `server.json` file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Conventional manifest file name, looked up in the current directory
/// when no explicit path is given.
pub const DEFAULT_MANIFEST_FILE: &str = "server.json";

/// Errors that can occur while loading a manifest from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The manifest file does not exist.
    #[error("Manifest file not found: {path}")]
    NotFound {
        /// Path that was looked up.
        path: String,
    },

    /// The manifest file could not be read.
    #[error("Failed to read manifest {path}: {source}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest content is not well-formed JSON for the expected schema.
    #[error("Failed to parse manifest at line {line}, column {column}: {source}")]
    Parse {
        /// Line of the offending content (1-based, 0 when unknown).
        line: usize,
        /// Column of the offending content (1-based, 0 when unknown).
        column: usize,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

/// A server description ready for publication to the registry.
///
/// Fields the registry does not know about are preserved in [`Self::extra`]
/// so that reading and rewriting a manifest never drops them.
///
/// # Examples
///
/// ```rust
/// use keryx_core::ServerManifest;
///
/// let manifest = ServerManifest::from_json(
///     r#"{
///         "name": "io.github.acme/weather",
///         "description": "Weather lookups",
///         "version": "1.0.0",
///         "packages": [
///             {"registry": "npm", "identifier": "@acme/weather", "version": "1.0.0"}
///         ]
///     }"#,
/// )?;
/// assert_eq!(manifest.name, "io.github.acme/weather");
/// # Ok::<(), keryx_core::LoadError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerManifest {
    /// Registry name in `namespace/name` form.
    pub name: String,

    /// Human-readable description of the server.
    pub description: String,

    /// Version being published.
    pub version: String,

    /// Installable package references.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<PackageRef>,

    /// Remotely hosted endpoints.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remotes: Vec<RemoteEndpoint>,

    /// Source repository reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,

    /// Search tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Project website.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,

    /// Hint describing how clients authenticate against the server itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthHint>,

    /// Fields not part of the client-side schema, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A reference to an installable package in an upstream package registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRef {
    /// Upstream registry type (e.g. `npm`, `pypi`, `oci`).
    pub registry: String,

    /// Package identifier within the upstream registry.
    pub identifier: String,

    /// Package version to install.
    pub version: String,

    /// Runtime used to execute the package (e.g. `node`, `python`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_hint: Option<String>,

    /// Fields not part of the client-side schema, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A remotely hosted server endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteEndpoint {
    /// Transport the endpoint speaks (e.g. `sse`, `streamable-http`).
    pub transport: String,

    /// Endpoint URL.
    pub url: String,

    /// Fields not part of the client-side schema, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Source repository metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository URL.
    pub url: String,

    /// Hosting source (e.g. `github`, `gitlab`).
    pub source: String,

    /// Source-specific repository identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Authentication hint for clients of the published server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthHint {
    /// Authentication scheme name (e.g. `oauth2`, `api-key`).
    pub scheme: String,

    /// Free-form setup instructions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl ServerManifest {
    /// Loads a manifest from a file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotFound`] if the path does not exist,
    /// [`LoadError::Io`] if it cannot be read, or [`LoadError::Parse`]
    /// (carrying the offending line and column) if the content is not a
    /// well-formed manifest.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound {
                    path: path.display().to_string(),
                }
            } else {
                LoadError::Io {
                    path: path.display().to_string(),
                    source,
                }
            }
        })?;

        Self::from_json(&content)
    }

    /// Parses a manifest from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Parse`] if the content is not a well-formed
    /// manifest.
    pub fn from_json(content: &str) -> Result<Self, LoadError> {
        serde_json::from_str(content).map_err(|source| LoadError::Parse {
            line: source.line(),
            column: source.column(),
            source,
        })
    }

    /// Serializes the manifest as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
