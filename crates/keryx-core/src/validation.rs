//! Manifest validation against the registry's field schema.
//!
//! Validation is purely local: it never touches the network and never
//! mutates the manifest, so it can run under dry-run with no side effects.
//! All violations are collected in a single pass.

use std::fmt;

use crate::manifest::{PackageRef, RemoteEndpoint, ServerManifest};

/// Upstream package registries the registry accepts references to.
pub const SUPPORTED_PACKAGE_REGISTRIES: &[&str] = &["npm", "pypi", "oci", "nuget", "mcpb"];

/// Transports the registry accepts for remote endpoints.
pub const SUPPORTED_TRANSPORTS: &[&str] = &["sse", "streamable-http"];

const MAX_NAME_LEN: usize = 200;
const MAX_DESCRIPTION_LEN: usize = 512;
const MAX_VERSION_LEN: usize = 64;
const MAX_TAG_LEN: usize = 64;

/// A single schema violation, pointing at the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Path of the field that failed validation (e.g. `packages[0].version`).
    pub path: String,
    /// Human-readable reason.
    pub message: String,
}

impl Violation {
    /// Creates a new violation for the given field path.
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// The ordered outcome of validating a manifest.
///
/// An empty report means the manifest is publishable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Returns true if no violations were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns the number of violations found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns an iterator over the violations in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter()
    }

    /// Returns true if any violation points at the given field path.
    #[must_use]
    pub fn mentions(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }
}

impl IntoIterator for ValidationReport {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.violations.is_empty() {
            return write!(f, "manifest is valid");
        }
        writeln!(f, "{} schema violations:", self.violations.len())?;
        for violation in &self.violations {
            writeln!(f, "  - {violation}")?;
        }
        Ok(())
    }
}

impl ServerManifest {
    /// Validates this manifest against the registry's field schema.
    ///
    /// Checks presence of all required fields and the shape of both
    /// required and optional fields. Never fails: absence of validity is
    /// communicated only through a non-empty [`ValidationReport`] listing
    /// every violation found.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        check_name(&self.name, &mut report);
        check_description(&self.description, &mut report);
        check_version(&self.version, &mut report);

        if self.packages.is_empty() && self.remotes.is_empty() {
            report.push(Violation::new(
                "packages",
                "at least one package or remote endpoint is required",
            ));
        }

        for (i, package) in self.packages.iter().enumerate() {
            check_package(package, i, &mut report);
        }

        for (i, remote) in self.remotes.iter().enumerate() {
            check_remote(remote, i, &mut report);
        }

        if let Some(ref repository) = self.repository {
            if repository.source.trim().is_empty() {
                report.push(Violation::new("repository.source", "must not be empty"));
            }
            check_http_url("repository.url", &repository.url, &mut report);
        }

        if let Some(ref website) = self.website_url {
            check_http_url("website_url", website, &mut report);
        }

        for (i, tag) in self.tags.iter().enumerate() {
            check_tag(tag, i, &mut report);
        }

        if let Some(ref auth) = self.auth {
            if auth.scheme.trim().is_empty() {
                report.push(Violation::new("auth.scheme", "must not be empty"));
            }
        }

        report
    }
}

fn check_name(name: &str, report: &mut ValidationReport) {
    if name.is_empty() {
        report.push(Violation::new("name", "is required"));
        return;
    }
    if name.len() > MAX_NAME_LEN {
        report.push(Violation::new(
            "name",
            format!("must be at most {MAX_NAME_LEN} characters"),
        ));
    }

    let mut parts = name.splitn(2, '/');
    let namespace = parts.next().unwrap_or_default();
    let server = parts.next();

    match server {
        None => report.push(Violation::new(
            "name",
            "must use the namespace/name form (e.g. io.github.acme/weather)",
        )),
        Some(server) if namespace.is_empty() || server.is_empty() || server.contains('/') => {
            report.push(Violation::new(
                "name",
                "must contain exactly one '/' separating a non-empty namespace and name",
            ));
        }
        Some(server) => {
            if !is_name_segment(namespace) || !is_name_segment(server) {
                report.push(Violation::new(
                    "name",
                    "may only contain lowercase letters, digits, '.', '_' and '-'",
                ));
            }
        }
    }
}

fn is_name_segment(segment: &str) -> bool {
    segment
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-'))
}

fn check_description(description: &str, report: &mut ValidationReport) {
    if description.trim().is_empty() {
        report.push(Violation::new("description", "is required"));
    } else if description.len() > MAX_DESCRIPTION_LEN {
        report.push(Violation::new(
            "description",
            format!("must be at most {MAX_DESCRIPTION_LEN} characters"),
        ));
    }
}

fn check_version(version: &str, report: &mut ValidationReport) {
    if version.is_empty() {
        report.push(Violation::new("version", "is required"));
        return;
    }
    if version.chars().any(char::is_whitespace) {
        report.push(Violation::new("version", "must not contain whitespace"));
    }
    if version.len() > MAX_VERSION_LEN {
        report.push(Violation::new(
            "version",
            format!("must be at most {MAX_VERSION_LEN} characters"),
        ));
    }
}

fn check_package(package: &PackageRef, index: usize, report: &mut ValidationReport) {
    if !SUPPORTED_PACKAGE_REGISTRIES.contains(&package.registry.as_str()) {
        report.push(Violation::new(
            format!("packages[{index}].registry"),
            format!(
                "unsupported registry '{}' (expected one of: {})",
                package.registry,
                SUPPORTED_PACKAGE_REGISTRIES.join(", ")
            ),
        ));
    }
    if package.identifier.trim().is_empty() {
        report.push(Violation::new(
            format!("packages[{index}].identifier"),
            "must not be empty",
        ));
    }
    if package.version.trim().is_empty() {
        report.push(Violation::new(
            format!("packages[{index}].version"),
            "must not be empty",
        ));
    }
}

fn check_remote(remote: &RemoteEndpoint, index: usize, report: &mut ValidationReport) {
    if !SUPPORTED_TRANSPORTS.contains(&remote.transport.as_str()) {
        report.push(Violation::new(
            format!("remotes[{index}].transport"),
            format!(
                "unsupported transport '{}' (expected one of: {})",
                remote.transport,
                SUPPORTED_TRANSPORTS.join(", ")
            ),
        ));
    }
    check_http_url(format!("remotes[{index}].url"), &remote.url, report);
}

fn check_tag(tag: &str, index: usize, report: &mut ValidationReport) {
    if tag.is_empty() {
        report.push(Violation::new(format!("tags[{index}]"), "must not be empty"));
        return;
    }
    if tag.chars().any(char::is_whitespace) {
        report.push(Violation::new(
            format!("tags[{index}]"),
            "must not contain whitespace",
        ));
    }
    if tag.len() > MAX_TAG_LEN {
        report.push(Violation::new(
            format!("tags[{index}]"),
            format!("must be at most {MAX_TAG_LEN} characters"),
        ));
    }
}

fn check_http_url(path: impl Into<String>, value: &str, report: &mut ValidationReport) {
    match url::Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => report.push(Violation::new(
            path,
            format!("must be an http(s) URL, got scheme '{}'", url.scheme()),
        )),
        Err(e) => report.push(Violation::new(path, format!("is not a valid URL: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ServerManifest;

    fn valid_manifest() -> ServerManifest {
        ServerManifest::from_json(
            r#"{
                "name": "io.github.acme/weather",
                "description": "Weather lookups for agents",
                "version": "1.2.0",
                "packages": [
                    {"registry": "npm", "identifier": "@acme/weather", "version": "1.2.0"}
                ],
                "remotes": [
                    {"transport": "sse", "url": "https://weather.acme.dev/sse"}
                ],
                "repository": {"url": "https://github.com/acme/weather", "source": "github"},
                "tags": ["weather"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_valid_manifest_passes() {
        let report = valid_manifest().validate();
        assert!(report.is_empty(), "unexpected violations: {report}");
    }

    #[test]
    fn test_missing_version_reported() {
        let mut manifest = valid_manifest();
        manifest.version = String::new();

        let report = manifest.validate();
        assert!(!report.is_empty());
        assert!(report.mentions("version"));
    }

    #[test]
    fn test_missing_name_reported() {
        let mut manifest = valid_manifest();
        manifest.name = String::new();

        let report = manifest.validate();
        assert!(report.mentions("name"));
    }

    #[test]
    fn test_name_without_namespace_reported() {
        let mut manifest = valid_manifest();
        manifest.name = "weather".to_string();

        let report = manifest.validate();
        assert!(report.mentions("name"));
    }

    #[test]
    fn test_name_with_uppercase_reported() {
        let mut manifest = valid_manifest();
        manifest.name = "io.github.Acme/weather".to_string();

        let report = manifest.validate();
        assert!(report.mentions("name"));
    }

    #[test]
    fn test_all_violations_reported_in_one_pass() {
        let manifest = ServerManifest::from_json(
            r#"{"name": "", "description": "", "version": ""}"#,
        )
        .unwrap();

        let report = manifest.validate();
        assert!(report.mentions("name"));
        assert!(report.mentions("description"));
        assert!(report.mentions("version"));
        assert!(report.mentions("packages"));
        assert_eq!(report.len(), 4);
    }

    #[test]
    fn test_no_packages_or_remotes_reported() {
        let mut manifest = valid_manifest();
        manifest.packages.clear();
        manifest.remotes.clear();

        let report = manifest.validate();
        assert!(report.mentions("packages"));
    }

    #[test]
    fn test_unknown_package_registry_reported() {
        let mut manifest = valid_manifest();
        manifest.packages[0].registry = "homebrew".to_string();

        let report = manifest.validate();
        assert!(report.mentions("packages[0].registry"));
    }

    #[test]
    fn test_empty_package_version_reported() {
        let mut manifest = valid_manifest();
        manifest.packages[0].version = "  ".to_string();

        let report = manifest.validate();
        assert!(report.mentions("packages[0].version"));
    }

    #[test]
    fn test_bad_remote_url_reported() {
        let mut manifest = valid_manifest();
        manifest.remotes[0].url = "ftp://weather.acme.dev".to_string();

        let report = manifest.validate();
        assert!(report.mentions("remotes[0].url"));
    }

    #[test]
    fn test_unparseable_remote_url_reported() {
        let mut manifest = valid_manifest();
        manifest.remotes[0].url = "not a url".to_string();

        let report = manifest.validate();
        assert!(report.mentions("remotes[0].url"));
    }

    #[test]
    fn test_bad_transport_reported() {
        let mut manifest = valid_manifest();
        manifest.remotes[0].transport = "websocket".to_string();

        let report = manifest.validate();
        assert!(report.mentions("remotes[0].transport"));
    }

    #[test]
    fn test_tag_with_whitespace_reported() {
        let mut manifest = valid_manifest();
        manifest.tags = vec!["weather data".to_string()];

        let report = manifest.validate();
        assert!(report.mentions("tags[0]"));
    }

    #[test]
    fn test_report_display_lists_everything() {
        let mut manifest = valid_manifest();
        manifest.version = String::new();
        manifest.tags = vec![String::new()];

        let display = manifest.validate().to_string();
        assert!(display.contains("2 schema violations"));
        assert!(display.contains("version"));
        assert!(display.contains("tags[0]"));
    }

    #[test]
    fn test_validation_does_not_mutate() {
        let manifest = valid_manifest();
        let before = manifest.clone();
        let _ = manifest.validate();
        assert_eq!(manifest, before);
    }
}
