// src/repository/package.rs

//! Package data structures
//!
//! Records parsed from an `Updates.xml` index document and the resolved
//! archive artifacts handed back to callers.

use serde::Serialize;

/// One `PackageUpdate` entry from an index document
///
/// Records only live for the duration of a single resolution call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    /// Dotted package identifier, e.g. `qt.qt5.5131.gcc_64`
    pub name: String,
    /// Full version string as published, e.g. `5.13.1-0-201909031231`
    pub version: String,
    pub description: String,
    /// Archive filename fragments, never empty
    pub archives: Vec<String>,
}

/// A fully addressed downloadable archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedArtifact {
    pub package_name: String,
    /// Absolute download URL
    pub source_url: String,
    /// Filename the caller should store the archive under
    pub archive: String,
    pub description: String,
    /// Whether the URL points at a mirror rather than the default host
    pub has_mirror: bool,
}

/// Install location hints for a resolution: `(version, target, arch)`
///
/// Tool resolutions report `Tools` in place of a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetConfig {
    pub version: String,
    pub target: String,
    pub arch: String,
}
