// src/resolver/mod.rs

//! Archive resolution
//!
//! Turns a platform query into the list of archives to download. Two
//! resolvers share the same skeleton (locate, fetch, parse, filter, expand)
//! and differ only in how they select records and compose URLs:
//!
//! - [`FeatureArchiveResolver`] matches records by package name for a Qt
//!   release plus optional modules
//! - [`ToolArchiveResolver`] matches records of one tool by exact version
//!
//! Resolvers are immutable and hold no results between calls. Every call
//! fetches and parses the index again.

mod feature;
mod tool;

pub use feature::{FeatureArchiveResolver, FeatureQuery};
pub use tool::{ToolArchiveResolver, ToolQuery};

use crate::error::{Error, Result};
use crate::repository::{IndexLocation, IndexParser, IndexTransport, PackageRecord, ResolvedArtifact, TargetConfig};
use tracing::{debug, info};

/// Resolves a query into downloadable archives
pub trait ArchiveResolver {
    /// Fetch the index through `transport` and resolve the matching archives
    ///
    /// Never returns an empty list: no match is [`Error::NoMatchingPackages`].
    fn resolve(&self, transport: &dyn IndexTransport) -> Result<Vec<ResolvedArtifact>>;

    /// Where the resolved archives are meant to be installed
    fn target_config(&self) -> TargetConfig;
}

/// Fetch and parse the index document at `location`
fn fetch_records(transport: &dyn IndexTransport, location: &IndexLocation) -> Result<Vec<PackageRecord>> {
    debug!("Resolving against {}", location.document);
    let document = transport.fetch(&location.document)?;
    let records = IndexParser::parse(&document)?;
    debug!("{} records in {}", records.len(), location.document);
    Ok(records)
}

/// Reject an empty resolution
fn require_artifacts(
    artifacts: Vec<ResolvedArtifact>,
    location: &IndexLocation,
    wanted: impl FnOnce() -> String,
) -> Result<Vec<ResolvedArtifact>> {
    if artifacts.is_empty() {
        return Err(Error::NoMatchingPackages {
            index_url: location.document.clone(),
            wanted: wanted(),
        });
    }

    info!("Resolved {} archives from {}", artifacts.len(), location.document);
    Ok(artifacts)
}

/// Release version without dots, as used in package names: `5.13.1` -> `5131`
pub fn version_digits(version: &str) -> String {
    version.replace('.', "")
}

/// Version directory of a tool archive
///
/// Only the first two `-` separated groups are kept, so `4.9.1-3-x` becomes
/// `4.9.1-3`. Versions without a hyphen are used as is.
pub fn named_version(version: &str) -> String {
    let mut parts = version.split('-');
    match (parts.next(), parts.next()) {
        (Some(base), Some(build)) => format!("{base}-{build}"),
        _ => version.to_string(),
    }
}

/// Reject empty or whitespace-only query fields
fn require_field(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidQuery(format!("{field} must not be empty")));
    }
    Ok(())
}
