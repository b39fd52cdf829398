// src/resolver/tool.rs

//! Auxiliary tool resolution
//!
//! Tools (MinGW, Installer Framework, ...) are published per tool name rather
//! than per release. Every record whose version equals the requested version
//! string is selected; no range or numeric comparison is applied.

use crate::config::ResolverConfig;
use crate::error::Result;
use crate::repository::{IndexLocator, IndexTransport, ResolvedArtifact, TargetConfig};

use super::{fetch_records, named_version, require_artifacts, require_field, ArchiveResolver};

/// Tools are only published for the desktop target
pub const DEFAULT_TOOL_TARGET: &str = "desktop";

/// Install directory reported for tools in place of a release version
const TOOLS_DIR: &str = "Tools";

/// One tool at an exact version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolQuery {
    pub os_name: String,
    pub target: String,
    /// Repository directory of the tool, e.g. `tools_mingw`
    pub tool_name: String,
    /// Matched verbatim against record versions, e.g. `4.9.1-3`
    pub version: String,
    pub arch: String,
}

impl ToolQuery {
    pub fn new(
        os_name: impl Into<String>,
        tool_name: impl Into<String>,
        version: impl Into<String>,
        arch: impl Into<String>,
    ) -> Self {
        Self {
            os_name: os_name.into(),
            target: DEFAULT_TOOL_TARGET.to_string(),
            tool_name: tool_name.into(),
            version: version.into(),
            arch: arch.into(),
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_field("os", &self.os_name)?;
        require_field("target", &self.target)?;
        require_field("tool name", &self.tool_name)?;
        require_field("version", &self.version)?;
        require_field("arch", &self.arch)
    }
}

/// Resolver for one tool version
#[derive(Debug, Clone)]
pub struct ToolArchiveResolver {
    query: ToolQuery,
    locator: IndexLocator,
}

impl ToolArchiveResolver {
    pub fn new(query: ToolQuery, config: &ResolverConfig) -> Result<Self> {
        config.validate()?;
        query.validate()?;

        Ok(Self {
            query,
            locator: config.locator(),
        })
    }

    pub fn query(&self) -> &ToolQuery {
        &self.query
    }
}

impl ArchiveResolver for ToolArchiveResolver {
    fn resolve(&self, transport: &dyn IndexTransport) -> Result<Vec<ResolvedArtifact>> {
        let q = &self.query;
        let location = self.locator.locate_tool(&q.os_name, &q.target, &q.tool_name);
        let records = fetch_records(transport, &location)?;

        let mut artifacts = Vec::new();
        for record in records.iter().filter(|r| r.version == q.version) {
            let dir_version = named_version(&record.version);
            for archive in &record.archives {
                artifacts.push(ResolvedArtifact {
                    package_name: record.name.clone(),
                    source_url: format!(
                        "{}{}/{}/{}{}",
                        location.directory, q.tool_name, record.name, dir_version, archive
                    ),
                    archive: archive.clone(),
                    description: record.description.clone(),
                    has_mirror: self.locator.has_mirror(),
                });
            }
        }

        require_artifacts(artifacts, &location, || {
            format!("{} version {} ({} {})", q.tool_name, q.version, q.os_name, q.arch)
        })
    }

    fn target_config(&self) -> TargetConfig {
        TargetConfig {
            version: TOOLS_DIR.to_string(),
            target: self.query.target.clone(),
            arch: self.query.arch.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_defaults_to_desktop_target() {
        let query = ToolQuery::new("windows", "tools_mingw", "4.9.1-3", "win32_mingw491");
        assert_eq!(query.target, "desktop");
        assert_eq!(query.with_target("android").target, "android");
    }

    #[test]
    fn test_empty_version_rejected() {
        let err = ToolArchiveResolver::new(
            ToolQuery::new("linux", "tools_ifw", "", "qt.tools.ifw.31"),
            &ResolverConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidQuery(_)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ResolverConfig::default().with_mirror(Some("mirror.example.org".to_string()));
        let err = ToolArchiveResolver::new(
            ToolQuery::new("windows", "tools_mingw", "4.9.1-3", "win32_mingw491"),
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)), "{err}");
    }

    #[test]
    fn test_target_config_reports_tools() {
        let resolver = ToolArchiveResolver::new(
            ToolQuery::new("linux", "tools_ifw", "3.1.1", "qt.tools.ifw.31"),
            &ResolverConfig::default(),
        )
        .unwrap();
        let config = resolver.target_config();
        assert_eq!(config.version, "Tools");
        assert_eq!(config.target, "desktop");
        assert_eq!(config.arch, "qt.tools.ifw.31");
    }
}
