// src/resolver/feature.rs

//! Qt release resolution
//!
//! Selects the base package of a release, its legacy-named twin, the WASM
//! companion modules (for `wasm_32` only) and every requested module, then
//! expands each selected record into one artifact per archive.

use crate::config::ResolverConfig;
use crate::error::{Error, Result};
use crate::repository::{IndexLocator, IndexTransport, ResolvedArtifact, TargetConfig, WASM_ARCH};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use tracing::debug;

use super::{fetch_records, require_artifacts, require_field, version_digits, ArchiveResolver};

static RELEASE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("valid release version pattern"));

/// A Qt release on one platform, with optional add-on modules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureQuery {
    /// `windows`, `linux` or `mac`
    pub os_name: String,
    /// `desktop`, `android`, `ios` or `winrt`
    pub target: String,
    /// Release version, `major.minor.patch`
    pub version: String,
    /// Compiler/arch name, e.g. `gcc_64` or `wasm_32`
    pub arch: String,
    /// Short module names, e.g. `qtcharts`
    pub modules: BTreeSet<String>,
}

impl FeatureQuery {
    pub fn new(
        os_name: impl Into<String>,
        target: impl Into<String>,
        version: impl Into<String>,
        arch: impl Into<String>,
    ) -> Self {
        Self {
            os_name: os_name.into(),
            target: target.into(),
            version: version.into(),
            arch: arch.into(),
            modules: BTreeSet::new(),
        }
    }

    /// Add modules to the query
    pub fn with_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modules.extend(modules.into_iter().map(Into::into));
        self
    }

    /// Check field shapes before any network access
    pub fn validate(&self) -> Result<()> {
        require_field("os", &self.os_name)?;
        require_field("target", &self.target)?;
        require_field("arch", &self.arch)?;

        if !RELEASE_VERSION.is_match(&self.version) {
            return Err(Error::InvalidQuery(format!(
                "version '{}' is not of the form major.minor.patch",
                self.version
            )));
        }

        if let Some(module) = self
            .modules
            .iter()
            .find(|m| m.is_empty() || m.chars().any(char::is_whitespace))
        {
            return Err(Error::InvalidQuery(format!("invalid module name '{module}'")));
        }

        Ok(())
    }
}

/// Resolver for a Qt release plus modules
#[derive(Debug, Clone)]
pub struct FeatureArchiveResolver {
    query: FeatureQuery,
    locator: IndexLocator,
    wasm_companions: Vec<String>,
}

impl FeatureArchiveResolver {
    /// Validate the query and bind it to the configured repository
    pub fn new(query: FeatureQuery, config: &ResolverConfig) -> Result<Self> {
        config.validate()?;
        query.validate()?;

        Ok(Self {
            query,
            locator: config.locator(),
            wasm_companions: config.wasm.companion_modules.clone(),
        })
    }

    pub fn query(&self) -> &FeatureQuery {
        &self.query
    }

    /// Fully qualified package names this query selects
    pub fn target_packages(&self) -> BTreeSet<String> {
        let digits = version_digits(&self.query.version);
        let arch = &self.query.arch;

        let mut names = BTreeSet::new();
        names.insert(format!("qt.qt5.{digits}.{arch}"));
        names.insert(format!("qt.{digits}.{arch}"));

        if arch == WASM_ARCH {
            for module in &self.wasm_companions {
                names.insert(module_package(&digits, module, arch));
            }
        }

        for module in &self.query.modules {
            names.insert(module_package(&digits, module, arch));
        }

        names
    }
}

impl ArchiveResolver for FeatureArchiveResolver {
    fn resolve(&self, transport: &dyn IndexTransport) -> Result<Vec<ResolvedArtifact>> {
        let q = &self.query;
        let location = self
            .locator
            .locate(&q.os_name, &q.target, &version_digits(&q.version), &q.arch);
        let wanted = self.target_packages();
        debug!("Looking for packages {:?}", wanted);

        let records = fetch_records(transport, &location)?;

        let mut artifacts = Vec::new();
        for record in records.iter().filter(|r| wanted.contains(&r.name)) {
            for archive in &record.archives {
                artifacts.push(ResolvedArtifact {
                    package_name: record.name.clone(),
                    source_url: format!("{}{}/{}{}", location.directory, record.name, record.version, archive),
                    archive: archive.clone(),
                    description: record.description.clone(),
                    has_mirror: self.locator.has_mirror(),
                });
            }
        }

        require_artifacts(artifacts, &location, || {
            format!(
                "Qt {} {} {} {} (packages: {})",
                q.version,
                q.os_name,
                q.target,
                q.arch,
                wanted.into_iter().collect::<Vec<_>>().join(", ")
            )
        })
    }

    fn target_config(&self) -> TargetConfig {
        TargetConfig {
            version: self.query.version.clone(),
            target: self.query.target.clone(),
            arch: self.query.arch.clone(),
        }
    }
}

fn module_package(digits: &str, module: &str, arch: &str) -> String {
    format!("qt.qt5.{digits}.{module}.{arch}")
}
