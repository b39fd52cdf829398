// src/config.rs

//! Resolver configuration
//!
//! Loaded from an optional TOML file:
//!
//! ```toml
//! [repository]
//! base_url = "https://download.qt.io"
//! mirror = "https://mirrors.ocf.berkeley.edu/qt"
//!
//! [http]
//! timeout_secs = 30
//!
//! [wasm]
//! companion_modules = ["qtcharts", "qtlottie"]
//! ```

use crate::error::{Error, Result};
use crate::repository::{IndexLocator, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Modules bundled with the WebAssembly build of Qt 5.13/5.14
///
/// WASM installs pull these in even when no modules are requested. The list
/// matches the historical release layout and can be overridden in
/// configuration when upstream changes it.
pub const DEFAULT_WASM_COMPANION_MODULES: &[&str] = &[
    "qtcharts",
    "qtdatavis3d",
    "qtlottie",
    "qtnetworkauth",
    "qtpurchasing",
    "qtquicktimeline",
    "qtscript",
    "qtvirtualkeyboard",
    "qtwebglplugin",
];

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub repository: RepositorySection,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub wasm: WasmSection,
}

/// Where index documents and archives are served from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySection {
    /// Default repository host
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Mirror host serving identical content; replaces `base_url` when set
    #[serde(default)]
    pub mirror: Option<String>,
}

impl Default for RepositorySection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            mirror: None,
        }
    }
}

/// HTTP transport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// WebAssembly build settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasmSection {
    /// Modules resolved alongside the base package for `wasm_32`
    #[serde(default = "default_wasm_companion_modules")]
    pub companion_modules: Vec<String>,
}

impl Default for WasmSection {
    fn default() -> Self {
        Self {
            companion_modules: default_wasm_companion_modules(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("qtrepo/{}", env!("CARGO_PKG_VERSION"))
}

fn default_wasm_companion_modules() -> Vec<String> {
    DEFAULT_WASM_COMPANION_MODULES.iter().map(|m| m.to_string()).collect()
}

impl ResolverConfig {
    /// Create a default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file {}: {e}", path.display())))?;

        let config: ResolverConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config file {}: {e}", path.display())))?;

        config.validate()?;
        Ok(config)
    }

    /// Replace the mirror host
    pub fn with_mirror(mut self, mirror: Option<String>) -> Self {
        self.repository.mirror = mirror;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validate_host("repository.base_url", &self.repository.base_url)?;
        if let Some(mirror) = &self.repository.mirror {
            validate_host("repository.mirror", mirror)?;
        }

        if self.http.timeout_secs == 0 {
            return Err(Error::Config("http.timeout_secs must be greater than 0".to_string()));
        }

        if self.wasm.companion_modules.iter().any(|m| m.trim().is_empty()) {
            return Err(Error::Config("wasm.companion_modules contains an empty name".to_string()));
        }

        Ok(())
    }

    /// Locator for the configured host and mirror
    pub fn locator(&self) -> IndexLocator {
        IndexLocator::new(&self.repository.base_url, self.repository.mirror.as_deref())
    }
}

/// Hosts must be absolute http(s) URLs
fn validate_host(key: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| Error::Config(format!("Invalid {key} '{value}': {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::Config(format!(
            "Invalid {key} '{value}': unsupported scheme '{other}'"
        ))),
    }
}
