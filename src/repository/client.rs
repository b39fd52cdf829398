// src/repository/client.rs

//! HTTP client for repository index documents
//!
//! The resolvers only depend on the [`IndexTransport`] trait; this module
//! provides the reqwest-backed implementation used by the binary.

use crate::config::HttpConfig;
use crate::error::{Error, Result};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Capability to fetch a document by URL
///
/// Implementations own transport policy (timeouts, proxies, retries). The
/// resolvers call `fetch` exactly once per resolution and propagate its error
/// unchanged.
pub trait IndexTransport: Send + Sync {
    /// Fetch the body at `url`
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP transport
#[derive(Debug, Clone)]
pub struct RepositoryClient {
    client: Client,
}

impl RepositoryClient {
    /// Create a client with default HTTP settings
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpConfig::default())
    }

    /// Create a client using the configured timeout and user agent
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Init(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl IndexTransport for RepositoryClient {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        info!("Fetching package index {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::Transport(format!("Failed to fetch {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Transport(format!("HTTP {} from {}", response.status(), url)));
        }

        let bytes = response
            .bytes()
            .map_err(|e| Error::Transport(format!("Failed to read response from {url}: {e}")))?;

        debug!("Received {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}
