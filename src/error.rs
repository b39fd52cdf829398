// src/error.rs

//! Error types for index resolution
//!
//! Every failure is surfaced to the caller as a typed value. The library
//! never prints diagnostics or terminates the process.

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving repository archives
#[derive(Error, Debug)]
pub enum Error {
    /// Fetching the index document failed (network, DNS, timeout, HTTP status)
    #[error("transport error: {0}")]
    Transport(String),

    /// The index document is not well-formed markup
    #[error("failed to parse package index: {0}")]
    IndexParse(String),

    /// The index parsed cleanly but nothing matched the request
    #[error("no matching packages for {wanted} in {index_url}")]
    NoMatchingPackages {
        /// Index document that was searched
        index_url: String,
        /// Human readable description of what was searched for
        wanted: String,
    },

    /// Query parameters are malformed
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Configuration could not be read or is invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// Initialization failed (HTTP client construction)
    #[error("initialization error: {0}")]
    Init(String),
}

impl Error {
    /// True when the request named a platform/version/module combination that
    /// the repository does not provide
    pub fn is_no_match(&self) -> bool {
        matches!(self, Error::NoMatchingPackages { .. })
    }
}

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Self {
        Error::IndexParse(e.to_string())
    }
}
