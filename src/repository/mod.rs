// src/repository/mod.rs

//! Repository index access
//!
//! This module provides functionality for:
//! - Computing index document URLs for releases and tools
//! - Fetching index documents through an injected transport
//! - Parsing `Updates.xml` into package records

mod client;
mod locator;
mod package;
mod parser;

pub use client::{IndexTransport, RepositoryClient};
pub use locator::{IndexLocation, IndexLocator, DEFAULT_BASE_URL, INDEX_FILE, WASM_ARCH};
pub use package::{PackageRecord, ResolvedArtifact, TargetConfig};
pub use parser::IndexParser;
