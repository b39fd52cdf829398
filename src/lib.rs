// src/lib.rs

//! qtrepo: Qt SDK online repository resolver
//!
//! Locates the `Updates.xml` index for a Qt release or tool, parses it, and
//! resolves the requested packages into absolute archive URLs. Downloading and
//! unpacking the archives is left to the caller.
//!
//! # Architecture
//!
//! - `repository`: index URLs, the transport capability, the XML parser
//! - `resolver`: release and tool resolution policies
//! - `config`: repository host, mirror and HTTP settings

pub mod config;
mod error;
pub mod repository;
pub mod resolver;

pub use config::ResolverConfig;
pub use error::{Error, Result};
pub use repository::{
    IndexLocation, IndexLocator, IndexParser, IndexTransport, PackageRecord, RepositoryClient,
    ResolvedArtifact, TargetConfig,
};
pub use resolver::{
    ArchiveResolver, FeatureArchiveResolver, FeatureQuery, ToolArchiveResolver, ToolQuery,
};
