// tests/common/mod.rs

//! Shared test utilities: an in-memory transport and index fixtures.

#![allow(dead_code)]

use qtrepo::{Error, IndexTransport, Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves canned documents by URL and records every request
#[derive(Default)]
pub struct StaticTransport {
    documents: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl StaticTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, url: &str, body: &str) -> Self {
        self.documents.insert(url.to_string(), body.as_bytes().to_vec());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl IndexTransport for StaticTransport {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(url.to_string());
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Transport(format!("HTTP 404 Not Found from {url}")))
    }
}

/// Build a `PackageUpdate` element; `None` archives omits the field
pub fn package_update(name: &str, version: &str, archives: Option<&str>) -> String {
    let archives = archives
        .map(|a| format!("<DownloadableArchives>{a}</DownloadableArchives>"))
        .unwrap_or_default();
    format!(
        "<PackageUpdate><Name>{name}</Name><DisplayName>{name}</DisplayName>\
         <Description>{name} description</Description><Version>{version}</Version>\
         {archives}</PackageUpdate>"
    )
}

/// Wrap package updates into an index document
pub fn updates_xml(packages: &[String]) -> String {
    format!(
        "<?xml version=\"1.0\"?>\n<Updates><ApplicationName>{{AnyApplication}}</ApplicationName>\
         <ApplicationVersion>1.0.0</ApplicationVersion><Checksum>true</Checksum>{}</Updates>",
        packages.concat()
    )
}
