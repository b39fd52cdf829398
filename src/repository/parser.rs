// src/repository/parser.rs

//! `Updates.xml` index document parser
//!
//! An index document is a list of `PackageUpdate` elements:
//!
//! ```xml
//! <Updates>
//!   <PackageUpdate>
//!     <Name>qt.qt5.5131.gcc_64</Name>
//!     <Version>5.13.1-0-201909031231</Version>
//!     <Description>Qt 5.13.1 Prebuilt Components for Linux x64</Description>
//!     <DownloadableArchives>qtbase-Linux.7z, qtsvg-Linux.7z</DownloadableArchives>
//!   </PackageUpdate>
//! </Updates>
//! ```
//!
//! Records without downloadable archives only carry metadata and are skipped.
//! Malformed markup fails the whole parse.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use super::package::PackageRecord;

const PACKAGE_UPDATE: &[u8] = b"PackageUpdate";

/// Separator between entries of `DownloadableArchives`
const ARCHIVE_SEPARATOR: &str = ", ";

/// Child elements of `PackageUpdate` that we read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Version,
    Description,
    Archives,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"Name" => Some(Field::Name),
            b"Version" => Some(Field::Version),
            b"Description" => Some(Field::Description),
            b"DownloadableArchives" => Some(Field::Archives),
            _ => None,
        }
    }
}

/// A `PackageUpdate` element whose fields are still being collected
#[derive(Debug, Default)]
struct PendingRecord {
    /// Element depth of the `PackageUpdate` start tag
    depth: usize,
    name: Option<String>,
    version: Option<String>,
    description: Option<String>,
    archives: Option<String>,
}

impl PendingRecord {
    fn new(depth: usize) -> Self {
        Self {
            depth,
            ..Default::default()
        }
    }

    fn set(&mut self, field: Field, value: String) {
        let value = value.trim().to_string();
        match field {
            Field::Name => self.name = Some(value),
            Field::Version => self.version = Some(value),
            Field::Description => self.description = Some(value),
            Field::Archives => self.archives = Some(value),
        }
    }

    /// Finish the record; `Ok(None)` means metadata-only
    fn finish(self) -> Result<Option<PackageRecord>> {
        let name = self
            .name
            .filter(|n| !n.is_empty())
            .ok_or_else(|| Error::IndexParse("PackageUpdate without a Name".to_string()))?;
        let version = self
            .version
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::IndexParse(format!("PackageUpdate '{name}' has no Version")))?;

        let archives: Vec<String> = self
            .archives
            .as_deref()
            .unwrap_or_default()
            .split(ARCHIVE_SEPARATOR)
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(String::from)
            .collect();

        if archives.is_empty() {
            debug!("Skipping metadata-only package {}", name);
            return Ok(None);
        }

        Ok(Some(PackageRecord {
            name,
            version,
            description: self.description.unwrap_or_default(),
            archives,
        }))
    }
}

/// Walk all attributes so quoting and duplicate checks run
fn check_attributes(element: &BytesStart<'_>) -> Result<()> {
    for attr in element.attributes() {
        attr.map_err(|e| {
            Error::IndexParse(format!(
                "invalid attribute on <{}>: {e}",
                String::from_utf8_lossy(element.name().as_ref())
            ))
        })?;
    }
    Ok(())
}

/// Parser for Qt installer framework index documents
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexParser;

impl IndexParser {
    /// Parse an index document into package records, in document order
    pub fn parse(document: &[u8]) -> Result<Vec<PackageRecord>> {
        let text = std::str::from_utf8(document)
            .map_err(|e| Error::IndexParse(format!("Invalid UTF-8 in index document: {e}")))?;

        let mut reader = Reader::from_str(text);
        reader.trim_text(true);

        let mut records = Vec::new();
        let mut depth = 0usize;
        let mut saw_root = false;
        let mut root_closed = false;
        let mut current: Option<PendingRecord> = None;
        let mut field: Option<(Field, String)> = None;

        loop {
            let event = reader.read_event().map_err(|e| {
                Error::IndexParse(format!("{e} at byte {}", reader.buffer_position()))
            })?;

            match event {
                Event::Start(e) => {
                    if root_closed {
                        return Err(junk_after_root(&reader));
                    }
                    check_attributes(&e)?;
                    depth += 1;
                    saw_root = true;
                    match current.as_ref().map(|p| p.depth) {
                        None if e.name().as_ref() == PACKAGE_UPDATE => {
                            current = Some(PendingRecord::new(depth));
                        }
                        Some(record_depth) if depth == record_depth + 1 => {
                            field = Field::from_tag(e.name().as_ref()).map(|f| (f, String::new()));
                        }
                        _ => {}
                    }
                }
                Event::Empty(e) => {
                    if root_closed {
                        return Err(junk_after_root(&reader));
                    }
                    check_attributes(&e)?;
                    saw_root = true;
                    if depth == 0 {
                        root_closed = true;
                    }
                    match current.as_mut() {
                        None if e.name().as_ref() == PACKAGE_UPDATE => {
                            if let Some(record) = PendingRecord::new(depth + 1).finish()? {
                                records.push(record);
                            }
                        }
                        // <DownloadableArchives/> and friends
                        Some(pending) if depth == pending.depth => {
                            if let Some(f) = Field::from_tag(e.name().as_ref()) {
                                pending.set(f, String::new());
                            }
                        }
                        _ => {}
                    }
                }
                Event::Text(t) => {
                    if depth == 0 && t.iter().any(|b| !b.is_ascii_whitespace()) {
                        return Err(Error::IndexParse(format!(
                            "text outside the document element at byte {}",
                            reader.buffer_position()
                        )));
                    }
                    if let Some((_, value)) = field.as_mut() {
                        value.push_str(&t.unescape()?);
                    }
                }
                Event::CData(c) => {
                    if depth == 0 {
                        return Err(Error::IndexParse(format!(
                            "CDATA outside the document element at byte {}",
                            reader.buffer_position()
                        )));
                    }
                    if let Some((_, value)) = field.as_mut() {
                        let raw = c.into_inner();
                        let data = std::str::from_utf8(&raw).map_err(|e| {
                            Error::IndexParse(format!("Invalid UTF-8 in CDATA section: {e}"))
                        })?;
                        value.push_str(data);
                    }
                }
                Event::End(_) => {
                    if depth == 0 {
                        return Err(Error::IndexParse(format!(
                            "unexpected closing tag at byte {}",
                            reader.buffer_position()
                        )));
                    }
                    match current.as_ref().map(|p| p.depth) {
                        Some(record_depth) if depth == record_depth + 1 => {
                            if let (Some(pending), Some((f, value))) = (current.as_mut(), field.take()) {
                                pending.set(f, value);
                            }
                        }
                        Some(record_depth) if depth == record_depth => {
                            if let Some(record) = current.take().map(PendingRecord::finish).transpose()?.flatten() {
                                records.push(record);
                            }
                        }
                        _ => {}
                    }
                    depth -= 1;
                    if depth == 0 {
                        root_closed = true;
                    }
                }
                Event::Eof => {
                    if depth != 0 {
                        return Err(Error::IndexParse(format!(
                            "unexpected end of document with {depth} unclosed element(s)"
                        )));
                    }
                    if !saw_root {
                        return Err(Error::IndexParse("document has no root element".to_string()));
                    }
                    break;
                }
                _ => {}
            }
        }

        debug!("Parsed {} downloadable package records", records.len());
        Ok(records)
    }
}

fn junk_after_root(reader: &Reader<&[u8]>) -> Error {
    Error::IndexParse(format!(
        "junk after document element at byte {}",
        reader.buffer_position()
    ))
}
